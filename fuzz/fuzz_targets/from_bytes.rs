#![no_main]
use libfuzzer_sys::fuzz_target;
use sparse_string::SparseString;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = SparseString::from_bytes(data) else {
        return;
    };

    // Lengths come from the input, so only probe a bounded prefix.
    for i in 0..s.len().min(256) {
        let unit = s.char_at(i);
        assert!(s.dictionary().contains(&u32::from(unit)));
    }
    assert_eq!(s.to_bytes(), data);
});
