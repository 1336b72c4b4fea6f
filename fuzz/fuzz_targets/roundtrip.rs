#![no_main]
use libfuzzer_sys::fuzz_target;
use sparse_string::SparseString;

fuzz_target!(|units: Vec<u16>| {
    let s = SparseString::from_utf16(&units);

    assert_eq!(s.len(), units.len());
    assert_eq!(s.to_utf16(), units);
    assert_eq!(s.char_at(units.len()), 0);

    let back = SparseString::from_bytes(&s.to_bytes()).expect("own encoding must decode");
    assert_eq!(back, s);
});
