use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sparse_string::SparseString;

fn bench_sparse_string(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_string");
    let text = "To be or not to be that is the question. ".repeat(1000);
    let units: Vec<u16> = text.encode_utf16().collect();
    let s = SparseString::from_utf16(&units);

    group.bench_function("encode", |b| {
        b.iter(|| black_box(SparseString::from_utf16(black_box(&units))))
    });

    group.bench_function("char_at", |b| {
        b.iter(|| {
            for i in (0..units.len()).step_by(7) {
                black_box(s.char_at(i));
            }
        })
    });

    group.bench_function("to_utf16", |b| b.iter(|| black_box(s.to_utf16())));
}

criterion_group!(benches, bench_sparse_string);
criterion_main!(benches);
