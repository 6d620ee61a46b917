//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gf2gcm::{gcm, GF2_128};

fn benchmark_field_multiply(c: &mut Criterion) {
    let a = GF2_128
        .element(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef)
        .unwrap();
    let b = GF2_128
        .element(0xfedc_ba98_7654_3210_fedc_ba98_7654_3210)
        .unwrap();

    c.bench_function("gf2_128_multiply", |bench| {
        bench.iter(|| black_box(a.multiply(&b)));
    });
}

fn benchmark_ghash(c: &mut Criterion) {
    let subkey = [0x42u8; 16];
    let data = vec![0xA5u8; 1024];

    c.bench_function("ghash_1kib", |bench| {
        bench.iter(|| gcm::ghash(black_box(&subkey), black_box(&data)));
    });
}

fn benchmark_seal(c: &mut Criterion) {
    let key = [0x13u8; 16];
    let iv = [0x37u8; 12];
    let plain = vec![0x5Au8; 1024];

    c.bench_function("gcm_seal_1kib", |bench| {
        bench.iter(|| gcm::encrypt(black_box(&key), &iv, &plain, b"", 16));
    });
}

criterion_group!(
    benches,
    benchmark_field_multiply,
    benchmark_ghash,
    benchmark_seal
);
criterion_main!(benches);
