//! Criterion benchmarks for name resolution and placeholder generation.
//!
//! Run with:
//!   cargo bench
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use valentine::assets::placeholder_data_uri;
use valentine::name::{resolve_display_name, sanitize_name};

fn bench_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize");
    group.bench_function("plain", |b| b.iter(|| sanitize_name(black_box("Samriddhi"))));
    group.bench_function("hostile", |b| {
        let input = "<script>alert(1)</script>ＳＡＭ 💘💘  \t O'Neil-Smith, Jr.".repeat(8);
        b.iter(|| sanitize_name(black_box(&input)))
    });
    group.bench_function("resolve_from_query", |b| {
        b.iter(|| resolve_display_name(black_box("?utm=x&name=Sam%20%3Cb%3ELee%3C%2Fb%3E"), "Fallback"))
    });
    group.finish();
}

fn bench_placeholder(c: &mut Criterion) {
    c.bench_function("placeholder_data_uri", |b| {
        b.iter(|| placeholder_data_uri(black_box(7)))
    });
}

criterion_group!(benches, bench_sanitize, bench_placeholder);
criterion_main!(benches);
