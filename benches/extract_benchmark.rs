//! Benchmarks for markspan extraction performance.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates markup with the given number of numbered marks, last ordinal first.
fn create_test_markup(mark_count: usize) -> String {
    let mut markup = String::from("请阅读并同意 ");
    for i in (1..=mark_count).rev() {
        markup.push_str(&format!(
            "<a id=\"{}\">条款 {}</a> &amp; <b>bold</b> text 😀 ",
            i, i
        ));
    }
    markup
}

/// Benchmark encoding detection and decoding.
fn bench_decoding(c: &mut Criterion) {
    let utf8 = create_test_markup(10).into_bytes();
    let mut utf16 = vec![0xFF, 0xFE];
    for unit in create_test_markup(10).encode_utf16() {
        utf16.extend_from_slice(&unit.to_le_bytes());
    }

    c.bench_function("decode_utf8", |b| {
        b.iter(|| markspan::decode_bytes(black_box(&utf8)).unwrap());
    });

    c.bench_function("decode_utf16le", |b| {
        b.iter(|| markspan::decode_bytes(black_box(&utf16)).unwrap());
    });
}

/// Benchmark both match strategies at various sizes.
fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");

    for mark_count in [1, 10, 100].iter() {
        let markup = create_test_markup(*mark_count);

        group.bench_function(format!("tracked_{}_marks", mark_count), |b| {
            b.iter(|| markspan::extract(black_box(&markup)).unwrap());
        });

        group.bench_function(format!("search_{}_marks", mark_count), |b| {
            let parser = markspan::Markspan::new()
                .with_strategy(markspan::MatchStrategy::Search)
                .parser();
            b.iter(|| parser.parse(black_box(&markup)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark builder pattern overhead.
fn bench_builder_creation(c: &mut Criterion) {
    c.bench_function("builder_creation", |b| {
        b.iter(|| {
            let _builder = markspan::Markspan::new()
                .lenient()
                .collapse_whitespace()
                .with_unit(markspan::CodeUnit::Char);
        });
    });
}

criterion_group!(
    benches,
    bench_decoding,
    bench_extraction,
    bench_builder_creation,
);
criterion_main!(benches);
