//! Criterion micro-benchmarks for frame allocation and in-place fill.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use prefill_arena::{allocate, ColumnDescriptor, FrameConfig};
use prefill_bench::{categorical_profile, fill_all, narrow_profile, wide_profile};

fn bench_allocate_narrow(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocate_narrow");
    for rows in [1_000usize, 100_000, 1_000_000] {
        let request = narrow_profile(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &request, |b, req| {
            b.iter(|| black_box(allocate(req).unwrap()));
        });
    }
    group.finish();
}

fn bench_allocate_wide(c: &mut Criterion) {
    let request = wide_profile(500, 10_000);
    c.bench_function("allocate_wide_500x10k", |b| {
        b.iter(|| black_box(allocate(&request).unwrap()));
    });
}

fn bench_allocate_categorical(c: &mut Criterion) {
    let request = categorical_profile(30, 10_000);
    c.bench_function("allocate_categorical_30x10k", |b| {
        b.iter(|| black_box(allocate(&request).unwrap()));
    });
}

fn bench_descriptor(c: &mut Criterion) {
    let request = wide_profile(500, 0);
    let config = FrameConfig::default();
    c.bench_function("descriptor_wide_500", |b| {
        b.iter(|| black_box(ColumnDescriptor::from_request(&request, &config).unwrap()));
    });
}

fn bench_views_and_fill(c: &mut Criterion) {
    let mut frame = allocate(&narrow_profile(100_000)).unwrap();
    c.bench_function("views_fill_narrow_100k", |b| {
        b.iter(|| {
            let mut views = frame.views_mut();
            fill_all(&mut views);
            black_box(views.len())
        });
    });
}

criterion_group!(
    benches,
    bench_allocate_narrow,
    bench_allocate_wide,
    bench_allocate_categorical,
    bench_descriptor,
    bench_views_and_fill
);
criterion_main!(benches);
