//! Criterion benchmarks for vector growth and mid-sequence insertion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use keel::Vec;

fn push_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("push");
    for &n in &[64usize, 4_096, 262_144] {
        group.bench_with_input(BenchmarkId::new("keel", n), &n, |b, &n| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..n {
                    vec.push(black_box(i));
                }
                vec
            })
        });
        group.bench_with_input(BenchmarkId::new("std", n), &n, |b, &n| {
            b.iter(|| {
                let mut vec = std::vec::Vec::new();
                for i in 0..n {
                    vec.push(black_box(i));
                }
                vec
            })
        });
    }
    group.finish();
}

fn insert_front(c: &mut Criterion) {
    c.bench_function("insert_front_1k", |b| {
        b.iter(|| {
            let mut vec = Vec::new();
            for i in 0..1_000u32 {
                vec.insert(0, black_box(i));
            }
            vec
        })
    });

    c.bench_function("insert_slice_middle", |b| {
        let chunk: std::vec::Vec<u64> = (0..32).collect();
        b.iter(|| {
            let mut vec = Vec::from_elem(0u64, 1_024);
            for _ in 0..32 {
                let mid = vec.len() / 2;
                vec.insert_slice(mid, black_box(&chunk));
            }
            vec
        })
    });
}

criterion_group!(benches, push_growth, insert_front);
criterion_main!(benches);
