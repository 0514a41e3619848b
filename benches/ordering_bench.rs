//! Benchmark for sorting.
//!
//! Measures natural-order `sort` against keyed `sort_by` and
//! `sort_by_property` on shuffled inputs.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;
use underbar::collection::{shuffle_with, sort, sort_by, sort_by_property};
use underbar::value::{Value, json};

fn shuffled(size: usize, element: impl Fn(usize) -> Value) -> Value {
    let ordered = Value::Array((0..size).map(element).collect());
    Value::Array(shuffle_with(&ordered, &mut StdRng::seed_from_u64(42)))
}

fn benchmark_sort(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("sort");

    for size in [100, 1_000, 10_000] {
        let list = shuffled(size, |number| json!(number));
        group.bench_with_input(BenchmarkId::from_parameter(size), &list, |bencher, list| {
            bencher.iter(|| sort(black_box(list)));
        });
    }

    group.finish();
}

fn benchmark_sort_by(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("sort_by");

    for size in [100, 1_000, 10_000] {
        let numbers = shuffled(size, |number| json!(number));
        group.bench_with_input(BenchmarkId::new("negated", size), &numbers, |bencher, list| {
            bencher.iter(|| {
                sort_by(black_box(list), |value| {
                    json!(-value.as_f64().unwrap_or_default())
                })
            });
        });

        let records = shuffled(size, |number| json!({"id": number, "rank": number % 17}));
        group.bench_with_input(BenchmarkId::new("property", size), &records, |bencher, list| {
            bencher.iter(|| sort_by_property(black_box(list), "rank"));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_sort, benchmark_sort_by);
criterion_main!(benches);
