//! Benchmarks for the Formdeck form index
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use formdeck::index::{FieldSet, FormIndex, FormQuery, IndexConfig, SequentialIds, ValueScope};
use std::sync::Arc;

const COLORS: [&str; 4] = ["red", "green", "blue", "black"];
const SIZES: [&str; 3] = ["S", "M", "L"];

fn sample_fields(i: usize) -> FieldSet {
    let mut fields = FieldSet::new()
        .with("color", COLORS[i % COLORS.len()])
        .with("size", SIZES[i % SIZES.len()])
        .with("batch", (i / 100).to_string());
    if i % 2 == 0 {
        fields.insert("note", "even");
    }
    fields
}

fn populated_index(count: usize, scope: ValueScope) -> FormIndex {
    let index = FormIndex::with_config(
        IndexConfig { value_scope: scope },
        Arc::new(SequentialIds::default()),
    );
    for i in 0..count {
        index.append(sample_fields(i)).unwrap();
    }
    index
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    group.throughput(Throughput::Elements(1));

    for scope in [ValueScope::Global, ValueScope::FieldScoped] {
        group.bench_function(format!("append_{}", scope), |b| {
            let index = FormIndex::with_config(
                IndexConfig { value_scope: scope },
                Arc::new(SequentialIds::default()),
            );
            let mut i = 0;
            b.iter(|| {
                index.append(black_box(sample_fields(i))).unwrap();
                i += 1;
            })
        });
    }

    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");

    for size in [1_000, 10_000, 100_000] {
        let index = populated_index(size, ValueScope::Global);

        let single = FormQuery::new().value("color", "red");
        let intersect = FormQuery::new()
            .value("color", "red")
            .value("size", "M")
            .field("note");
        let empty = FormQuery::new();

        group.bench_with_input(BenchmarkId::new("single_term", size), &single, |b, q| {
            b.iter(|| index.find(black_box(q)))
        });

        group.bench_with_input(BenchmarkId::new("three_terms", size), &intersect, |b, q| {
            b.iter(|| index.find(black_box(q)))
        });

        group.bench_with_input(BenchmarkId::new("list_all", size), &empty, |b, q| {
            b.iter(|| index.find(black_box(q)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_append, bench_find);
criterion_main!(benches);
