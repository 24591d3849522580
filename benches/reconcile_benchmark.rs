//! Benchmarks for the reconciliation engines.
//!
//! Run with: cargo bench --bench reconcile_benchmark

use bom_reconciler::{classify, consolidate, merge, normalize, ComponentRecord, RuleTable};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

/// Generate a component list with the specified number of components.
fn generate_records(prefix: &str, count: usize) -> Vec<ComponentRecord> {
    (0..count)
        .map(|i| {
            ComponentRecord::new(
                format!("{prefix}-component-{i}"),
                format!("1.{}.{}", i % 10, i % 100),
            )
        })
        .collect()
}

/// Generate two related lists with some components changed.
fn generate_pair(size: usize, change_percent: usize) -> (Vec<ComponentRecord>, Vec<ComponentRecord>) {
    let old = generate_records("lib", size);
    let changes = size * change_percent / 100;

    let mut new: Vec<ComponentRecord> = old[..size - changes].to_vec();
    for record in &old[size - changes..] {
        new.push(ComponentRecord::new(record.name.clone(), "2.0.0"));
    }
    new.extend(generate_records("added", changes));

    (old, new)
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for size in [100, 1_000, 10_000] {
        let (old, new) = generate_pair(size, 10);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(classify(black_box(&old), black_box(&new))));
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for size in [1_000, 10_000] {
        let (first, second) = generate_pair(size, 50);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(merge(black_box(&first), black_box(&second))));
        });
    }
    group.finish();
}

fn bench_consolidate(c: &mut Criterion) {
    let Ok(rules) = RuleTable::bundled() else {
        return;
    };
    let names: Vec<&str> = rules.rules().iter().map(|r| r.component_name.as_str()).collect();
    let records: Vec<ComponentRecord> = (0..10_000)
        .map(|i| ComponentRecord::new(names[i % names.len()], format!("1.0.{}", i % 7)))
        .collect();

    c.bench_function("consolidate_10000_components", |b| {
        b.iter(|| black_box(consolidate(black_box(&records), &rules)));
    });
}

fn bench_normalize(c: &mut Criterion) {
    let inputs = ["2.6.3", "v1.1.1.RELEASE", "1_27_1_1", "pre_pr_153572", "1.06", "4.0.0-rc.1"];
    c.bench_function("normalize_mixed", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(normalize(black_box(input)));
            }
        });
    });
}

criterion_group!(benches, bench_classify, bench_merge, bench_consolidate, bench_normalize);
criterion_main!(benches);
