//! Benchmark for lazy pipelines: construction, collection and branching.
//!
//! Compares chains of synchronous steps against chains with pending steps,
//! and a directly evaluated `Outcome` chain as the baseline.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use railway::control::Outcome;
use railway::lazy::{LazyMaybe, LazyOutcome};
use std::hint::black_box;

fn sync_chain(length: usize) -> LazyOutcome<u64, String> {
    (0..length).fold(LazyOutcome::ok(1), |pipeline, _| {
        pipeline.map(|value| value.wrapping_mul(3))
    })
}

fn async_chain(length: usize) -> LazyOutcome<u64, String> {
    (0..length).fold(LazyOutcome::ok(1), |pipeline, _| {
        pipeline.map_async(|value| async move { value.wrapping_mul(3) })
    })
}

// =============================================================================
// Construction
// =============================================================================

fn benchmark_build(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("pipeline_build");

    for length in [1, 10, 100] {
        group.bench_with_input(BenchmarkId::new("map", length), &length, |bencher, &length| {
            bencher.iter(|| black_box(sync_chain(length)));
        });
    }

    group.finish();
}

// =============================================================================
// Collection
// =============================================================================

fn benchmark_collect(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("pipeline_collect");

    let runtime = tokio::runtime::Runtime::new().unwrap();

    for length in [1, 10, 100] {
        let ready = sync_chain(length);
        group.bench_with_input(BenchmarkId::new("sync", length), &length, |bencher, _| {
            bencher.iter(|| black_box(runtime.block_on(ready.collect())));
        });

        let pending = async_chain(length);
        group.bench_with_input(BenchmarkId::new("async", length), &length, |bencher, _| {
            bencher.iter(|| black_box(runtime.block_on(pending.collect())));
        });

        group.bench_with_input(BenchmarkId::new("eager", length), &length, |bencher, &length| {
            bencher.iter(|| {
                let outcome = (0..length).fold(Outcome::<u64, String>::Ok(1), |outcome, _| {
                    outcome.map(|value| value.wrapping_mul(3))
                });
                black_box(outcome)
            });
        });
    }

    group.finish();
}

fn benchmark_short_circuit(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("pipeline_short_circuit");

    let runtime = tokio::runtime::Runtime::new().unwrap();

    let failed = (0..100).fold(LazyOutcome::<u64, String>::err("early".to_string()), |pipeline, _| {
        pipeline.map_async(|value| async move { value + 1 })
    });
    group.bench_function("err_skips_100", |bencher| {
        bencher.iter(|| black_box(runtime.block_on(failed.collect())));
    });

    let absent = (0..100).fold(LazyMaybe::<u64>::nothing(), |pipeline, _| {
        pipeline.filter(|value| *value > 0)
    });
    group.bench_function("nothing_skips_100", |bencher| {
        bencher.iter(|| black_box(runtime.block_on(absent.collect())));
    });

    group.finish();
}

// =============================================================================
// Branching
// =============================================================================

fn benchmark_branch(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("pipeline_branch");

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let base = sync_chain(50);

    group.bench_function("branch_and_collect", |bencher| {
        bencher.iter(|| {
            let left = base.map(|value| value + 1);
            let right = base.and_then(|value| Outcome::Ok(value ^ 7));
            black_box(runtime.block_on(async { (left.collect().await, right.collect().await) }))
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_build,
    benchmark_collect,
    benchmark_short_circuit,
    benchmark_branch
);

criterion_main!(benches);
