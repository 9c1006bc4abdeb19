//! Benchmark for the tagged JSON codec.
//!
//! Measures typed encoding and decoding against plain `serde_json` values,
//! and dynamic decoding of whole documents.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use railway::codec;
use railway::control::{Maybe, Outcome};
use std::hint::black_box;

fn outcomes(size: usize) -> Vec<Outcome<Maybe<u64>, String>> {
    (0..size as u64)
        .map(|index| match index % 3 {
            0 => Outcome::Ok(Maybe::Some(index)),
            1 => Outcome::Ok(Maybe::Nothing),
            _ => Outcome::Err(format!("failed at {index}")),
        })
        .collect()
}

// =============================================================================
// Typed
// =============================================================================

fn benchmark_encode(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("codec_encode");

    for size in [100, 1000, 10000] {
        let tagged = outcomes(size);
        let plain: Vec<Result<Option<u64>, String>> = tagged
            .iter()
            .cloned()
            .map(|outcome| outcome.map(Maybe::into_option).into_result())
            .collect();

        group.bench_with_input(BenchmarkId::new("tagged", size), &size, |bencher, _| {
            bencher.iter(|| black_box(codec::to_string(&tagged).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("std", size), &size, |bencher, _| {
            bencher.iter(|| black_box(serde_json::to_string(&plain).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_decode(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("codec_decode");

    for size in [100, 1000, 10000] {
        let text = codec::to_string(&outcomes(size)).unwrap();

        group.bench_with_input(BenchmarkId::new("typed", size), &text, |bencher, text| {
            bencher.iter(|| {
                let decoded: Vec<Outcome<Maybe<u64>, String>> = codec::from_str(text).unwrap();
                black_box(decoded)
            });
        });

        group.bench_with_input(BenchmarkId::new("dynamic", size), &text, |bencher, text| {
            bencher.iter(|| black_box(codec::decode_str(text).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_encode, benchmark_decode);

criterion_main!(benches);
