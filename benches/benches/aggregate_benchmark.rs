//! Candle aggregation benchmarks.
//!
//! Run with: `cargo bench --package kline-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use kline_bench::{SeriesConfig, flux_csv, synthetic_ticks};
use kline_lib::{CandleAggregator, CsvFormatter, Formatter, Interval, RowLayout, normalize_csv};
use std::hint::black_box;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn series(ticks: usize) -> SeriesConfig {
    SeriesConfig {
        ticks,
        ..Default::default()
    }
}

fn aggregate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in SIZES {
        let ticks = synthetic_ticks(&series(size));
        group.throughput(Throughput::Elements(size as u64));

        for interval in [Interval::Minute1, Interval::Hour1] {
            let aggregator = CandleAggregator::new(interval);
            group.bench_with_input(
                BenchmarkId::new(interval.as_str(), size),
                &ticks,
                |b, ticks| b.iter(|| aggregator.aggregate(black_box(ticks.clone()))),
            );
        }
    }

    group.finish();
}

fn normalize_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let layout = RowLayout::flux();

    for size in SIZES {
        let text = flux_csv(&synthetic_ticks(&series(size)));
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("flux", size), &text, |b, text| {
            b.iter(|| normalize_csv(black_box(text), &layout));
        });
    }

    group.finish();
}

fn pipeline_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let aggregator = CandleAggregator::new(Interval::Minute5);
    let formatter = CsvFormatter::new();

    for size in SIZES {
        let text = flux_csv(&synthetic_ticks(&series(size)));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("csv-to-csv", size), &text, |b, text| {
            b.iter(|| {
                let candles = aggregator.aggregate_csv(black_box(text));
                let mut out = Vec::with_capacity(candles.len() * 64);
                formatter
                    .write_candles(&candles, &mut out)
                    .expect("write to Vec");
                out
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    aggregate_benchmark,
    normalize_benchmark,
    pipeline_benchmark
);
criterion_main!(benches);
