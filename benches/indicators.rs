#[path = "../tests/fixtures/mod.rs"]
mod fixtures;

use crate::fixtures::reference_context;

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use quantedge_core::{
    AroonOscillator, ChoppinessIndex, CommodityChannelIndex, Context, IchimokuCloud,
    JmaRsxClone, MovingAverage, PriceSource, StochasticOscillator, Trix, UlcerIndex, WilliamsR,
    moving_average, rolling_max_min, rolling_sum,
};
use std::{hint::black_box, num::NonZero, time::Duration};

fn nz(n: usize) -> NonZero<usize> {
    NonZero::new(n).expect("non zero value")
}

fn moving_average_benchmarks(c: &mut Criterion) {
    let ctx = reference_context();
    let close = ctx.series(PriceSource::Close);
    let mut group = c.benchmark_group("moving_average");
    group.throughput(Throughput::Elements(close.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    macro_rules! ma_bench {
        ($name:expr, $kind:expr, $length:expr) => {
            group.bench_function($name, |b| {
                b.iter(|| black_box(moving_average($kind, nz($length), black_box(close))));
            });
        };
    }

    ma_bench!("sma20", MovingAverage::Simple, 20);
    ma_bench!("sma200", MovingAverage::Simple, 200);
    ma_bench!("wma20", MovingAverage::Weighted, 20);
    ma_bench!("hma20", MovingAverage::Hull, 20);
    ma_bench!("ema20", MovingAverage::Exponential, 20);
    ma_bench!("tema20", MovingAverage::TripleExponential, 20);
    ma_bench!("t3_20", MovingAverage::t3(), 20);
    ma_bench!("kama10", MovingAverage::kaufman_adaptive(), 10);
    ma_bench!("vidya14", MovingAverage::VariableIndexDynamic, 14);
    ma_bench!("jma14", MovingAverage::jurik(), 14);

    group.finish();
}

fn window_benchmarks(c: &mut Criterion) {
    let ctx = reference_context();
    let close = ctx.series(PriceSource::Close);
    let mut group = c.benchmark_group("window");
    group.throughput(Throughput::Elements(close.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    for length in [20, 200] {
        group.bench_function(format!("max_min{length}"), |b| {
            b.iter(|| black_box(rolling_max_min(black_box(close), nz(length))));
        });
        group.bench_function(format!("sum{length}"), |b| {
            b.iter(|| black_box(rolling_sum(black_box(close), nz(length))));
        });
    }

    group.finish();
}

fn indicator_benchmarks(c: &mut Criterion) {
    let ctx = reference_context();
    let mut group = c.benchmark_group("indicator");
    group.throughput(Throughput::Elements(ctx.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    macro_rules! indicator_bench {
        ($name:expr, $ind:expr) => {
            group.bench_function($name, |b| {
                let ind = $ind;
                b.iter(|| black_box(ind.calculate(black_box(&ctx))));
            });
        };
    }

    indicator_bench!("cci20", CommodityChannelIndex::default());
    indicator_bench!("williams14", WilliamsR::default());
    indicator_bench!("stochastic14", StochasticOscillator::default());
    indicator_bench!("ulcer14", UlcerIndex::default());
    indicator_bench!("choppiness14", ChoppinessIndex::default());
    indicator_bench!("aroon25", AroonOscillator::default());
    indicator_bench!("trix15", Trix::default());
    indicator_bench!("ichimoku", IchimokuCloud::default());
    indicator_bench!("rsx14", JmaRsxClone::default());

    group.finish();
}

fn pipeline_benchmarks(c: &mut Criterion) {
    let ctx = reference_context();
    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(ctx.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    // Williams %R smoothed by TRIX through the custom source.
    let trix = Trix::new(quantedge_core::TrixConfig::default().with_source(PriceSource::Custom));
    group.bench_function("williams_then_trix", |b| {
        b.iter_batched(
            || ctx.clone(),
            |mut ctx: Context| {
                ctx.apply(&WilliamsR::default()).apply(&trix);
                black_box(ctx)
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    moving_average_benchmarks,
    window_benchmarks,
    indicator_benchmarks,
    pipeline_benchmarks
);
criterion_main!(benches);
