//! Forecast engine benchmarks.
//!
//! Measures a full engine invocation (dataset construction, forest
//! training, held-out evaluation, iterative rollout) at a few history
//! lengths and ensemble sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use aircast::forecast::{EngineConfigBuilder, ForecastEngine};
use aircast::series::Series;

/// Create a synthetic AQI-like history: slow trend plus a daily-ish cycle.
fn create_history(n_points: usize) -> Series {
    let values: Vec<f64> = (0..n_points)
        .map(|i| {
            let t = i as f64;
            60.0 + 0.05 * t + 15.0 * (t * std::f64::consts::TAU / 24.0).sin()
        })
        .collect();
    Series::new(values, Some("aqi".to_string())).unwrap()
}

fn bench_forecast(c: &mut Criterion) {
    let mut group = c.benchmark_group("forecast");
    group.sample_size(10);

    for &n_points in &[48usize, 96, 168] {
        let series = create_history(n_points);
        let engine = ForecastEngine::new(
            EngineConfigBuilder::new()
                .n_estimators(50)
                .random_seed(42)
                .build(),
        );

        group.bench_with_input(
            BenchmarkId::new("history_len", n_points),
            &series,
            |b, series| b.iter(|| engine.forecast(series, 24, 24).unwrap()),
        );
    }

    group.finish();
}

fn bench_ensemble_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("ensemble_size");
    group.sample_size(10);

    let series = create_history(96);
    for &n_estimators in &[10usize, 50, 200] {
        let engine = ForecastEngine::new(
            EngineConfigBuilder::new()
                .n_estimators(n_estimators)
                .random_seed(42)
                .build(),
        );

        group.bench_with_input(
            BenchmarkId::new("n_estimators", n_estimators),
            &series,
            |b, series| b.iter(|| engine.forecast(series, 24, 12).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_forecast, bench_ensemble_size);
criterion_main!(benches);
