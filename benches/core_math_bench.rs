use chart2d_core::api::{AccumulationConfig, ChartEngine, ChartEngineConfig};
use chart2d_core::core::{
    AccumulationFunctionKind, AccumulationStrategy, ArithmeticMean, AxisDimension, AxisScaler,
    DataPoint, NumberLabelFormatter, Range, ScaledPoint, Viewport, ViewportClipper, wrap,
};
use chart2d_core::render::NullRenderer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn wave(count: usize) -> Vec<DataPoint> {
    (0..count)
        .map(|i| {
            let x = i as f64;
            DataPoint::new(x, (x * 0.01).sin() * 100.0)
        })
        .collect()
}

fn bench_axis_ticks(c: &mut Criterion) {
    let scaler = AxisScaler::new(AxisDimension::X)
        .with_formatter(Box::new(NumberLabelFormatter::new(1).expect("valid digits")));

    c.bench_function("axis_ticks_1920px", |b| {
        b.iter(|| {
            let ticks = scaler.compute_ticks(black_box(Range::new(-1_234.5, 98_765.4)), 1_920.0);
            black_box(ticks.labels.len())
        })
    });
}

fn bench_clip_100k(c: &mut Criterion) {
    let points: Vec<ScaledPoint> = (0..100_000)
        .map(|i| {
            let t = i as f64 * 0.001;
            ScaledPoint::new(t.sin() * 1.5 + 0.5, t.cos() * 1.5 + 0.5)
        })
        .collect();

    c.bench_function("clip_100k", |b| {
        b.iter(|| {
            let mut previous = None;
            let mut segments = 0_usize;
            for &point in &points {
                let outcome = ViewportClipper.clip(previous, point);
                segments += usize::from(outcome.segment.is_some());
                previous = Some(outcome.carry);
            }
            black_box(segments)
        })
    });
}

fn bench_accumulate_100k(c: &mut Criterion) {
    let points = wave(100_000);

    c.bench_function("accumulate_mean_100k_to_1k", |b| {
        b.iter(|| {
            wrap(
                points.iter().copied(),
                1_000,
                points.len(),
                ArithmeticMean::default(),
            )
            .count()
        })
    });
}

fn bench_engine_frame_100k(c: &mut Criterion) {
    let config = ChartEngineConfig::new(Viewport::new(1920, 1080)).with_accumulation(
        AccumulationConfig {
            strategy: AccumulationStrategy::AccumulateXRangeWithRespectToDensity,
            function: AccumulationFunctionKind::MaxY,
            target_points: None,
        },
    );
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_trace("wave", wave(100_000));

    c.bench_function("engine_frame_100k", |b| {
        b.iter(|| black_box(engine.build_frame().frame.segments.len()))
    });
}

criterion_group!(
    benches,
    bench_axis_ticks,
    bench_clip_100k,
    bench_accumulate_100k,
    bench_engine_frame_100k
);
criterion_main!(benches);
