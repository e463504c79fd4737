use chrono::{TimeDelta, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use story_charts::api::{BarStackChart, ChartProps, TimeSeriesChart};
use story_charts::core::{LinearScale, OrderedSeries, TimeScale, TimeSeriesPoint, locate_index};
use story_charts::interaction::PointerInput;
use story_charts::render::{NullRenderer, Renderer, SvgRenderer};

fn generated_series(len: usize) -> OrderedSeries<TimeSeriesPoint> {
    let start = Utc
        .with_ymd_and_hms(2010, 1, 1, 0, 0, 0)
        .single()
        .expect("valid start");
    let points = (0..len)
        .map(|i| {
            let offset = i64::try_from(i).expect("index fits i64");
            TimeSeriesPoint::new(start + TimeDelta::hours(offset), 100.0 + (i % 97) as f64)
        })
        .collect();
    OrderedSeries::try_new(points).expect("ordered series")
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new((0.0, 10_000.0), (1080.0, 0.0))
        .expect("valid scale")
        .nice(10);

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.apply(black_box(4_321.123)).expect("to pixel");
            let _ = scale.invert(px).expect("from pixel");
        })
    });
}

fn bench_locate_100k(c: &mut Criterion) {
    let series = generated_series(100_000);
    let scale = TimeScale::from_extent(series.points(), (0.0, 1920.0)).expect("time scale");

    c.bench_function("locate_100k", |b| {
        b.iter(|| {
            let target = scale.invert(black_box(1_234.5)).expect("invert");
            let _ = locate_index(black_box(series.points()), target).expect("locate");
        })
    });
}

fn bench_bar_stack_frame(c: &mut Criterion) {
    let mut chart = BarStackChart::new(ChartProps::new(1600.0, 900.0)).expect("chart init");
    chart
        .on_pointer(PointerInput::Move { x: 120.0, y: 600.0 })
        .expect("pointer move");
    let mut renderer = NullRenderer::default();

    c.bench_function("bar_stack_frame", |b| {
        b.iter(|| {
            let frame = chart.render_frame().expect("render").expect("frame");
            renderer.render(black_box(&frame)).expect("null render");
        })
    });
}

fn bench_time_series_hover_svg(c: &mut Criterion) {
    let mut chart = TimeSeriesChart::new(ChartProps::new(1600.0, 900.0)).expect("chart init");
    let mut renderer = SvgRenderer::new();

    c.bench_function("time_series_hover_svg", |b| {
        let mut x = 0.0;
        b.iter(|| {
            x = (x + 37.0) % 1600.0;
            chart
                .on_pointer(PointerInput::Move { x, y: 400.0 })
                .expect("pointer move");
            let frame = chart.render_frame().expect("render").expect("frame");
            renderer.render(black_box(&frame)).expect("svg render");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_locate_100k,
    bench_bar_stack_frame,
    bench_time_series_hover_svg
);
criterion_main!(benches);
