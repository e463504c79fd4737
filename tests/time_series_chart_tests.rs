use story_charts::api::{ChartProps, TimeSeriesChart};
use story_charts::core::{OrderedSeries, locate_index};
use story_charts::data::{StockQuote, stock_closes};
use story_charts::interaction::{PointerInput, TooltipState};
use story_charts::render::{LineStrokeStyle, NullRenderer, Renderer};

fn standard_chart() -> TimeSeriesChart {
    TimeSeriesChart::new(ChartProps::new(800.0, 500.0)).expect("chart init")
}

#[test]
fn layout_uses_padded_nice_value_domain() {
    let chart = standard_chart();
    let layout = chart.layout().expect("layout").expect("renderable");

    assert_eq!(layout.y_scale.domain(), (0.0, 550.0));
    assert_eq!(layout.y_scale.range(), (360.0, 0.0));
    assert_eq!(layout.x_scale.range(), (0.0, 800.0));
    assert_eq!(layout.line.len(), chart.series().len());
    assert!((layout.line[0].x - 0.0).abs() <= 1e-9);
    assert!((layout.line[layout.line.len() - 1].x - 800.0).abs() <= 1e-9);
}

#[test]
fn pointer_move_shows_nearest_quote() {
    let mut chart = standard_chart();
    chart
        .on_pointer(PointerInput::Move { x: 400.0, y: 200.0 })
        .expect("pointer move");

    let layout = chart.layout().expect("layout").expect("renderable");
    let target = layout.x_scale.invert(400.0).expect("invert");
    let expected = locate_index(chart.series(), target).expect("locate");

    let TooltipState::Shown { data, left, top } = chart.tooltip() else {
        panic!("tooltip should be shown");
    };
    assert_eq!(data.index, expected);
    assert!((*left - 400.0).abs() <= 1e-9);
    let expected_top = layout.y_scale.apply(data.point.close).expect("project close");
    assert!((*top - expected_top).abs() <= 1e-9);
}

#[test]
fn touch_events_drive_the_same_tooltip() {
    let mut chart = standard_chart();
    chart
        .on_pointer(PointerInput::TouchStart { x: 0.0, y: 100.0 })
        .expect("touch start");
    assert_eq!(chart.tooltip().data().map(|located| located.index), Some(0));

    chart
        .on_pointer(PointerInput::TouchMove { x: 800.0, y: 100.0 })
        .expect("touch move");
    let last = chart.series().len() - 1;
    assert_eq!(chart.tooltip().data().map(|located| located.index), Some(last));
}

#[test]
fn leaving_or_moving_outside_hit_area_hides() {
    let mut chart = standard_chart();
    chart
        .on_pointer(PointerInput::Move { x: 400.0, y: 200.0 })
        .expect("pointer move");
    assert!(chart.tooltip().is_open());

    chart
        .on_pointer(PointerInput::Move { x: 400.0, y: 10.0 })
        .expect("pointer above hit area");
    assert!(!chart.tooltip().is_open());

    chart
        .on_pointer(PointerInput::Move { x: 400.0, y: 200.0 })
        .expect("pointer move");
    chart.on_pointer(PointerInput::Leave).expect("leave");
    assert_eq!(chart.tooltip(), &TooltipState::Hidden);
}

#[test]
fn shown_tooltip_adds_guide_markers_and_labels() {
    let mut chart = standard_chart();
    let idle = chart.render_frame().expect("render").expect("frame");
    assert_eq!(idle.circles().count(), 0);
    assert_eq!(idle.paths().count(), 1);

    chart
        .on_pointer(PointerInput::Move { x: 400.0, y: 200.0 })
        .expect("pointer move");
    let frame = chart.render_frame().expect("render").expect("frame");

    assert_eq!(frame.circles().count(), 2);
    let guide = frame
        .lines()
        .find(|line| matches!(line.stroke_style, LineStrokeStyle::Dashed { .. }))
        .expect("dashed guide");
    assert!((guide.x1 - 400.0).abs() <= 1e-9);
    assert!((guide.y1 - 40.0).abs() <= 1e-9);
    assert!((guide.y2 - 420.0).abs() <= 1e-9);
    assert_eq!(
        guide.stroke_style,
        LineStrokeStyle::Dashed { dash: 5.0, gap: 2.0 }
    );

    let texts: Vec<&str> = frame.texts().map(|text| text.text.as_str()).collect();
    assert!(texts.iter().any(|text| text.starts_with('$')));

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("frame should validate");
}

#[test]
fn narrow_width_suppresses_render_and_tooltip() {
    let mut chart = TimeSeriesChart::new(ChartProps::new(5.0, 500.0)).expect("chart init");
    assert!(chart.render_frame().expect("render").is_none());
    chart
        .on_pointer(PointerInput::Move { x: 2.0, y: 100.0 })
        .expect("pointer move");
    assert!(!chart.tooltip().is_open());
}

#[test]
fn empty_series_is_rejected() {
    let empty: OrderedSeries<StockQuote> = OrderedSeries::from_sorted(Vec::new());
    assert!(TimeSeriesChart::with_series(ChartProps::new(800.0, 500.0), empty).is_err());
    assert!(stock_closes().expect("sample").len() > 100);
}
