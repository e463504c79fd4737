use chrono::{DateTime, TimeZone, Utc};
use story_charts::core::primitives::parse_date;
use story_charts::core::{
    OrderedSeries, PointerSample, TimeScale, TimeSeriesPoint, bisect_left, locate, locate_index,
    locate_pixel,
};
use story_charts::error::ChartError;

fn date(raw: &str) -> DateTime<Utc> {
    parse_date(raw).expect("valid date")
}

fn january_series() -> Vec<TimeSeriesPoint> {
    vec![
        TimeSeriesPoint::new(date("2023-01-01"), 10.0),
        TimeSeriesPoint::new(date("2023-01-03"), 20.0),
        TimeSeriesPoint::new(date("2023-01-10"), 30.0),
    ]
}

#[test]
fn equidistant_target_prefers_later_point() {
    let series = january_series();
    let result = locate(&series, date("2023-01-02")).expect("locate");
    assert_eq!(result.index, 1);
    assert_eq!(result.point.value, 20.0);
}

#[test]
fn exact_match_returns_that_point() {
    let series = january_series();
    let result = locate(&series, date("2023-01-01")).expect("locate");
    assert_eq!(result.index, 0);
    assert_eq!(result.point.value, 10.0);
}

#[test]
fn target_before_first_point_clamps_to_start() {
    let series = january_series();
    let result = locate(&series, date("2022-12-01")).expect("locate");
    assert_eq!(result.index, 0);
    assert_eq!(result.point.value, 10.0);
}

#[test]
fn target_after_last_point_clamps_to_end() {
    let series = january_series();
    let result = locate(&series, date("2024-01-01")).expect("locate");
    assert_eq!(result.index, 2);
    assert_eq!(result.point.value, 30.0);
}

#[test]
fn empty_series_is_invalid_input() {
    let series: Vec<TimeSeriesPoint> = Vec::new();
    let err = locate(&series, date("2023-01-02")).expect_err("empty series must fail");
    assert!(matches!(err, ChartError::InvalidInput(_)));
}

#[test]
fn single_point_series_always_resolves_to_it() {
    let series = vec![TimeSeriesPoint::new(date("2023-01-05"), 7.0)];
    for target in ["2020-01-01", "2023-01-05", "2030-01-01"] {
        assert_eq!(locate_index(&series, date(target)).expect("locate"), 0);
    }
}

#[test]
fn closer_neighbour_wins_off_midpoint() {
    let series = january_series();
    let near_earlier = Utc.with_ymd_and_hms(2023, 1, 4, 0, 0, 0).single().expect("date");
    let near_later = Utc.with_ymd_and_hms(2023, 1, 8, 0, 0, 0).single().expect("date");
    assert_eq!(locate_index(&series, near_earlier).expect("locate"), 1);
    assert_eq!(locate_index(&series, near_later).expect("locate"), 2);
}

#[test]
fn duplicate_timestamps_resolve_to_first_occurrence() {
    let series = vec![
        TimeSeriesPoint::new(date("2023-01-01"), 1.0),
        TimeSeriesPoint::new(date("2023-01-02"), 2.0),
        TimeSeriesPoint::new(date("2023-01-02"), 3.0),
        TimeSeriesPoint::new(date("2023-01-03"), 4.0),
    ];
    assert_eq!(bisect_left(&series, date("2023-01-02")), 1);
    assert_eq!(locate_index(&series, date("2023-01-02")).expect("locate"), 1);
}

#[test]
fn repeated_lookups_are_deterministic() {
    let series = january_series();
    let target = date("2023-01-06");
    let first = locate(&series, target).expect("locate");
    for _ in 0..10 {
        assert_eq!(locate(&series, target).expect("locate"), first);
    }
}

#[test]
fn pixel_lookup_inverts_through_time_scale() {
    let series = OrderedSeries::try_new(january_series()).expect("sorted");
    let scale = TimeScale::from_extent(&series, (0.0, 900.0)).expect("scale");

    let x = scale.apply(date("2023-01-03"));
    let result = locate_pixel(&series, &scale, x).expect("locate");
    assert_eq!(result.index, 1);

    let sample = PointerSample::from_pixel(&scale, 900.0).expect("sample");
    assert_eq!(sample.x_domain_value, date("2023-01-10"));
}

#[test]
fn unsorted_input_is_rejected_at_construction() {
    let mut points = january_series();
    points.swap(0, 2);
    let err = OrderedSeries::try_new(points).expect_err("unsorted must fail");
    assert!(matches!(err, ChartError::InvalidInput(_)));
}
