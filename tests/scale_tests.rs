use approx::{assert_abs_diff_eq, assert_relative_eq};
use chrono::Datelike;
use story_charts::core::primitives::parse_date;
use story_charts::core::ticks::{nice_domain, ticks};
use story_charts::core::{
    BandScale, LinearScale, OrdinalScale, PathCommand, Point, TimeScale, cardinal_path,
    stack_series, stack_totals,
};
use story_charts::data::{CityName, city_temperature, stock_closes};

#[test]
fn linear_scale_round_trips_inside_nice_domain() {
    let scale = LinearScale::new((0.0, 200.1), (360.0, 0.0))
        .expect("scale")
        .nice(10);
    assert_eq!(scale.domain(), (0.0, 220.0));

    for value in [0.0, 12.5, 63.4, 198.3, 220.0] {
        let pixel = scale.apply(value).expect("apply");
        let back = scale.invert(pixel).expect("invert");
        assert_relative_eq!(back, value, max_relative = 1e-12);
    }
    assert_abs_diff_eq!(scale.apply(110.0).expect("apply"), 180.0, epsilon = 1e-9);
}

#[test]
fn rounded_linear_scale_snaps_to_whole_pixels() {
    let scale = LinearScale::new((0.0, 3.0), (0.0, 10.0))
        .expect("scale")
        .rounded();
    assert_eq!(scale.apply(1.0).expect("apply"), 3.0);
    assert_eq!(scale.apply(2.0).expect("apply"), 7.0);
}

#[test]
fn ticks_follow_one_two_five_steps() {
    assert_eq!(ticks(0.0, 100.0, 5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    assert_eq!(ticks(0.0, 1.0, 2), vec![0.0, 0.5, 1.0]);
    assert_eq!(ticks(10.0, 0.0, 2), vec![10.0, 5.0, 0.0]);
    assert!(ticks(0.0, 1.0, 0).is_empty());
    assert_eq!(nice_domain(0.0, 362.19, 10), (0.0, 400.0));
}

#[test]
fn band_scale_covers_every_city_row() {
    let rows = city_temperature().expect("dataset");
    let scale = BandScale::new(rows.iter().map(|row| row.date_key.clone()), (0.0, 800.0))
        .expect("scale")
        .with_padding(0.2)
        .expect("padding")
        .rounded();

    assert_eq!(scale.len(), rows.len());
    let last = scale.position_at(rows.len() - 1);
    assert!(last + scale.bandwidth() <= 800.0);
    assert!(scale.position_at(0) >= 0.0);
}

#[test]
fn time_scale_round_trips_stock_extent() {
    let series = stock_closes().expect("dataset");
    let scale = TimeScale::from_extent(series.points(), (0.0, 800.0)).expect("scale");

    let first = series.first().expect("first").date;
    let last = series.last().expect("last").date;
    assert_abs_diff_eq!(scale.apply(first), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(scale.apply(last), 800.0, epsilon = 1e-9);
    assert_eq!(scale.invert(0.0).expect("invert"), first);
    assert_eq!(scale.invert(800.0).expect("invert"), last);
}

#[test]
fn time_ticks_land_on_month_starts_inside_domain() {
    let series = stock_closes().expect("dataset");
    let scale = TimeScale::from_extent(series.points(), (0.0, 800.0)).expect("scale");
    let (start, end) = scale.domain();

    let ticks = scale.ticks(10);
    assert!(!ticks.is_empty());
    assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
    for tick in ticks {
        assert!(tick >= start && tick <= end);
        assert_eq!(tick.day(), 1);
    }
}

#[test]
fn zero_length_time_domain_is_widened() {
    let day = parse_date("2011-10-01").expect("date");
    let scale = TimeScale::new((day, day), (0.0, 100.0)).expect("scale");
    assert_abs_diff_eq!(scale.apply(day), 50.0, epsilon = 1e-9);
}

#[test]
fn city_stack_tops_match_row_totals() {
    let rows = city_temperature().expect("dataset");
    let layers = stack_series(rows, CityName::ALL.as_slice(), |row, city| {
        row.temperature_f64(*city).unwrap_or(f64::NAN)
    })
    .expect("stack");

    assert_eq!(layers.len(), CityName::ALL.len());
    let totals = stack_totals(&layers, rows.len());
    for (row, total) in rows.iter().zip(totals) {
        assert_relative_eq!(total, row.total().expect("total"), max_relative = 1e-12);
    }
    assert_relative_eq!(layers[0].segments[0].value(), 63.4, max_relative = 1e-12);
}

#[test]
fn ordinal_scale_cycles_its_range() {
    let scale = OrdinalScale::new(["a", "b", "c"], vec![1, 2]).expect("scale");
    assert_eq!(scale.get("a"), Some(&1));
    assert_eq!(scale.get("c"), Some(&1));
    assert_eq!(scale.get("z"), None);
    assert!(OrdinalScale::<u8>::new(["a"], Vec::new()).is_err());
}

#[test]
fn cardinal_path_passes_through_every_point() {
    let points: Vec<Point> = (0..6)
        .map(|i| Point::new(f64::from(i) * 10.0, f64::from(i * i)))
        .collect();
    let commands = cardinal_path(&points, 0.0);

    assert_eq!(commands.len(), points.len());
    assert_eq!(commands[0], PathCommand::MoveTo(points[0]));
    for (command, point) in commands.iter().zip(&points) {
        assert_eq!(command.end_point(), *point);
    }
}
