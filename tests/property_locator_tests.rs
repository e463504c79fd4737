use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use story_charts::core::{TimeSeriesPoint, locate_index};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
        .single()
        .expect("valid base time")
}

fn build_series(gaps: &[i64]) -> Vec<TimeSeriesPoint> {
    let mut time = base_time();
    gaps.iter()
        .enumerate()
        .map(|(index, gap)| {
            time += TimeDelta::seconds(*gap);
            TimeSeriesPoint::new(time, index as f64)
        })
        .collect()
}

fn abs_delta(a: DateTime<Utc>, b: DateTime<Utc>) -> TimeDelta {
    (a - b).abs()
}

proptest! {
    #[test]
    fn result_is_a_nearest_point(
        gaps in prop::collection::vec(0i64..10_000, 1..64),
        offset in -20_000i64..700_000
    ) {
        let series = build_series(&gaps);
        let target = base_time() + TimeDelta::seconds(offset);
        let index = locate_index(&series, target).expect("non-empty series");

        prop_assert!(index < series.len());
        let chosen = abs_delta(series[index].timestamp, target);
        for point in &series {
            prop_assert!(chosen <= abs_delta(point.timestamp, target));
        }
    }

    #[test]
    fn targets_outside_the_extent_clamp(
        gaps in prop::collection::vec(1i64..10_000, 1..64),
        outside in 1i64..1_000_000
    ) {
        let series = build_series(&gaps);
        let first = series[0].timestamp;
        let last = series[series.len() - 1].timestamp;

        let before = locate_index(&series, first - TimeDelta::seconds(outside)).expect("locate");
        let after = locate_index(&series, last + TimeDelta::seconds(outside)).expect("locate");
        prop_assert_eq!(before, 0);
        prop_assert_eq!(after, series.len() - 1);
    }

    #[test]
    fn exact_midpoint_prefers_later_neighbour(
        gaps in prop::collection::vec(1i64..5_000, 2..32),
        pick in 0usize..31
    ) {
        let doubled: Vec<i64> = gaps.iter().map(|gap| gap * 2).collect();
        let series = build_series(&doubled);
        let k = pick % (series.len() - 1);
        let midpoint = series[k].timestamp + (series[k + 1].timestamp - series[k].timestamp) / 2;

        prop_assert_eq!(locate_index(&series, midpoint).expect("locate"), k + 1);
    }

    #[test]
    fn exact_timestamps_return_their_index(
        gaps in prop::collection::vec(1i64..10_000, 1..64),
        pick in 0usize..63
    ) {
        let series = build_series(&gaps);
        let k = pick % series.len();
        prop_assert_eq!(locate_index(&series, series[k].timestamp).expect("locate"), k);
    }
}
