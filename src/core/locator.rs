//! Nearest-point lookup over a time-ordered series.
//!
//! Every lookup is a bisect-left over the timestamps followed by a comparison
//! of the two neighbours around the insertion index, so a call costs
//! `O(log n)` and never allocates.
//!
//! The series must be sorted ascending by timestamp. `locate` does not check
//! this; unsorted input yields an unspecified (but in-bounds) index.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::series::Timestamped;
use crate::core::time_scale::TimeScale;
use crate::error::{ChartError, ChartResult};

/// Pointer x position already mapped into the series' date domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x_domain_value: DateTime<Utc>,
}

impl PointerSample {
    #[must_use]
    pub fn new(x_domain_value: DateTime<Utc>) -> Self {
        Self { x_domain_value }
    }

    /// Maps a local pixel x through the time scale's inverse.
    pub fn from_pixel(scale: &TimeScale, x: f64) -> ChartResult<Self> {
        Ok(Self::new(scale.invert(x)?))
    }
}

/// The chosen nearest point and its position in the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocateResult<P> {
    pub point: P,
    pub index: usize,
}

/// Smallest index whose timestamp is `>= target`; `series.len()` when every
/// timestamp is earlier.
#[must_use]
pub fn bisect_left<P: Timestamped>(series: &[P], target: DateTime<Utc>) -> usize {
    series.partition_point(|point| point.timestamp() < target)
}

/// Index of the point closest in time to `target`.
///
/// Targets before the first point resolve to index 0 and targets after the
/// last point to the final index. When the target sits exactly halfway
/// between two neighbours the later one wins.
pub fn locate_index<P: Timestamped>(series: &[P], target: DateTime<Utc>) -> ChartResult<usize> {
    if series.is_empty() {
        return Err(ChartError::InvalidInput(
            "cannot locate a point in an empty series".to_owned(),
        ));
    }

    let insertion = bisect_left(series, target);
    if insertion == 0 {
        return Ok(0);
    }
    if insertion >= series.len() {
        return Ok(series.len() - 1);
    }

    let before = insertion - 1;
    // Equal distances resolve to the later point.
    if target - series[before].timestamp() < series[insertion].timestamp() - target {
        Ok(before)
    } else {
        Ok(insertion)
    }
}

pub fn locate<P: Timestamped + Clone>(
    series: &[P],
    target: DateTime<Utc>,
) -> ChartResult<LocateResult<P>> {
    let index = locate_index(series, target)?;
    Ok(LocateResult {
        point: series[index].clone(),
        index,
    })
}

pub fn locate_sample<P: Timestamped + Clone>(
    series: &[P],
    sample: PointerSample,
) -> ChartResult<LocateResult<P>> {
    locate(series, sample.x_domain_value)
}

/// Resolves the nearest point under a local pixel x coordinate.
pub fn locate_pixel<P: Timestamped + Clone>(
    series: &[P],
    scale: &TimeScale,
    x: f64,
) -> ChartResult<LocateResult<P>> {
    locate_sample(series, PointerSample::from_pixel(scale, x)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::primitives::parse_date;
    use crate::core::series::TimeSeriesPoint;

    fn series(days: &[u32]) -> Vec<TimeSeriesPoint> {
        days.iter()
            .map(|day| {
                TimeSeriesPoint::new(
                    parse_date(&format!("2023-01-{day:02}")).expect("date"),
                    f64::from(*day),
                )
            })
            .collect()
    }

    #[test]
    fn bisect_left_lands_on_first_equal_timestamp() {
        let data = series(&[1, 3, 3, 10]);
        let target = parse_date("2023-01-03").expect("date");
        assert_eq!(bisect_left(&data, target), 1);
    }

    #[test]
    fn single_point_series_always_resolves_to_it() {
        let data = series(&[5]);
        for day in ["2022-12-31", "2023-01-05", "2023-02-01"] {
            let target = parse_date(day).expect("date");
            assert_eq!(locate_index(&data, target).expect("locate"), 0);
        }
    }

    #[test]
    fn neighbour_comparison_prefers_later_only_on_ties() {
        let data = series(&[1, 3, 9]);
        let earlier_closer = parse_date("2023-01-05").expect("date");
        let tie = parse_date("2023-01-06").expect("date");
        let later_closer = parse_date("2023-01-07").expect("date");
        assert_eq!(locate_index(&data, earlier_closer).expect("locate"), 1);
        assert_eq!(locate_index(&data, tie).expect("locate"), 2);
        assert_eq!(locate_index(&data, later_closer).expect("locate"), 2);
    }
}
