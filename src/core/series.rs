use std::ops::Deref;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Anything positioned on a time axis.
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl TimeSeriesPoint {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

impl Timestamped for TimeSeriesPoint {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Series sorted ascending by timestamp.
///
/// Timestamps are non-decreasing. `from_sorted` trusts the caller;
/// `try_new` checks.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedSeries<P> {
    points: Vec<P>,
}

impl<P: Timestamped> OrderedSeries<P> {
    #[must_use]
    pub fn from_sorted(points: Vec<P>) -> Self {
        debug_assert!(is_sorted_by_timestamp(&points));
        Self { points }
    }

    pub fn try_new(points: Vec<P>) -> ChartResult<Self> {
        if let Some(position) = first_out_of_order(&points) {
            return Err(ChartError::InvalidInput(format!(
                "series timestamps must be non-decreasing (violation at index {position})"
            )));
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[P] {
        &self.points
    }

    #[must_use]
    pub fn first(&self) -> Option<&P> {
        self.points.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&P> {
        self.points.last()
    }

    /// Earliest and latest timestamps, `None` when empty.
    #[must_use]
    pub fn extent(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.first()?.timestamp(), self.last()?.timestamp()))
    }

    #[must_use]
    pub fn into_points(self) -> Vec<P> {
        self.points
    }
}

impl<P> Deref for OrderedSeries<P> {
    type Target = [P];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

fn is_sorted_by_timestamp<P: Timestamped>(points: &[P]) -> bool {
    first_out_of_order(points).is_none()
}

fn first_out_of_order<P: Timestamped>(points: &[P]) -> Option<usize> {
    points
        .windows(2)
        .position(|pair| pair[1].timestamp() < pair[0].timestamp())
        .map(|idx| idx + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::primitives::parse_date;

    fn point(date: &str, value: f64) -> TimeSeriesPoint {
        TimeSeriesPoint::new(parse_date(date).expect("date"), value)
    }

    #[test]
    fn try_new_rejects_descending_timestamps() {
        let err = OrderedSeries::try_new(vec![point("2023-01-02", 1.0), point("2023-01-01", 2.0)])
            .expect_err("unsorted");
        assert!(matches!(err, ChartError::InvalidInput(_)));
    }

    #[test]
    fn try_new_accepts_duplicate_timestamps() {
        let series = OrderedSeries::try_new(vec![
            point("2023-01-01", 1.0),
            point("2023-01-01", 2.0),
            point("2023-01-05", 3.0),
        ])
        .expect("sorted");
        let (start, end) = series.extent().expect("extent");
        assert!(start < end);
        assert_eq!(series.len(), 3);
    }
}
