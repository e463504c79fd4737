use chrono::{DateTime, Datelike, Months, NaiveTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_millis, unix_millis_to_datetime};
use crate::core::series::Timestamped;
use crate::core::ticks::tick_increment;
use crate::error::{ChartError, ChartResult};

const HOUR_MS: f64 = 3_600_000.0;
const DAY_MS: f64 = HOUR_MS * 24.0;
const WEEK_MS: f64 = DAY_MS * 7.0;
const MONTH_MS: f64 = DAY_MS * 30.0;
const YEAR_MS: f64 = DAY_MS * 365.0;

/// Calendar-aligned tick spacing used by [`TimeScale::ticks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInterval {
    Hour(u32),
    Day(u32),
    /// Weeks start on Sunday.
    Week,
    Month(u32),
    Year(i32),
}

const CANDIDATE_INTERVALS: [TimeInterval; 10] = [
    TimeInterval::Hour(1),
    TimeInterval::Hour(3),
    TimeInterval::Hour(6),
    TimeInterval::Hour(12),
    TimeInterval::Day(1),
    TimeInterval::Day(2),
    TimeInterval::Week,
    TimeInterval::Month(1),
    TimeInterval::Month(3),
    TimeInterval::Year(1),
];

impl TimeInterval {
    fn approx_millis(self) -> f64 {
        match self {
            Self::Hour(n) => HOUR_MS * f64::from(n),
            Self::Day(n) => DAY_MS * f64::from(n),
            Self::Week => WEEK_MS,
            Self::Month(n) => MONTH_MS * f64::from(n),
            Self::Year(n) => YEAR_MS * f64::from(n),
        }
    }

    fn floor_unit(self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let date = time.date_naive();
        let floored = match self {
            Self::Hour(_) => date.and_hms_opt(time.hour(), 0, 0)?,
            Self::Day(_) => date.and_time(NaiveTime::MIN),
            Self::Week => {
                let back = i64::from(date.weekday().num_days_from_sunday());
                (date - TimeDelta::days(back)).and_time(NaiveTime::MIN)
            }
            Self::Month(_) => date.with_day(1)?.and_time(NaiveTime::MIN),
            Self::Year(_) => date.with_ordinal(1)?.and_time(NaiveTime::MIN),
        };
        Some(floored.and_utc())
    }

    fn next_unit(self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Hour(_) => time.checked_add_signed(TimeDelta::hours(1)),
            Self::Day(_) => time.checked_add_signed(TimeDelta::days(1)),
            Self::Week => time.checked_add_signed(TimeDelta::weeks(1)),
            Self::Month(_) => time.checked_add_months(Months::new(1)),
            Self::Year(_) => time.checked_add_months(Months::new(12)),
        }
    }

    fn accepts(self, time: DateTime<Utc>) -> bool {
        match self {
            Self::Hour(n) => n > 0 && time.hour() % n == 0,
            Self::Day(n) => n > 0 && time.day0() % n == 0,
            Self::Week => true,
            Self::Month(n) => n > 0 && time.month0() % n == 0,
            Self::Year(n) => n > 0 && time.year().rem_euclid(n) == 0,
        }
    }

    fn choose(start_ms: f64, end_ms: f64, count: usize) -> Self {
        let target = (end_ms - start_ms).abs() / count as f64;
        let upper = CANDIDATE_INTERVALS.partition_point(|interval| interval.approx_millis() <= target);
        if upper == CANDIDATE_INTERVALS.len() {
            let step = tick_increment(start_ms / YEAR_MS, end_ms / YEAR_MS, count);
            return Self::Year(if step >= 1.0 { step as i32 } else { 1 });
        }
        if upper == 0 {
            return CANDIDATE_INTERVALS[0];
        }

        let finer = CANDIDATE_INTERVALS[upper - 1];
        let coarser = CANDIDATE_INTERVALS[upper];
        if target / finer.approx_millis() < coarser.approx_millis() / target {
            finer
        } else {
            coarser
        }
    }
}

/// Maps a date domain onto a pixel range, interpolating in epoch millis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    domain_start: DateTime<Utc>,
    domain_end: DateTime<Utc>,
    range_start: f64,
    range_end: f64,
    round: bool,
}

impl TimeScale {
    /// A zero-length domain is widened by half a day on both sides.
    pub fn new(domain: (DateTime<Utc>, DateTime<Utc>), range: (f64, f64)) -> ChartResult<Self> {
        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "time scale range must be finite".to_owned(),
            ));
        }

        let (mut domain_start, mut domain_end) = domain;
        if domain_start == domain_end {
            let half = TimeDelta::hours(12);
            domain_start = domain_start.checked_sub_signed(half).unwrap_or(domain_start);
            domain_end = domain_end.checked_add_signed(half).unwrap_or(domain_end);
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
            round: false,
        })
    }

    /// Fits the domain to the first and last timestamps of an ordered series.
    pub fn from_extent<P: Timestamped>(series: &[P], range: (f64, f64)) -> ChartResult<Self> {
        let (first, last) = match (series.first(), series.last()) {
            (Some(first), Some(last)) => (first.timestamp(), last.timestamp()),
            _ => {
                return Err(ChartError::InvalidInput(
                    "time scale cannot be built from empty data".to_owned(),
                ));
            }
        };
        Self::new((first, last), range)
    }

    #[must_use]
    pub fn rounded(mut self) -> Self {
        self.round = true;
        self
    }

    #[must_use]
    pub fn domain(self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn apply(self, time: DateTime<Utc>) -> f64 {
        let start = datetime_to_unix_millis(self.domain_start);
        let span = datetime_to_unix_millis(self.domain_end) - start;
        let normalized = (datetime_to_unix_millis(time) - start) / span;
        let pixel = self.range_start + normalized * (self.range_end - self.range_start);
        if self.round { pixel.round() } else { pixel }
    }

    pub fn invert(self, pixel: f64) -> ChartResult<DateTime<Utc>> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return Err(ChartError::InvalidData(
                "cannot invert a time scale with an empty range".to_owned(),
            ));
        }

        let start = datetime_to_unix_millis(self.domain_start);
        let span = datetime_to_unix_millis(self.domain_end) - start;
        let normalized = (pixel - self.range_start) / range_span;
        unix_millis_to_datetime(start + normalized * span)
    }

    #[must_use]
    pub fn tick_interval(self, count: usize) -> TimeInterval {
        TimeInterval::choose(
            datetime_to_unix_millis(self.domain_start),
            datetime_to_unix_millis(self.domain_end),
            count.max(1),
        )
    }

    /// Calendar-aligned ticks inside the domain, roughly `count` of them.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<DateTime<Utc>> {
        if count == 0 {
            return Vec::new();
        }

        let reverse = self.domain_end < self.domain_start;
        let (start, end) = if reverse {
            (self.domain_end, self.domain_start)
        } else {
            (self.domain_start, self.domain_end)
        };
        let interval = self.tick_interval(count);

        let mut out = Vec::new();
        let mut cursor = interval.floor_unit(start);
        // Bounded walk; the chosen interval keeps real walks short.
        for _ in 0..100_000 {
            let Some(time) = cursor else { break };
            if time > end {
                break;
            }
            if time >= start && interval.accepts(time) {
                out.push(time);
            }
            cursor = interval.next_unit(time);
        }

        if reverse {
            out.reverse();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::primitives::parse_date;

    #[test]
    fn month_ticks_fall_on_first_of_month() {
        let scale = TimeScale::new(
            (
                parse_date("2011-01-15").expect("start"),
                parse_date("2011-12-20").expect("end"),
            ),
            (0.0, 800.0),
        )
        .expect("scale");

        assert_eq!(scale.tick_interval(10), TimeInterval::Month(1));
        let ticks = scale.ticks(10);
        assert_eq!(ticks.len(), 11);
        assert!(ticks.iter().all(|tick| tick.day() == 1));
        assert_eq!(ticks[0], parse_date("2011-02-01").expect("feb"));
    }

    #[test]
    fn zero_length_domain_is_widened() {
        let at = parse_date("2020-06-01").expect("date");
        let scale = TimeScale::new((at, at), (0.0, 100.0)).expect("scale");
        assert_eq!(scale.apply(at), 50.0);
    }
}
