use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Milliseconds since the Unix epoch, the unit time scales interpolate in.
#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

pub fn unix_millis_to_datetime(millis: f64) -> ChartResult<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(ChartError::InvalidData(
            "timestamp millis must be finite".to_owned(),
        ));
    }
    let rounded = millis.round();
    if rounded < i64::MIN as f64 || rounded > i64::MAX as f64 {
        return Err(ChartError::InvalidData(format!(
            "timestamp millis {millis} out of range"
        )));
    }
    Utc.timestamp_millis_opt(rounded as i64)
        .single()
        .ok_or_else(|| ChartError::InvalidData(format!("timestamp millis {millis} out of range")))
}

/// Parses either a plain `YYYY-MM-DD` date (midnight UTC) or an RFC 3339
/// timestamp.
pub fn parse_date(raw: &str) -> ChartResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|err| ChartError::InvalidData(format!("unparseable date `{raw}`: {err}")))
}
