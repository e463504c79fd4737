use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Bar stack axis and tooltip date, e.g. `Oct 01`.
#[must_use]
pub fn format_day(date: DateTime<Utc>) -> String {
    date.format("%b %d").to_string()
}

/// Time axis label, e.g. `Jun`.
#[must_use]
pub fn format_month(date: DateTime<Utc>) -> String {
    date.format("%b").to_string()
}

/// Long date for the pinned date tooltip, e.g. `Tue Jun 01 2010`.
#[must_use]
pub fn format_long_date(date: DateTime<Utc>) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Temperature as it appears in the dataset, suffixed with `℉`.
#[must_use]
pub fn format_temperature(value: Decimal) -> String {
    format!("{value}℉")
}

#[must_use]
pub fn format_close(close: f64) -> String {
    format!("${close:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::primitives::parse_date;
    use std::str::FromStr;

    #[test]
    fn formats_match_labels() {
        let date = parse_date("2011-10-01").expect("date");
        assert_eq!(format_day(date), "Oct 01");
        assert_eq!(format_month(date), "Oct");
        assert_eq!(format_long_date(date), "Sat Oct 01 2011");
        let value = Decimal::from_str("63.4").expect("decimal");
        assert_eq!(format_temperature(value), "63.4℉");
        assert_eq!(format_close(362.189), "$362.19");
    }
}
