use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::primitives::{decimal_to_f64, parse_date};
use crate::core::series::Timestamped;
use crate::error::{ChartError, ChartResult};

const CITY_TEMPERATURE_JSON: &str = include_str!("../../data/city_temperature.json");

/// Rows of the city temperature sample the bar stack renders.
pub const CITY_TEMPERATURE_ROWS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CityName {
    #[serde(rename = "New York")]
    NewYork,
    #[serde(rename = "San Francisco")]
    SanFrancisco,
    #[serde(rename = "Austin")]
    Austin,
}

impl CityName {
    pub const ALL: [CityName; 3] = [Self::NewYork, Self::SanFrancisco, Self::Austin];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NewYork => "New York",
            Self::SanFrancisco => "San Francisco",
            Self::Austin => "Austin",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|city| city.label() == label)
    }
}

impl AsRef<str> for CityName {
    fn as_ref(&self) -> &str {
        self.label()
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Daily temperature readings (°F) for three cities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityTemperature {
    /// Date exactly as it appears in the dataset; used as the band key.
    pub date_key: String,
    pub date: DateTime<Utc>,
    pub new_york: Decimal,
    pub san_francisco: Decimal,
    pub austin: Decimal,
}

impl CityTemperature {
    #[must_use]
    pub fn temperature(&self, city: CityName) -> Decimal {
        match city {
            CityName::NewYork => self.new_york,
            CityName::SanFrancisco => self.san_francisco,
            CityName::Austin => self.austin,
        }
    }

    pub fn temperature_f64(&self, city: CityName) -> ChartResult<f64> {
        decimal_to_f64(self.temperature(city), city.label())
    }

    /// Sum over all cities, computed exactly before conversion.
    pub fn total(&self) -> ChartResult<f64> {
        let total = CityName::ALL
            .into_iter()
            .map(|city| self.temperature(city))
            .sum::<Decimal>();
        decimal_to_f64(total, "temperature total")
    }
}

impl Timestamped for CityTemperature {
    fn timestamp(&self) -> DateTime<Utc> {
        self.date
    }
}

#[derive(Debug, Deserialize)]
struct RawCityTemperature {
    date: String,
    #[serde(rename = "New York")]
    new_york: Decimal,
    #[serde(rename = "San Francisco")]
    san_francisco: Decimal,
    #[serde(rename = "Austin")]
    austin: Decimal,
}

pub fn parse_city_temperature(json: &str) -> ChartResult<Vec<CityTemperature>> {
    let raw: Vec<RawCityTemperature> = serde_json::from_str(json)
        .map_err(|err| ChartError::InvalidData(format!("invalid city temperature json: {err}")))?;

    raw.into_iter()
        .map(|row| -> ChartResult<CityTemperature> {
            Ok(CityTemperature {
                date: parse_date(&row.date)?,
                date_key: row.date,
                new_york: row.new_york,
                san_francisco: row.san_francisco,
                austin: row.austin,
            })
        })
        .collect()
}

/// The first [`CITY_TEMPERATURE_ROWS`] rows of the embedded dataset.
pub fn city_temperature() -> ChartResult<&'static [CityTemperature]> {
    static CACHE: OnceLock<ChartResult<Vec<CityTemperature>>> = OnceLock::new();
    CACHE
        .get_or_init(|| {
            let mut rows = parse_city_temperature(CITY_TEMPERATURE_JSON)?;
            rows.truncate(CITY_TEMPERATURE_ROWS);
            debug!(rows = rows.len(), "loaded city temperature sample");
            Ok(rows)
        })
        .as_ref()
        .map(Vec::as_slice)
        .map_err(Clone::clone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_sample_parses_with_exact_totals() {
        let rows = city_temperature().expect("sample");
        assert_eq!(rows.len(), CITY_TEMPERATURE_ROWS);
        assert_eq!(rows[0].date_key, "2011-10-01");
        assert!((rows[0].total().expect("total") - 198.3).abs() < 1e-9);
    }

    #[test]
    fn one_bad_row_fails_the_whole_load() {
        let json = r#"[
            {"date":"2011-10-01","New York":"63.4","San Francisco":"62.7","Austin":"72.2"},
            {"date":"10/02/2011","New York":"58.0","San Francisco":"59.9","Austin":"67.7"}
        ]"#;
        assert!(matches!(
            parse_city_temperature(json),
            Err(ChartError::InvalidData(_))
        ));
    }

    #[test]
    fn labels_round_trip() {
        for city in CityName::ALL {
            assert_eq!(CityName::from_label(city.label()), Some(city));
        }
    }
}
