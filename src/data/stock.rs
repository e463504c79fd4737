use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::primitives::parse_date;
use crate::core::series::{OrderedSeries, Timestamped};
use crate::error::{ChartError, ChartResult};

const STOCK_CLOSES_JSON: &str = include_str!("../../data/stock_closes.json");

/// One closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StockQuote {
    pub date: DateTime<Utc>,
    pub close: f64,
}

impl Timestamped for StockQuote {
    fn timestamp(&self) -> DateTime<Utc> {
        self.date
    }
}

#[derive(Debug, Deserialize)]
struct RawStockQuote {
    date: String,
    close: f64,
}

/// Parses and validates ordering; out-of-order dates are rejected.
pub fn parse_stock_closes(json: &str) -> ChartResult<OrderedSeries<StockQuote>> {
    let raw: Vec<RawStockQuote> = serde_json::from_str(json)
        .map_err(|err| ChartError::InvalidData(format!("invalid stock json: {err}")))?;

    let quotes = raw
        .into_iter()
        .map(|row| -> ChartResult<StockQuote> {
            if !row.close.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "close on {} must be finite",
                    row.date
                )));
            }
            Ok(StockQuote {
                date: parse_date(&row.date)?,
                close: row.close,
            })
        })
        .collect::<ChartResult<Vec<_>>>()?;

    OrderedSeries::try_new(quotes)
}

pub fn stock_closes() -> ChartResult<&'static OrderedSeries<StockQuote>> {
    static CACHE: OnceLock<ChartResult<OrderedSeries<StockQuote>>> = OnceLock::new();
    CACHE
        .get_or_init(|| {
            let series = parse_stock_closes(STOCK_CLOSES_JSON)?;
            debug!(points = series.len(), "loaded stock closes");
            Ok(series)
        })
        .as_ref()
        .map_err(Clone::clone)
}
