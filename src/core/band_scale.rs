use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Discrete scale that splits a pixel range into evenly spaced bands, one per
/// domain key, in domain order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    domain: IndexSet<String>,
    range_start: f64,
    range_end: f64,
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    round: bool,
}

/// Resolved band geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BandLayout {
    first: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Duplicate keys collapse onto their first occurrence.
    pub fn new<I, S>(domain: I, range: (f64, f64)) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "band scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain: domain.into_iter().map(Into::into).collect(),
            range_start,
            range_end,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
            round: false,
        })
    }

    /// Sets inner and outer padding together, as a fraction of the step.
    pub fn with_padding(self, padding: f64) -> ChartResult<Self> {
        self.with_paddings(padding, padding)
    }

    pub fn with_paddings(mut self, inner: f64, outer: f64) -> ChartResult<Self> {
        if !inner.is_finite() || !(0.0..=1.0).contains(&inner) {
            return Err(ChartError::InvalidData(
                "band inner padding must be in [0, 1]".to_owned(),
            ));
        }
        if !outer.is_finite() || outer < 0.0 {
            return Err(ChartError::InvalidData(
                "band outer padding must be finite and >= 0".to_owned(),
            ));
        }
        self.padding_inner = inner;
        self.padding_outer = outer;
        Ok(self)
    }

    pub fn with_align(mut self, align: f64) -> ChartResult<Self> {
        if !align.is_finite() || !(0.0..=1.0).contains(&align) {
            return Err(ChartError::InvalidData(
                "band align must be in [0, 1]".to_owned(),
            ));
        }
        self.align = align;
        Ok(self)
    }

    #[must_use]
    pub fn rounded(mut self) -> Self {
        self.round = true;
        self
    }

    #[must_use]
    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.domain.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.layout().step
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.layout().bandwidth
    }

    /// Left edge of the band for `key`, `None` for keys outside the domain.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<f64> {
        let index = self.domain.get_index_of(key)?;
        Some(self.position_at(index))
    }

    /// Left edge of the band at domain position `index`.
    #[must_use]
    pub fn position_at(&self, index: usize) -> f64 {
        let layout = self.layout();
        let n = self.domain.len();
        let slot = if self.range_end < self.range_start {
            n.saturating_sub(1).saturating_sub(index)
        } else {
            index
        };
        layout.first + layout.step * slot as f64
    }

    fn layout(&self) -> BandLayout {
        let n = self.domain.len() as f64;
        let (start, stop) = if self.range_end < self.range_start {
            (self.range_end, self.range_start)
        } else {
            (self.range_start, self.range_end)
        };

        let mut step =
            (stop - start) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        if self.round {
            step = step.floor();
        }
        let mut first = start + (stop - start - step * (n - self.padding_inner)) * self.align;
        let mut bandwidth = step * (1.0 - self.padding_inner);
        if self.round {
            first = first.round();
            bandwidth = bandwidth.round();
        }

        BandLayout {
            first,
            step,
            bandwidth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounded_layout_centers_bands() {
        let keys = (1..=12).map(|day| format!("2011-10-{day:02}"));
        let scale = BandScale::new(keys, (0.0, 800.0))
            .expect("scale")
            .with_padding(0.2)
            .expect("padding")
            .rounded();

        assert_eq!(scale.step(), 65.0);
        assert_eq!(scale.bandwidth(), 52.0);
        assert_eq!(scale.position("2011-10-01"), Some(17.0));
        assert_eq!(scale.position("2011-10-12"), Some(17.0 + 65.0 * 11.0));
        assert_eq!(scale.position("2011-11-01"), None);
    }

    #[test]
    fn reversed_range_flips_band_order() {
        let scale = BandScale::new(["a", "b"], (100.0, 0.0)).expect("scale");
        assert_eq!(scale.position("a"), Some(50.0));
        assert_eq!(scale.position("b"), Some(0.0));
    }
}
