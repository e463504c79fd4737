use serde::{Deserialize, Serialize};

use crate::core::ticks::{nice_domain, ticks};
use crate::error::{ChartError, ChartResult};

/// Continuous linear mapping from a numeric domain to a pixel range.
///
/// Scales are plain values: every render pass builds the scale it needs from
/// `{domain, range}` instead of reconfiguring a shared instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
    round: bool,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
            round: false,
        })
    }

    /// Same scale with output values rounded to whole pixels.
    #[must_use]
    pub fn rounded(mut self) -> Self {
        self.round = true;
        self
    }

    /// Same scale with the domain extended to round tick values.
    #[must_use]
    pub fn nice(mut self, count: usize) -> Self {
        let (start, end) = nice_domain(self.domain_start, self.domain_end, count);
        self.domain_start = start;
        self.domain_end = end;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn apply(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        let pixel = self.range_start + normalized * (self.range_end - self.range_start);
        Ok(if self.round { pixel.round() } else { pixel })
    }

    pub fn invert(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return Err(ChartError::InvalidData(
                "cannot invert a scale with an empty range".to_owned(),
            ));
        }

        let normalized = (pixel - self.range_start) / span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        ticks(self.domain_start, self.domain_end, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_maps_domain_bottom_up() {
        let scale = LinearScale::new((0.0, 100.0), (360.0, 0.0)).expect("scale");
        assert_eq!(scale.apply(0.0).expect("px"), 360.0);
        assert_eq!(scale.apply(100.0).expect("px"), 0.0);
        assert_eq!(scale.invert(180.0).expect("value"), 50.0);
    }

    #[test]
    fn rejects_degenerate_domain_and_empty_range_inversion() {
        assert!(LinearScale::new((1.0, 1.0), (0.0, 10.0)).is_err());
        let flat = LinearScale::new((0.0, 1.0), (5.0, 5.0)).expect("scale");
        assert!(flat.invert(5.0).is_err());
    }
}
