use serde::{Deserialize, Serialize};

use crate::core::{Margin, Viewport};
use crate::error::{ChartError, ChartResult};

/// Widths below this suppress rendering entirely.
pub const MIN_RENDER_WIDTH: f64 = 10.0;

/// Vertical space reserved below the plot for the axis and tooltips.
pub const AXIS_BAND_HEIGHT: f64 = 100.0;

/// Size and margins shared by both chart widgets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartProps {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub margin: Margin,
}

impl ChartProps {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: Margin::default(),
        }
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn from_json(json: &str) -> ChartResult<Self> {
        let props: Self = serde_json::from_str(json)
            .map_err(|err| ChartError::InvalidData(format!("invalid chart props json: {err}")))?;
        props.validate()?;
        Ok(props)
    }

    pub fn validate(self) -> ChartResult<()> {
        let margin = self.margin;
        let finite = [
            self.width,
            self.height,
            margin.top,
            margin.right,
            margin.bottom,
            margin.left,
        ]
        .iter()
        .all(|value| value.is_finite());
        if !finite {
            return Err(ChartError::InvalidData(
                "chart props must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "chart size must be >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// `false` when the widget renders nothing at this size.
    #[must_use]
    pub fn is_renderable(self) -> bool {
        self.width >= MIN_RENDER_WIDTH
    }

    /// Horizontal extent of the plot (`xMax`).
    #[must_use]
    pub fn plot_width(self) -> f64 {
        self.width
    }

    /// Vertical extent of the plot (`yMax`).
    #[must_use]
    pub fn plot_height(self) -> f64 {
        self.height - self.margin.top - AXIS_BAND_HEIGHT
    }

    #[must_use]
    pub fn inner_width(self) -> f64 {
        self.width - self.margin.horizontal()
    }

    #[must_use]
    pub fn inner_height(self) -> f64 {
        self.height - self.margin.vertical()
    }

    pub fn viewport(self) -> ChartResult<Viewport> {
        let viewport = Viewport::new(self.width.ceil() as u32, self.height.ceil() as u32);
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_margin_uses_default() {
        let props = ChartProps::from_json(r#"{"width": 800, "height": 500}"#).expect("props");
        assert_eq!(props.margin, Margin::new(40.0, 0.0, 0.0, 0.0));
        assert!((props.plot_height() - 360.0).abs() <= 1e-9);
        assert!((props.inner_height() - 460.0).abs() <= 1e-9);
    }

    #[test]
    fn negative_size_is_rejected() {
        assert!(ChartProps::from_json(r#"{"width": -1, "height": 500}"#).is_err());
    }
}
