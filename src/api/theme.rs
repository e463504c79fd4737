use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Box styling for one floating tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipStyle {
    pub background: Color,
    pub text_color: Color,
    pub border_color: Option<Color>,
    pub font_size_px: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    pub line_height_px: f64,
    pub corner_radius: f64,
    pub min_width: f64,
    pub centered: bool,
    /// Offset from the anchor point to the box corner.
    pub offset: f64,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            text_color: Color::from_rgb8(0x66, 0x66, 0x66),
            border_color: None,
            font_size_px: 14.0,
            padding_x: 8.0,
            padding_y: 4.8,
            line_height_px: 16.0,
            corner_radius: 3.0,
            min_width: 0.0,
            centered: false,
            offset: 10.0,
        }
    }
}

impl TooltipStyle {
    /// Near-black box used by the bar stack.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            background: Color::BLACK.with_alpha(0.9),
            text_color: Color::WHITE,
            min_width: 60.0,
            ..Self::default()
        }
    }

    /// Teal box with a white border used for the time series value.
    #[must_use]
    pub fn teal() -> Self {
        Self {
            background: Color::from_rgb8(0x3b, 0x69, 0x78),
            text_color: Color::WHITE,
            border_color: Some(Color::WHITE),
            ..Self::default()
        }
    }

    /// Light centered box used for the time series date.
    #[must_use]
    pub fn light_centered() -> Self {
        Self {
            min_width: 72.0,
            centered: true,
            ..Self::default()
        }
    }
}

/// Palette and typography shared by both chart widgets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    pub purple1: Color,
    pub purple2: Color,
    pub purple3: Color,
    pub background: Color,
    pub background_corner_radius: f64,
    pub grid_color: Color,
    pub grid_line_width: f64,
    pub axis_color: Color,
    pub axis_label_font_size_px: f64,
    pub axis_tick_length: f64,
    pub legend_font_size_px: f64,
    pub legend_swatch_size: f64,
    pub legend_label_gap: f64,
    pub legend_item_margin: f64,
    pub bar_tooltip: TooltipStyle,
    pub value_tooltip: TooltipStyle,
    pub date_tooltip: TooltipStyle,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            purple1: Color::from_rgb8(0x6c, 0x5e, 0xfb),
            purple2: Color::from_rgb8(0xc9, 0x98, 0xff),
            purple3: Color::from_rgb8(0xa4, 0x4a, 0xfe),
            background: Color::from_rgb8(0xea, 0xed, 0xff),
            background_corner_radius: 14.0,
            grid_color: Color::BLACK.with_alpha(0.1),
            grid_line_width: 1.0,
            axis_color: Color::from_rgb8(0xa4, 0x4a, 0xfe),
            axis_label_font_size_px: 11.0,
            axis_tick_length: 8.0,
            legend_font_size_px: 14.0,
            legend_swatch_size: 15.0,
            legend_label_gap: 4.0,
            legend_item_margin: 15.0,
            bar_tooltip: TooltipStyle::dark(),
            value_tooltip: TooltipStyle::teal(),
            date_tooltip: TooltipStyle::light_centered(),
        }
    }
}

impl ChartTheme {
    /// Colors assigned to series keys, in key order.
    #[must_use]
    pub fn series_colors(&self) -> Vec<Color> {
        vec![self.purple1, self.purple2, self.purple3]
    }
}
