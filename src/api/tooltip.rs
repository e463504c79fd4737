use crate::api::text_metrics::estimate_text_width_px;
use crate::api::theme::TooltipStyle;
use crate::render::{Color, Primitive, RectPrimitive, TextHAlign, TextPrimitive};

/// One text row inside a tooltip box.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLine {
    pub text: String,
    pub color: Option<Color>,
    pub bold: bool,
    /// Multiplier applied to the style's font size.
    pub scale: f64,
}

impl TooltipLine {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            bold: false,
            scale: 1.0,
        }
    }

    #[must_use]
    pub fn colored(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn strong(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn small(mut self) -> Self {
        self.scale = 0.8;
        self
    }
}

/// Tooltip box anchored at (`left`, `top`) in chart-local pixels.
///
/// The box sits `style.offset` right of and below the anchor and flips to the
/// left side when it would overflow `bounds_width`.
#[must_use]
pub fn tooltip_primitives(
    lines: &[TooltipLine],
    left: f64,
    top: f64,
    style: &TooltipStyle,
    bounds_width: f64,
) -> Vec<Primitive> {
    if lines.is_empty() {
        return Vec::new();
    }

    let content_width = lines
        .iter()
        .map(|line| estimate_text_width_px(&line.text, style.font_size_px * line.scale))
        .fold(0.0, f64::max);
    let box_width = (content_width + style.padding_x * 2.0).max(style.min_width);
    let box_height = lines.len() as f64 * style.line_height_px + style.padding_y * 2.0;

    let mut x = left + style.offset;
    if x + box_width > bounds_width && left - style.offset - box_width >= 0.0 {
        x = left - style.offset - box_width;
    }
    let y = top + style.offset;

    let mut rect = RectPrimitive::new(x, y, box_width, box_height, style.background)
        .with_corner_radius(style.corner_radius);
    if let Some(border) = style.border_color {
        rect = rect.with_border(1.0, border);
    }

    let mut primitives = Vec::with_capacity(lines.len() + 1);
    primitives.push(Primitive::Rect(rect));

    let (text_x, h_align) = if style.centered {
        (x + box_width / 2.0, TextHAlign::Center)
    } else {
        (x + style.padding_x, TextHAlign::Left)
    };
    for (row, line) in lines.iter().enumerate() {
        if line.text.is_empty() {
            continue;
        }
        let font_size = style.font_size_px * line.scale;
        let baseline = y + style.padding_y + row as f64 * style.line_height_px + font_size * 0.85;
        let mut text = TextPrimitive::new(
            line.text.clone(),
            text_x,
            baseline,
            font_size,
            line.color.unwrap_or(style.text_color),
            h_align,
        );
        if line.bold {
            text = text.bold();
        }
        primitives.push(Primitive::Text(text));
    }
    primitives
}
