use crate::api::text_metrics::estimate_text_width_px;
use crate::api::theme::ChartTheme;
use crate::core::OrdinalScale;
use crate::render::{Color, Primitive, RectPrimitive, TextHAlign, TextPrimitive};

/// Horizontal legend row: one swatch and label per ordinal entry, the whole
/// row centered on `center_x` with its top edge at `top`.
#[must_use]
pub fn legend_row(
    scale: &OrdinalScale<Color>,
    center_x: f64,
    top: f64,
    theme: &ChartTheme,
) -> Vec<Primitive> {
    let swatch = theme.legend_swatch_size;
    let font_size = theme.legend_font_size_px;
    let items: Vec<(&str, Color, f64)> = scale
        .entries()
        .map(|(label, color)| {
            let width = swatch
                + theme.legend_label_gap
                + estimate_text_width_px(label, font_size)
                + theme.legend_item_margin;
            (label, *color, width)
        })
        .collect();

    let total_width: f64 = items.iter().map(|(_, _, width)| width).sum();
    let mut x = center_x - total_width / 2.0;
    let baseline = top + swatch / 2.0 + font_size * 0.35;

    let mut primitives = Vec::with_capacity(items.len() * 2);
    for (label, color, width) in items {
        primitives.push(Primitive::Rect(RectPrimitive::new(x, top, swatch, swatch, color)));
        primitives.push(Primitive::Text(TextPrimitive::new(
            label,
            x + swatch + theme.legend_label_gap,
            baseline,
            font_size,
            Color::BLACK,
            TextHAlign::Left,
        )));
        x += width;
    }
    primitives
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_is_centered() {
        let theme = ChartTheme::default();
        let scale = OrdinalScale::new(["A", "B"], theme.series_colors()).expect("scale");
        let primitives = legend_row(&scale, 400.0, 10.0, &theme);
        assert_eq!(primitives.len(), 4);
        let Primitive::Rect(first) = &primitives[0] else {
            panic!("expected swatch first");
        };
        assert!(first.x < 400.0);
        assert!((first.y - 10.0).abs() <= 1e-9);
    }
}
