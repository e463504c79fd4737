use crate::api::theme::ChartTheme;
use crate::core::{BandScale, LinearScale, TimeScale};
use crate::error::ChartResult;
use crate::render::{LinePrimitive, Primitive, TextHAlign, TextPrimitive};

/// Tick count requested from continuous scales for axes and grids.
pub const DEFAULT_TICK_COUNT: usize = 10;

/// Gap between tick mark end and the label's top.
const LABEL_GAP_PX: f64 = 3.0;

/// One tick in pixel space with its label.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub x: f64,
    pub label: String,
}

/// Ticks centered on every band, labeled by `format(key)`.
pub fn band_ticks<F>(scale: &BandScale, format: F) -> Vec<AxisTick>
where
    F: Fn(&str) -> String,
{
    let half = scale.bandwidth() / 2.0;
    scale
        .domain()
        .enumerate()
        .map(|(index, key)| AxisTick {
            x: scale.position_at(index) + half,
            label: format(key),
        })
        .collect()
}

pub fn time_ticks<F>(scale: &TimeScale, count: usize, format: F) -> Vec<AxisTick>
where
    F: Fn(chrono::DateTime<chrono::Utc>) -> String,
{
    scale
        .ticks(count)
        .into_iter()
        .map(|tick| AxisTick {
            x: scale.apply(tick),
            label: format(tick),
        })
        .collect()
}

/// Domain line, tick marks and centered labels for an axis whose line sits at
/// `top`.
#[must_use]
pub fn bottom_axis(ticks: &[AxisTick], range: (f64, f64), top: f64, theme: &ChartTheme) -> Vec<Primitive> {
    let mut primitives = Vec::with_capacity(ticks.len() * 2 + 1);
    let (start, end) = range;
    primitives.push(Primitive::Line(LinePrimitive::new(
        start.min(end),
        top,
        start.max(end),
        top,
        1.0,
        theme.axis_color,
    )));

    let tick_end = top + theme.axis_tick_length;
    let label_baseline = tick_end + LABEL_GAP_PX + theme.axis_label_font_size_px;
    for tick in ticks {
        primitives.push(Primitive::Line(LinePrimitive::new(
            tick.x,
            top,
            tick.x,
            tick_end,
            1.0,
            theme.axis_color,
        )));
        if !tick.label.is_empty() {
            primitives.push(Primitive::Text(TextPrimitive::new(
                tick.label.clone(),
                tick.x,
                label_baseline,
                theme.axis_label_font_size_px,
                theme.axis_color,
                TextHAlign::Center,
            )));
        }
    }
    primitives
}

/// Horizontal grid lines at the y scale's ticks, spanning `width` from `left`.
pub fn grid_rows(
    y_scale: &LinearScale,
    left: f64,
    top: f64,
    width: f64,
    theme: &ChartTheme,
) -> ChartResult<Vec<Primitive>> {
    y_scale
        .ticks(DEFAULT_TICK_COUNT)
        .into_iter()
        .map(|tick| {
            let y = top + y_scale.apply(tick)?;
            Ok(Primitive::Line(LinePrimitive::new(
                left,
                y,
                left + width,
                y,
                theme.grid_line_width,
                theme.grid_color,
            )))
        })
        .collect()
}

/// Vertical grid lines at each `x + offset`, spanning `height` from `top`.
#[must_use]
pub fn grid_columns(
    xs: impl IntoIterator<Item = f64>,
    offset: f64,
    top: f64,
    height: f64,
    theme: &ChartTheme,
) -> Vec<Primitive> {
    xs.into_iter()
        .map(|x| {
            Primitive::Line(LinePrimitive::new(
                x + offset,
                top,
                x + offset,
                top + height,
                theme.grid_line_width,
                theme.grid_color,
            ))
        })
        .collect()
}
