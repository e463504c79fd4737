use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::api::axis::{bottom_axis, band_ticks, grid_columns, grid_rows};
use crate::api::chart_props::ChartProps;
use crate::api::format::{format_day, format_temperature};
use crate::api::legend::legend_row;
use crate::api::theme::ChartTheme;
use crate::api::tooltip::{TooltipLine, tooltip_primitives};
use crate::core::primitives::parse_date;
use crate::core::{BandScale, LinearScale, OrdinalScale, stack_series};
use crate::data::{CityName, CityTemperature, city_temperature};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{PointerInput, TooltipState};
use crate::render::{Color, Primitive, RectPrimitive, RenderFrame};

const BAND_PADDING: f64 = 0.2;

/// Payload shown while the pointer is over one stacked bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTooltip {
    pub key: CityName,
    pub value: Decimal,
    pub date: DateTime<Utc>,
    pub color: Color,
    pub row_index: usize,
}

/// One stacked segment in plot coordinates (y measured from the plot top).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackBar {
    pub key: CityName,
    pub row_index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
}

impl StackBar {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Scales and bar geometry for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct BarStackLayout {
    pub x_scale: BandScale,
    pub y_scale: LinearScale,
    pub colors: OrdinalScale<Color>,
    pub bars: Vec<StackBar>,
}

impl BarStackLayout {
    /// Bar under a point given in plot coordinates.
    #[must_use]
    pub fn bar_at(&self, x: f64, y: f64) -> Option<&StackBar> {
        self.bars.iter().rev().find(|bar| bar.contains(x, y))
    }
}

/// Stacked daily temperatures for three cities with a hover tooltip.
#[derive(Debug, Clone)]
pub struct BarStackChart {
    props: ChartProps,
    theme: ChartTheme,
    rows: Vec<CityTemperature>,
    tooltip: TooltipState<BarTooltip>,
}

impl BarStackChart {
    /// Chart over the embedded city temperature sample.
    pub fn new(props: ChartProps) -> ChartResult<Self> {
        Self::with_rows(props, city_temperature()?.to_vec())
    }

    pub fn with_rows(props: ChartProps, rows: Vec<CityTemperature>) -> ChartResult<Self> {
        props.validate()?;
        if rows.is_empty() {
            return Err(ChartError::InvalidInput(
                "bar stack needs at least one row".to_owned(),
            ));
        }
        Ok(Self {
            props,
            theme: ChartTheme::default(),
            rows,
            tooltip: TooltipState::Hidden,
        })
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn props(&self) -> ChartProps {
        self.props
    }

    #[must_use]
    pub fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    #[must_use]
    pub fn rows(&self) -> &[CityTemperature] {
        &self.rows
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState<BarTooltip> {
        &self.tooltip
    }

    /// Builds fresh scales and bars; `None` when the chart renders nothing at
    /// the current size.
    pub fn layout(&self) -> ChartResult<Option<BarStackLayout>> {
        let props = self.props;
        if !props.is_renderable() {
            return Ok(None);
        }
        let x_max = props.plot_width();
        let y_max = props.plot_height();
        if y_max <= 0.0 {
            warn!(height = props.height, "bar stack plot height is not positive");
            return Ok(None);
        }

        let x_scale = BandScale::new(self.rows.iter().map(|row| row.date_key.clone()), (0.0, x_max))?
            .with_padding(BAND_PADDING)?
            .rounded();

        let mut max_total = OrderedFloat(0.0);
        for row in &self.rows {
            max_total = max_total.max(OrderedFloat(row.total()?));
        }
        // All-zero or negative totals still get a unit domain to draw against.
        let y_top = if max_total.0 > 0.0 { max_total.0 } else { 1.0 };
        let y_scale = LinearScale::new((0.0, y_top), (y_max, 0.0))?.nice(10);

        let colors = OrdinalScale::new(
            CityName::ALL.iter().map(|city| city.label()),
            self.theme.series_colors(),
        )?;

        let layers = stack_series(&self.rows, CityName::ALL.as_slice(), |row, city| {
            row.temperature_f64(*city).unwrap_or(f64::NAN)
        })?;

        let bandwidth = x_scale.bandwidth();
        let mut bars = Vec::with_capacity(layers.len() * self.rows.len());
        for (layer, city) in layers.iter().zip(CityName::ALL) {
            let color = colors.get(city.label()).copied().unwrap_or(self.theme.purple1);
            for (row_index, (row, segment)) in self.rows.iter().zip(&layer.segments).enumerate() {
                let Some(x) = x_scale.position(&row.date_key) else {
                    continue;
                };
                let top = y_scale.apply(segment.y1)?;
                let bottom = y_scale.apply(segment.y0)?;
                bars.push(StackBar {
                    key: city,
                    row_index,
                    x,
                    y: top.min(bottom),
                    width: bandwidth,
                    height: (bottom - top).abs(),
                    color,
                });
            }
        }

        Ok(Some(BarStackLayout {
            x_scale,
            y_scale,
            colors,
            bars,
        }))
    }

    /// Applies one chart-local pointer event to the tooltip.
    pub fn on_pointer(&mut self, input: PointerInput) -> ChartResult<()> {
        let layout = match input {
            PointerInput::Leave => None,
            _ => self.layout()?,
        };
        let Some(layout) = layout else {
            self.tooltip.hide();
            return Ok(());
        };

        let margin_top = self.props.margin.top;
        let rows = &self.rows;
        self.tooltip.on_pointer(input, |pointer| {
            let bar = layout.bar_at(pointer.x, pointer.y - margin_top)?;
            let row = rows.get(bar.row_index)?;
            trace!(key = %bar.key, row = bar.row_index, "pointer over bar");
            let data = BarTooltip {
                key: bar.key,
                value: row.temperature(bar.key),
                date: row.date,
                color: bar.color,
                row_index: bar.row_index,
            };
            Some((data, bar.x + bar.width / 2.0, pointer.y - margin_top))
        });
        Ok(())
    }

    pub fn render_frame(&self) -> ChartResult<Option<RenderFrame>> {
        let Some(layout) = self.layout()? else {
            debug!(width = self.props.width, "bar stack render suppressed");
            return Ok(None);
        };
        let props = self.props;
        let theme = &self.theme;
        let margin = props.margin;
        let x_max = props.plot_width();
        let y_max = props.plot_height();

        let mut frame = RenderFrame::new(props.viewport()?);
        frame.push(Primitive::Rect(
            RectPrimitive::new(0.0, 0.0, props.width, props.height, theme.background)
                .with_corner_radius(theme.background_corner_radius),
        ));

        frame.extend(grid_rows(&layout.y_scale, margin.left, margin.top, x_max, theme)?);
        frame.extend(grid_columns(
            (0..layout.x_scale.len()).map(|index| margin.left + layout.x_scale.position_at(index)),
            layout.x_scale.bandwidth() / 2.0,
            margin.top,
            y_max,
            theme,
        ));

        for bar in &layout.bars {
            frame.push(Primitive::Rect(RectPrimitive::new(
                bar.x,
                margin.top + bar.y,
                bar.width,
                bar.height,
                bar.color,
            )));
        }

        let ticks = band_ticks(&layout.x_scale, |key| {
            parse_date(key).map_or_else(|_| key.to_owned(), format_day)
        });
        frame.extend(bottom_axis(&ticks, (0.0, x_max), y_max + margin.top, theme));
        frame.extend(legend_row(
            &layout.colors,
            props.width / 2.0,
            margin.top / 2.0 - 10.0,
            theme,
        ));

        if let TooltipState::Shown { data, left, top } = &self.tooltip {
            let lines = [
                TooltipLine::plain(data.key.label()).colored(data.color).strong(),
                TooltipLine::plain(format_temperature(data.value)),
                TooltipLine::plain(format_day(data.date)).small(),
            ];
            frame.extend(tooltip_primitives(&lines, *left, *top, &theme.bar_tooltip, props.width));
        }

        debug!(
            bars = layout.bars.len(),
            primitives = frame.primitives.len(),
            tooltip = self.tooltip.is_open(),
            "built bar stack frame"
        );
        Ok(Some(frame))
    }
}
