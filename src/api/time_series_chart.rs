use ordered_float::OrderedFloat;
use tracing::{debug, trace, warn};

use crate::api::axis::{DEFAULT_TICK_COUNT, bottom_axis, grid_columns, grid_rows, time_ticks};
use crate::api::chart_props::ChartProps;
use crate::api::format::{format_close, format_long_date, format_month};
use crate::api::theme::ChartTheme;
use crate::api::tooltip::{TooltipLine, tooltip_primitives};
use crate::core::{
    LinearScale, LocateResult, OrderedSeries, Point, TimeScale, cardinal_path, locate_pixel,
};
use crate::data::{StockQuote, stock_closes};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{PointerInput, TooltipState};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, PathPrimitive, Primitive,
    RectPrimitive, RenderFrame,
};

const LINE_TENSION: f64 = 0.0;
const MARKER_RADIUS: f64 = 4.0;

/// Scales and projected geometry for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesLayout {
    pub x_scale: TimeScale,
    pub y_scale: LinearScale,
    pub line: Vec<Point>,
    /// Transparent area that receives pointer events.
    pub hit_area: RectPrimitive,
}

/// Closing prices over time with a nearest-point hover marker.
#[derive(Debug, Clone)]
pub struct TimeSeriesChart {
    props: ChartProps,
    theme: ChartTheme,
    series: OrderedSeries<StockQuote>,
    tooltip: TooltipState<LocateResult<StockQuote>>,
}

impl TimeSeriesChart {
    /// Chart over the embedded stock close sample.
    pub fn new(props: ChartProps) -> ChartResult<Self> {
        Self::with_series(props, stock_closes()?.clone())
    }

    pub fn with_series(props: ChartProps, series: OrderedSeries<StockQuote>) -> ChartResult<Self> {
        props.validate()?;
        if series.is_empty() {
            return Err(ChartError::InvalidInput(
                "time series chart needs at least one point".to_owned(),
            ));
        }
        Ok(Self {
            props,
            theme: ChartTheme::default(),
            series,
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
    pub fn series(&self) -> &OrderedSeries<StockQuote> {
        &self.series
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState<LocateResult<StockQuote>> {
        &self.tooltip
    }

    pub fn layout(&self) -> ChartResult<Option<TimeSeriesLayout>> {
        let props = self.props;
        if !props.is_renderable() {
            return Ok(None);
        }
        let y_max = props.plot_height();
        if y_max <= 0.0 {
            warn!(height = props.height, "time series plot height is not positive");
            return Ok(None);
        }

        let x_scale = TimeScale::from_extent(&self.series, (0.0, props.plot_width()))?.rounded();
        let max_close = self
            .series
            .iter()
            .map(|quote| OrderedFloat(quote.close))
            .max()
            .map_or(0.0, |close| close.0);
        let y_scale =
            LinearScale::new((0.0, max_close + props.inner_height() / 3.0), (y_max, 0.0))?
                .nice(DEFAULT_TICK_COUNT);

        let line = project_points(&self.series, &x_scale, &y_scale)?;
        let margin = props.margin;
        let hit_area = RectPrimitive::new(
            margin.left,
            margin.top,
            props.inner_width().max(0.0),
            props.inner_height().max(0.0),
            Color::TRANSPARENT,
        )
        .with_corner_radius(self.theme.background_corner_radius);

        Ok(Some(TimeSeriesLayout {
            x_scale,
            y_scale,
            line,
            hit_area,
        }))
    }

    /// Applies one chart-local pointer event to the tooltip.
    ///
    /// Moves outside the hit area behave like a leave.
    pub fn on_pointer(&mut self, input: PointerInput) -> ChartResult<()> {
        let Some(pointer) = input.position() else {
            self.tooltip.hide();
            return Ok(());
        };
        let Some(layout) = self.layout()? else {
            self.tooltip.hide();
            return Ok(());
        };
        if !layout.hit_area.contains(pointer.x, pointer.y) {
            self.tooltip.hide();
            return Ok(());
        }

        let located = locate_pixel(&self.series, &layout.x_scale, pointer.x)?;
        let top = layout.y_scale.apply(located.point.close)?;
        trace!(index = located.index, x = pointer.x, "pointer located quote");
        self.tooltip.show(located, pointer.x, top);
        Ok(())
    }

    pub fn render_frame(&self) -> ChartResult<Option<RenderFrame>> {
        let Some(layout) = self.layout()? else {
            debug!(width = self.props.width, "time series render suppressed");
            return Ok(None);
        };
        let props = self.props;
        let theme = &self.theme;
        let margin = props.margin;
        let x_max = props.plot_width();
        let y_max = props.plot_height();
        let inner_height = props.inner_height();

        let mut frame = RenderFrame::new(props.viewport()?);
        frame.push(Primitive::Rect(
            RectPrimitive::new(0.0, 0.0, props.width, props.height, theme.background)
                .with_corner_radius(theme.background_corner_radius),
        ));

        let ticks = time_ticks(&layout.x_scale, DEFAULT_TICK_COUNT, format_month);
        frame.extend(grid_rows(&layout.y_scale, margin.left, margin.top, x_max, theme)?);
        frame.extend(grid_columns(
            ticks.iter().map(|tick| margin.left + tick.x),
            0.0,
            margin.top,
            y_max,
            theme,
        ));
        frame.extend(bottom_axis(&ticks, layout.x_scale.range(), y_max + margin.top, theme));

        if layout.line.len() > 1 {
            frame.push(Primitive::Path(PathPrimitive::new(
                cardinal_path(&layout.line, LINE_TENSION),
                1.0,
                theme.purple3,
            )));
        }
        frame.push(Primitive::Rect(layout.hit_area));

        if let TooltipState::Shown { data, left, top } = &self.tooltip {
            let (left, top) = (*left, *top);
            frame.push(Primitive::Line(
                LinePrimitive::new(left, margin.top, left, inner_height - margin.top, 2.0, theme.purple2)
                    .with_stroke_style(LineStrokeStyle::Dashed { dash: 5.0, gap: 2.0 }),
            ));
            let shadow = Color::BLACK.with_alpha(0.1);
            frame.push(Primitive::Circle(
                CirclePrimitive::new(left, top, MARKER_RADIUS, shadow).with_stroke(2.0, shadow),
            ));
            frame.push(Primitive::Circle(
                CirclePrimitive::new(left, top, MARKER_RADIUS, theme.purple1)
                    .with_stroke(2.0, Color::WHITE),
            ));

            frame.extend(tooltip_primitives(
                &[TooltipLine::plain(format_close(data.point.close))],
                left,
                top,
                &theme.value_tooltip,
                props.width,
            ));
            frame.extend(tooltip_primitives(
                &[TooltipLine::plain(format_long_date(data.point.date))],
                left,
                inner_height - margin.top,
                &theme.date_tooltip,
                props.width,
            ));
        }

        debug!(
            points = layout.line.len(),
            primitives = frame.primitives.len(),
            tooltip = self.tooltip.is_open(),
            "built time series frame"
        );
        Ok(Some(frame))
    }
}

#[cfg(not(feature = "parallel-projection"))]
fn project_points(
    series: &[StockQuote],
    x_scale: &TimeScale,
    y_scale: &LinearScale,
) -> ChartResult<Vec<Point>> {
    series
        .iter()
        .map(|quote| -> ChartResult<Point> {
            Ok(Point::new(x_scale.apply(quote.date), y_scale.apply(quote.close)?))
        })
        .collect()
}

#[cfg(feature = "parallel-projection")]
fn project_points(
    series: &[StockQuote],
    x_scale: &TimeScale,
    y_scale: &LinearScale,
) -> ChartResult<Vec<Point>> {
    use rayon::prelude::*;

    series
        .par_iter()
        .map(|quote| -> ChartResult<Point> {
            Ok(Point::new(x_scale.apply(quote.date), y_scale.apply(quote.close)?))
        })
        .collect()
}
