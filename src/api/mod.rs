//! Chart widgets and the builders they share.
//!
//! Each widget owns its dataset and tooltip state, rebuilds its scales on every
//! pass and emits a backend-agnostic [`RenderFrame`](crate::render::RenderFrame).

pub mod axis;
mod bar_stack_chart;
mod chart_props;
pub mod format;
mod legend;
mod text_metrics;
mod theme;
mod time_series_chart;
mod tooltip;

pub use bar_stack_chart::{BarStackChart, BarStackLayout, BarTooltip, StackBar};
pub use chart_props::{AXIS_BAND_HEIGHT, ChartProps, MIN_RENDER_WIDTH};
pub use legend::legend_row;
pub use text_metrics::estimate_text_width_px;
pub use theme::{ChartTheme, TooltipStyle};
pub use time_series_chart::{TimeSeriesChart, TimeSeriesLayout};
pub use tooltip::{TooltipLine, tooltip_primitives};
