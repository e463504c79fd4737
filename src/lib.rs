//! story-charts: a stacked bar chart and an interactive time-series chart,
//! rendered as backend-agnostic frames and browsable as a story catalog.
//!
//! The core of the crate is [`core::locator`], which resolves a pointer
//! position to the nearest point of a time-ordered series. Widgets in [`api`]
//! build fresh scales on every pass, keep their tooltip in an explicit
//! [`interaction::TooltipState`], and emit [`render::RenderFrame`]s that any
//! [`render::Renderer`] can draw.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod interaction;
pub mod render;
pub mod stories;
pub mod telemetry;

pub use api::{BarStackChart, ChartProps, ChartTheme, TimeSeriesChart};
pub use error::{ChartError, ChartResult};
pub use stories::{Story, StoryCatalog, default_catalog};
