pub mod band_scale;
pub mod curve;
pub mod locator;
pub mod ordinal_scale;
pub mod primitives;
pub mod scale;
pub mod series;
pub mod stack;
pub mod ticks;
pub mod time_scale;
pub mod types;

pub use band_scale::BandScale;
pub use curve::{PathCommand, cardinal_path, linear_path};
pub use locator::{LocateResult, PointerSample, bisect_left, locate, locate_index, locate_pixel};
pub use ordinal_scale::OrdinalScale;
pub use scale::LinearScale;
pub use series::{OrderedSeries, TimeSeriesPoint, Timestamped};
pub use stack::{StackLayer, StackSegment, stack_series, stack_totals};
pub use time_scale::{TimeInterval, TimeScale};
pub use types::{Margin, Point, Viewport};
