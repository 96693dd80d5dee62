pub mod dimensions;
pub mod entry;
pub mod model;
pub mod ranges;
pub mod types;

pub use dimensions::{DimensionDemands, HorizontalDimensions, MutableHorizontalDimensions};
pub use entry::{CandleEntry, Change, ColumnEntry};
pub use model::{CandlestickModel, ColumnModel, ModelId};
pub use ranges::{ChartRanges, MutableChartRanges, YRange};
pub use types::{AxisPosition, Bounds, LayoutDirection, PanZoom, VerticalAxisKey};
