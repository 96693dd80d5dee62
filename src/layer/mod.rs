//! Cartesian layers: data-to-canvas layout and primitive emission.

mod candlestick;
mod column;
mod context;
mod style;

pub use candlestick::{CandleProvider, CandleStyle, CandlestickLayer};
pub use column::{
    ColumnLayer, ColumnProvider, DataLabelConfig, MergeMode, SeriesColumnProvider, StackInfo,
};
pub use context::{DrawContext, MeasureContext, full_x_range};
pub use style::{
    DecimalFormatter, LayerPadding, LineStyle, TextStyle, ValueFormatter, VerticalPosition,
};
