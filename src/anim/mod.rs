pub mod interpolator;
pub mod transition;

pub use interpolator::{
    CandleDrawingModel, CandleInfo, ColumnDrawingModel, ColumnInfo, DrawingInfo, DrawingModel,
    DrawingModelInterpolator, XKey,
};
pub use transition::{Transition, TransitionState};
