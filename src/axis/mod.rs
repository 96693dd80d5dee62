//! Horizontal axes and their item-placement strategies.

mod horizontal;
mod item_placer;

pub use horizontal::HorizontalAxis;
pub use item_placer::{AlignedItemPlacer, ItemPlacer, SegmentedItemPlacer};
