use crate::core::{Bounds, ChartRanges, HorizontalDimensions, LayoutDirection, PanZoom};
use crate::render::{RenderFrame, TextMeasurer};

/// Read-only inputs of the measurement phase, threaded explicitly through
/// every component instead of living in shared global state.
pub struct MeasureContext<'a> {
    pub ranges: &'a ChartRanges,
    pub dims: HorizontalDimensions,
    pub text: &'a dyn TextMeasurer,
    /// When zoom is disabled the chart contents are laid out at fixed scale
    /// and padding reservation can subtract the distance to the range bound.
    pub zoom_enabled: bool,
}

/// Inputs and output sink of one draw pass.
pub struct DrawContext<'a> {
    pub ranges: &'a ChartRanges,
    /// Horizontal layout with zoom already applied.
    pub dims: HorizontalDimensions,
    pub layer_bounds: Bounds,
    pub direction: LayoutDirection,
    pub pan_zoom: PanZoom,
    pub text: &'a dyn TextMeasurer,
    pub frame: &'a mut RenderFrame,
}

impl DrawContext<'_> {
    #[must_use]
    pub fn direction_multiplier(&self) -> f64 {
        self.direction.multiplier()
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.pan_zoom.zoom
    }

    #[must_use]
    pub fn scroll(&self) -> f64 {
        self.pan_zoom.scroll
    }

    /// Data range extended by the scaled layer paddings, in x units.
    #[must_use]
    pub fn full_x_range(&self) -> (f64, f64) {
        full_x_range(self.ranges, self.dims)
    }

    /// X values currently visible inside `bounds` given scroll and spacing.
    #[must_use]
    pub fn visible_x_range(&self, bounds: Bounds) -> (f64, f64) {
        let (full_start, _) = self.full_x_range();
        if self.dims.x_spacing <= 0.0 {
            return (full_start, full_start);
        }
        let first = full_start
            + self.scroll() / self.dims.x_spacing * self.ranges.x_step * self.direction_multiplier();
        let last = first + bounds.width() / self.dims.x_spacing * self.ranges.x_step;
        (first, last)
    }
}

/// Data range extended by the paddings, shared by the draw and measure
/// phases so axes and layers agree on the effective x extent.
#[must_use]
pub fn full_x_range(ranges: &ChartRanges, dims: HorizontalDimensions) -> (f64, f64) {
    if dims.x_spacing <= 0.0 {
        return (ranges.min_x, ranges.max_x);
    }
    let start = ranges.min_x - dims.start_padding / dims.x_spacing * ranges.x_step;
    let end = ranges.max_x + dims.end_padding / dims.x_spacing * ranges.x_step;
    (start, end)
}
