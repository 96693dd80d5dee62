use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel-space rectangle a chart element draws inside.
///
/// Layers and axes each receive their own bounds within the host canvas, so
/// the rect is float-valued and may sit anywhere on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        let finite = self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite();
        if !finite || self.right < self.left || self.bottom < self.top {
            return Err(ChartError::InvalidBounds {
                left: self.left,
                top: self.top,
                right: self.right,
                bottom: self.bottom,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    /// Logical start edge: left for LTR, right for RTL.
    #[must_use]
    pub fn start(self, direction: LayoutDirection) -> f64 {
        match direction {
            LayoutDirection::Ltr => self.left,
            LayoutDirection::Rtl => self.right,
        }
    }

    #[must_use]
    pub fn contains_x(self, x: f64) -> bool {
        x >= self.left && x <= self.right
    }

    /// Whether a column/body rect overlaps these bounds.
    #[must_use]
    pub fn intersects_rect(self, left: f64, top: f64, right: f64, bottom: f64) -> bool {
        left <= self.right && right >= self.left && top <= self.bottom && bottom >= self.top
    }

    #[must_use]
    pub fn clamp_y(self, y: f64) -> f64 {
        y.clamp(self.top, self.bottom)
    }
}

/// Horizontal layout direction of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

impl LayoutDirection {
    #[must_use]
    pub const fn is_ltr(self) -> bool {
        matches!(self, Self::Ltr)
    }

    /// Sign applied to logical-to-visual horizontal offsets.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Ltr => 1.0,
            Self::Rtl => -1.0,
        }
    }
}

/// Read-only pan/zoom state sampled at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanZoom {
    /// Horizontal scroll in pixels.
    pub scroll: f64,
    /// Zoom multiplier. Values below `MIN_ZOOM` are clamped on construction.
    pub zoom: f64,
}

impl PanZoom {
    pub const MIN_ZOOM: f64 = 0.1;

    #[must_use]
    pub fn new(scroll: f64, zoom: f64) -> Self {
        Self {
            scroll,
            zoom: if zoom.is_finite() {
                zoom.max(Self::MIN_ZOOM)
            } else {
                1.0
            },
        }
    }
}

impl Default for PanZoom {
    fn default() -> Self {
        Self {
            scroll: 0.0,
            zoom: 1.0,
        }
    }
}

/// Identifies the vertical axis a layer's y range is bound to.
///
/// Layers without an explicit key share the global y range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VerticalAxisKey {
    Start,
    End,
}

/// Side of the plot a horizontal axis is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisPosition {
    Top,
    Bottom,
}
