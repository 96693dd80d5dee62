use serde::{Deserialize, Serialize};

use crate::render::{Color, FontSpec};

/// Visual style of a vertical line component: columns, wicks, ticks, and
/// guidelines all share it. Thickness is unscaled; zoom is applied where the
/// layer's contract says so.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub thickness: f64,
    pub color: Color,
    pub corner_radius: f64,
}

impl LineStyle {
    #[must_use]
    pub const fn new(thickness: f64, color: Color) -> Self {
        Self {
            thickness,
            color,
            corner_radius: 0.0,
        }
    }

    #[must_use]
    pub const fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }
}

/// Label styling shared by axis labels and data labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: FontSpec,
    pub color: Color,
    pub rotation_degrees: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: FontSpec::default(),
            color: Color::rgb(0.0, 0.0, 0.0),
            rotation_degrees: 0.0,
        }
    }
}

/// Extra horizontal padding a layer reserves around its content.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerPadding {
    pub scalable_start: f64,
    pub scalable_end: f64,
    pub unscalable_start: f64,
    pub unscalable_end: f64,
}

/// Vertical anchoring of a label relative to its reference y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalPosition {
    Top,
    Bottom,
}

impl VerticalPosition {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    /// Flips the position when the label would leave `(top, bottom)`.
    #[must_use]
    pub fn in_bounds(self, y: f64, top: f64, bottom: f64, component_height: f64) -> Self {
        match self {
            Self::Top if y - component_height < top => Self::Bottom,
            Self::Bottom if y + component_height > bottom => Self::Top,
            position => position,
        }
    }
}

/// Formats data values into label text.
pub trait ValueFormatter {
    fn format(&self, value: f64) -> String;
}

/// Decimal formatter trimming insignificant trailing zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalFormatter {
    pub max_decimal_digits: usize,
}

impl Default for DecimalFormatter {
    fn default() -> Self {
        Self {
            max_decimal_digits: 2,
        }
    }
}

impl ValueFormatter for DecimalFormatter {
    fn format(&self, value: f64) -> String {
        let mut text = format!("{:.*}", self.max_decimal_digits, value);
        if text.contains('.') {
            while text.ends_with('0') {
                text.pop();
            }
            if text.ends_with('.') {
                text.pop();
            }
        }
        // Avoid the "-0" rendering for negative values rounded to zero.
        if text == "-0" { "0".to_owned() } else { text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_formatter_trims_trailing_zeros() {
        let formatter = DecimalFormatter::default();
        assert_eq!(formatter.format(3.0), "3");
        assert_eq!(formatter.format(3.50), "3.5");
        assert_eq!(formatter.format(-2.25), "-2.25");
        assert_eq!(formatter.format(-0.001), "0");
    }
}
