use serde::{Deserialize, Serialize};

/// Font parameters used for measurement and label emission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub size_px: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self { size_px: 12.0 }
    }
}

/// Measures laid-out text without drawing it.
///
/// The core never reads pixels back from the surface, but axis and data-label
/// layout need text extents up front. Hosts with a real text stack implement
/// this against it; tests and headless use rely on the heuristic measurer.
pub trait TextMeasurer {
    /// Width of `text` in pixels, rotation already applied.
    fn width(&self, text: &str, font: FontSpec, rotation_degrees: f64) -> f64;

    /// Height of `text` when wrapped at `max_width` pixels.
    fn height(&self, text: &str, font: FontSpec, max_width: f64, rotation_degrees: f64) -> f64;
}

/// Character-count estimate of text extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeuristicTextMeasurer {
    /// Glyph advance as a fraction of the font size.
    pub char_width_factor: f64,
    /// Line height as a fraction of the font size.
    pub line_height_factor: f64,
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_factor: 0.6,
            line_height_factor: 1.2,
        }
    }
}

impl HeuristicTextMeasurer {
    fn unrotated_width(&self, text: &str, font: FontSpec) -> f64 {
        text.chars().count() as f64 * font.size_px * self.char_width_factor
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn width(&self, text: &str, font: FontSpec, rotation_degrees: f64) -> f64 {
        let width = self.unrotated_width(text, font);
        let height = font.size_px * self.line_height_factor;
        let radians = rotation_degrees.to_radians();
        width * radians.cos().abs() + height * radians.sin().abs()
    }

    fn height(&self, text: &str, font: FontSpec, max_width: f64, rotation_degrees: f64) -> f64 {
        let width = self.unrotated_width(text, font);
        let line_height = font.size_px * self.line_height_factor;
        let lines = if max_width > 0.0 && max_width.is_finite() {
            (width / max_width).ceil().max(1.0)
        } else {
            1.0
        };
        let unrotated = lines * line_height;
        let radians = rotation_degrees.to_radians();
        width * radians.sin().abs() + unrotated * radians.cos().abs()
    }
}
