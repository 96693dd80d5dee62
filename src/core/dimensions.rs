use serde::{Deserialize, Serialize};

/// Spacing/padding demands one layer or axis raises during measurement.
///
/// Absent fields leave the accumulator untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionDemands {
    pub x_spacing: Option<f64>,
    pub scalable_start_padding: Option<f64>,
    pub scalable_end_padding: Option<f64>,
    pub unscalable_start_padding: Option<f64>,
    pub unscalable_end_padding: Option<f64>,
}

impl DimensionDemands {
    #[must_use]
    pub fn x_spacing(mut self, value: f64) -> Self {
        self.x_spacing = Some(value);
        self
    }

    #[must_use]
    pub fn scalable_start_padding(mut self, value: f64) -> Self {
        self.scalable_start_padding = Some(value);
        self
    }

    #[must_use]
    pub fn scalable_end_padding(mut self, value: f64) -> Self {
        self.scalable_end_padding = Some(value);
        self
    }

    #[must_use]
    pub fn unscalable_start_padding(mut self, value: f64) -> Self {
        self.unscalable_start_padding = Some(value);
        self
    }

    #[must_use]
    pub fn unscalable_end_padding(mut self, value: f64) -> Self {
        self.unscalable_end_padding = Some(value);
        self
    }
}

/// Shared horizontal layout accumulator.
///
/// Every layer and axis raises its demands during one measurement pass;
/// merging takes the maximum per field so no caller can shrink an earlier
/// caller's requirement. Values are unscaled; [`Self::scaled`] applies zoom.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MutableHorizontalDimensions {
    pub x_spacing: f64,
    pub scalable_start_padding: f64,
    pub scalable_end_padding: f64,
    pub unscalable_start_padding: f64,
    pub unscalable_end_padding: f64,
}

impl MutableHorizontalDimensions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure_values_at_least(&mut self, demands: DimensionDemands) {
        if let Some(value) = demands.x_spacing {
            self.x_spacing = self.x_spacing.max(value);
        }
        if let Some(value) = demands.scalable_start_padding {
            self.scalable_start_padding = self.scalable_start_padding.max(value);
        }
        if let Some(value) = demands.scalable_end_padding {
            self.scalable_end_padding = self.scalable_end_padding.max(value);
        }
        if let Some(value) = demands.unscalable_start_padding {
            self.unscalable_start_padding = self.unscalable_start_padding.max(value);
        }
        if let Some(value) = demands.unscalable_end_padding {
            self.unscalable_end_padding = self.unscalable_end_padding.max(value);
        }
    }

    /// Resets all fields ahead of a new measurement pass.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Resolves the accumulated demands into draw-phase pixel values.
    #[must_use]
    pub fn scaled(&self, zoom: f64) -> HorizontalDimensions {
        HorizontalDimensions {
            x_spacing: self.x_spacing * zoom,
            start_padding: self.scalable_start_padding * zoom + self.unscalable_start_padding,
            end_padding: self.scalable_end_padding * zoom + self.unscalable_end_padding,
        }
    }
}

/// Pixel-space horizontal layout for one draw pass, zoom already applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HorizontalDimensions {
    /// Pixels per `x_step`.
    pub x_spacing: f64,
    pub start_padding: f64,
    pub end_padding: f64,
}

impl HorizontalDimensions {
    /// Total content width for the given x-value count.
    #[must_use]
    pub fn content_width(&self, x_span_in_steps: f64) -> f64 {
        self.start_padding + self.x_spacing * x_span_in_steps + self.end_padding
    }
}
