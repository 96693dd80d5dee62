use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// X values key drawing-model maps; insertion order is x order.
pub type XKey = OrderedFloat<f64>;

#[inline]
pub(crate) fn lerp(old: f64, new: f64, fraction: f64) -> f64 {
    old + (new - old) * fraction
}

/// Normalized per-entry geometry that can be blended pointwise.
pub trait DrawingInfo: Copy {
    /// Pointwise linear interpolation of every field, including `alpha`.
    fn lerp(self, new: Self, fraction: f64) -> Self;

    fn alpha(self) -> f64;

    fn with_alpha(self, alpha: f64) -> Self;
}

/// Normalized column geometry: height as a fraction of the layer height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub height: f64,
    pub alpha: f64,
}

impl ColumnInfo {
    #[must_use]
    pub fn new(height: f64) -> Self {
        Self { height, alpha: 1.0 }
    }
}

impl DrawingInfo for ColumnInfo {
    fn lerp(self, new: Self, fraction: f64) -> Self {
        Self {
            height: lerp(self.height, new.height, fraction),
            alpha: lerp(self.alpha, new.alpha, fraction),
        }
    }

    fn alpha(self) -> f64 {
        self.alpha
    }

    fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }
}

/// Normalized candle geometry, all fields fractions of the layer height
/// measured up from the layer bottom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleInfo {
    pub body_top_y: f64,
    pub body_bottom_y: f64,
    pub top_wick_y: f64,
    pub bottom_wick_y: f64,
    pub alpha: f64,
}

impl CandleInfo {
    #[must_use]
    pub fn new(body_top_y: f64, body_bottom_y: f64, top_wick_y: f64, bottom_wick_y: f64) -> Self {
        Self {
            body_top_y,
            body_bottom_y,
            top_wick_y,
            bottom_wick_y,
            alpha: 1.0,
        }
    }
}

impl DrawingInfo for CandleInfo {
    fn lerp(self, new: Self, fraction: f64) -> Self {
        Self {
            body_top_y: lerp(self.body_top_y, new.body_top_y, fraction),
            body_bottom_y: lerp(self.body_bottom_y, new.body_bottom_y, fraction),
            top_wick_y: lerp(self.top_wick_y, new.top_wick_y, fraction),
            bottom_wick_y: lerp(self.bottom_wick_y, new.bottom_wick_y, fraction),
            alpha: lerp(self.alpha, new.alpha, fraction),
        }
    }

    fn alpha(self) -> f64 {
        self.alpha
    }

    fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }
}

/// Blends two x-keyed info maps.
///
/// Entries present in both maps interpolate pointwise. Entries only in `new`
/// keep their geometry and fade in (`alpha = fraction`); entries only in
/// `old` keep their geometry and fade out (`alpha = 1 - fraction`).
fn interpolate_entries<T: DrawingInfo>(
    old: &IndexMap<XKey, T>,
    new: &IndexMap<XKey, T>,
    fraction: f64,
) -> IndexMap<XKey, T> {
    let mut out = IndexMap::with_capacity(new.len());
    for (x, new_info) in new {
        let interpolated = match old.get(x) {
            Some(old_info) => old_info.lerp(*new_info, fraction),
            None => new_info.with_alpha(new_info.alpha() * fraction),
        };
        out.insert(*x, interpolated);
    }
    for (x, old_info) in old {
        if !new.contains_key(x) {
            out.insert(*x, old_info.with_alpha(old_info.alpha() * (1.0 - fraction)));
        }
    }
    out
}

/// A layer's normalized drawing model, the unit of animation.
pub trait DrawingModel: Clone {
    fn interpolate(old: &Self, new: &Self, fraction: f64) -> Self;

    fn opacity(&self) -> f64;

    fn with_opacity(&self, opacity: f64) -> Self;
}

/// Column drawing model: one x-keyed map per series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDrawingModel {
    pub series: Vec<IndexMap<XKey, ColumnInfo>>,
    pub opacity: f64,
}

impl ColumnDrawingModel {
    #[must_use]
    pub fn new(series: Vec<IndexMap<XKey, ColumnInfo>>) -> Self {
        Self {
            series,
            opacity: 1.0,
        }
    }

    #[must_use]
    pub fn info(&self, series_index: usize, x: f64) -> Option<ColumnInfo> {
        self.series
            .get(series_index)
            .and_then(|entries| entries.get(&OrderedFloat(x)))
            .copied()
    }
}

impl DrawingModel for ColumnDrawingModel {
    fn interpolate(old: &Self, new: &Self, fraction: f64) -> Self {
        let series = (0..new.series.len().max(old.series.len()))
            .map(|index| {
                let empty = IndexMap::new();
                let old_entries = old.series.get(index).unwrap_or(&empty);
                let new_entries = new.series.get(index).unwrap_or(&empty);
                interpolate_entries(old_entries, new_entries, fraction)
            })
            .collect();
        Self {
            series,
            opacity: lerp(old.opacity, new.opacity, fraction),
        }
    }

    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn with_opacity(&self, opacity: f64) -> Self {
        Self {
            series: self.series.clone(),
            opacity,
        }
    }
}

/// Candlestick drawing model: one x-keyed map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleDrawingModel {
    pub entries: IndexMap<XKey, CandleInfo>,
    pub opacity: f64,
}

impl CandleDrawingModel {
    #[must_use]
    pub fn new(entries: IndexMap<XKey, CandleInfo>) -> Self {
        Self {
            entries,
            opacity: 1.0,
        }
    }

    #[must_use]
    pub fn info(&self, x: f64) -> Option<CandleInfo> {
        self.entries.get(&OrderedFloat(x)).copied()
    }
}

impl DrawingModel for CandleDrawingModel {
    fn interpolate(old: &Self, new: &Self, fraction: f64) -> Self {
        Self {
            entries: interpolate_entries(&old.entries, &new.entries, fraction),
            opacity: lerp(old.opacity, new.opacity, fraction),
        }
    }

    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn with_opacity(&self, opacity: f64) -> Self {
        Self {
            entries: self.entries.clone(),
            opacity,
        }
    }
}

/// Blends an old and a new drawing model over an animation run.
///
/// Pure given `(old, new, fraction)`: `transform` never mutates the staged
/// models, so repeated calls with the same fraction agree.
#[derive(Debug, Clone, Default)]
pub struct DrawingModelInterpolator<M> {
    old: Option<M>,
    new: Option<M>,
}

impl<M: DrawingModel> DrawingModelInterpolator<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            old: None,
            new: None,
        }
    }

    /// Stages a transition. `new == None` means the layer should fade out and
    /// stop rendering.
    pub fn set_models(&mut self, old: Option<M>, new: Option<M>) {
        self.old = old;
        self.new = new;
    }

    /// Produces the model for one animation frame.
    ///
    /// `fraction` is clamped into `[0, 1]`. At `1` the result is exactly the
    /// staged `new` model (or `None`), so the interpolator can be dropped.
    #[must_use]
    pub fn transform(&self, fraction: f64) -> Option<M> {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            1.0
        };
        match (&self.old, &self.new) {
            (None, None) => None,
            (Some(old), None) => {
                if fraction >= 1.0 {
                    None
                } else {
                    Some(old.with_opacity(old.opacity() * (1.0 - fraction)))
                }
            }
            (None, Some(new)) => {
                if fraction >= 1.0 {
                    Some(new.clone())
                } else {
                    Some(new.with_opacity(new.opacity() * fraction))
                }
            }
            (Some(old), Some(new)) => {
                if fraction >= 1.0 {
                    Some(new.clone())
                } else if fraction <= 0.0 {
                    Some(old.clone())
                } else {
                    Some(M::interpolate(old, new, fraction))
                }
            }
        }
    }
}
