use serde::{Deserialize, Serialize};

use crate::core::types::VerticalAxisKey;

/// Frozen y bounds for one vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YRange {
    pub min_y: f64,
    pub max_y: f64,
}

impl YRange {
    #[must_use]
    pub fn length(self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Frozen min/max bounds for one draw pass.
///
/// Produced by [`MutableChartRanges::to_immutable`]; all layers and axes of a
/// chart consume the same snapshot so their pixel math stays aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRanges {
    pub min_x: f64,
    pub max_x: f64,
    pub x_step: f64,
    global_y: YRange,
    keyed_y: Vec<(VerticalAxisKey, YRange)>,
}

impl ChartRanges {
    /// Defined empty snapshot used when no layer reported data.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min_x: 0.0,
            max_x: 0.0,
            x_step: 1.0,
            global_y: YRange {
                min_y: 0.0,
                max_y: 0.0,
            },
            keyed_y: Vec::new(),
        }
    }

    /// Y range for the given axis key, falling back to the global range.
    #[must_use]
    pub fn y_range(&self, axis: Option<VerticalAxisKey>) -> YRange {
        axis.and_then(|key| {
            self.keyed_y
                .iter()
                .find(|(candidate, _)| *candidate == key)
                .map(|(_, range)| *range)
        })
        .unwrap_or(self.global_y)
    }

    #[must_use]
    pub fn x_length(&self) -> f64 {
        self.max_x - self.min_x
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct MutableYRange {
    min_y: f64,
    max_y: f64,
}

impl MutableYRange {
    const UNSET: Self = Self {
        min_y: f64::MAX,
        max_y: f64::MIN,
    };

    fn widen(&mut self, min_y: f64, max_y: f64) {
        self.min_y = self.min_y.min(min_y);
        self.max_y = self.max_y.max(max_y);
    }

    fn is_set(self) -> bool {
        self.min_y <= self.max_y
    }

    fn freeze(self) -> YRange {
        YRange {
            min_y: self.min_y,
            max_y: self.max_y,
        }
    }
}

/// Mutable range accumulator for the collection phase of a pass.
///
/// Updates fold via pure min/max, so the frozen result is independent of the
/// order in which layers report their contributions.
#[derive(Debug, Clone, PartialEq)]
pub struct MutableChartRanges {
    min_x: f64,
    max_x: f64,
    x_step: Option<f64>,
    global_y: MutableYRange,
    keyed_y: Vec<(VerticalAxisKey, MutableYRange)>,
}

impl Default for MutableChartRanges {
    fn default() -> Self {
        Self::new()
    }
}

impl MutableChartRanges {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_x: f64::MAX,
            max_x: f64::MIN,
            x_step: None,
            global_y: MutableYRange::UNSET,
            keyed_y: Vec::new(),
        }
    }

    /// Widens the accumulated bounds. With an `axis` key, the y part goes to
    /// that axis's range instead of the global one.
    pub fn try_update(
        &mut self,
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
        axis: Option<VerticalAxisKey>,
    ) {
        self.min_x = self.min_x.min(min_x);
        self.max_x = self.max_x.max(max_x);
        match axis {
            None => self.global_y.widen(min_y, max_y),
            Some(key) => {
                match self
                    .keyed_y
                    .binary_search_by_key(&key, |(candidate, _)| *candidate)
                {
                    Ok(index) => self.keyed_y[index].1.widen(min_y, max_y),
                    Err(index) => {
                        let mut range = MutableYRange::UNSET;
                        range.widen(min_y, max_y);
                        self.keyed_y.insert(index, (key, range));
                    }
                }
            }
        }
    }

    /// Folds a proposed x step into the accumulator. Finer steps win, which is
    /// commutative across layers.
    pub fn try_update_x_step(&mut self, x_step: f64) {
        if !x_step.is_finite() || x_step <= 0.0 {
            return;
        }
        self.x_step = Some(match self.x_step {
            Some(current) => current.min(x_step),
            None => x_step,
        });
    }

    /// Clears to the sentinel "unset" state ahead of a new collection pass.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Freezes the accumulator for the draw phase. Returns the defined empty
    /// snapshot when no update was recorded.
    #[must_use]
    pub fn to_immutable(&self) -> ChartRanges {
        if self.min_x > self.max_x {
            return ChartRanges::empty();
        }
        let global_y = if self.global_y.is_set() {
            self.global_y.freeze()
        } else {
            YRange {
                min_y: 0.0,
                max_y: 0.0,
            }
        };
        ChartRanges {
            min_x: self.min_x,
            max_x: self.max_x,
            x_step: self.x_step.unwrap_or(1.0),
            global_y,
            keyed_y: self
                .keyed_y
                .iter()
                .filter(|(_, range)| range.is_set())
                .map(|(key, range)| (*key, range.freeze()))
                .collect(),
        }
    }
}
