use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::core::entry::{CandleEntry, ColumnEntry};
use crate::error::{ChartError, ChartResult};

/// Identity token distinguishing logical datasets across snapshot updates.
///
/// A host hands updates of the same logical dataset the same id (via
/// [`ColumnModel::with_id`] and friends) so it can tell "new data for the
/// chart I'm showing" apart from "a different chart", e.g. to avoid
/// re-running entrance animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelId(u64);

impl ModelId {
    /// Returns a process-globally unique id.
    #[must_use]
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

const GCD_THRESHOLD: f64 = 1e-9;

fn float_gcd(a: f64, b: f64) -> f64 {
    let mut a = a.abs();
    let mut b = b.abs();
    while b > GCD_THRESHOLD {
        let remainder = a % b;
        a = b;
        b = remainder;
    }
    a
}

/// GCD of consecutive x deltas, folded across all series. Defaults to 1 when
/// no series has two entries.
fn x_delta_gcd<'a, I>(series: I) -> f64
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut gcd: Option<f64> = None;
    for xs in series {
        for pair in xs.windows(2) {
            let delta = pair[1] - pair[0];
            gcd = Some(gcd.map_or(delta, |current| float_gcd(current, delta)));
        }
    }
    match gcd {
        Some(value) if value > GCD_THRESHOLD => value,
        _ => 1.0,
    }
}

fn validate_x_order(xs: &[f64], what: &str) -> ChartResult<()> {
    for pair in xs.windows(2) {
        if !(pair[1] > pair[0]) {
            return Err(ChartError::InvalidData(format!(
                "{what} x values must be finite and strictly increasing"
            )));
        }
    }
    if xs.iter().any(|x| !x.is_finite()) {
        return Err(ChartError::InvalidData(format!(
            "{what} x values must be finite and strictly increasing"
        )));
    }
    Ok(())
}

/// Immutable column-data snapshot: one or more series plus precomputed
/// aggregate bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnModel {
    pub series: Vec<Vec<ColumnEntry>>,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    /// Most negative per-x sum of negative y values across series (<= 0).
    pub min_aggregate_y: f64,
    /// Largest per-x sum of positive y values across series (>= 0).
    pub max_aggregate_y: f64,
    pub x_step: f64,
    pub id: ModelId,
}

impl ColumnModel {
    pub fn new(series: Vec<Vec<ColumnEntry>>) -> ChartResult<Self> {
        Self::with_id(series, ModelId::fresh())
    }

    pub fn with_id(series: Vec<Vec<ColumnEntry>>, id: ModelId) -> ChartResult<Self> {
        if series.iter().all(Vec::is_empty) {
            return Err(ChartError::InvalidData(
                "column model must contain at least one entry".to_owned(),
            ));
        }

        let mut min_x = f64::MAX;
        let mut max_x = f64::MIN;
        let mut min_y = f64::MAX;
        let mut max_y = f64::MIN;

        let mut x_buffers: Vec<Vec<f64>> = Vec::with_capacity(series.len());
        for entries in &series {
            let xs: Vec<f64> = entries.iter().map(|entry| entry.x).collect();
            validate_x_order(&xs, "column series")?;
            for entry in entries {
                if !entry.y.is_finite() {
                    return Err(ChartError::InvalidData(
                        "column y values must be finite".to_owned(),
                    ));
                }
                min_x = min_x.min(entry.x);
                max_x = max_x.max(entry.x);
                min_y = min_y.min(entry.y);
                max_y = max_y.max(entry.y);
            }
            x_buffers.push(xs);
        }

        // Per-x positive/negative sums across series drive the stacked range.
        let mut aggregates: Vec<(f64, f64, f64)> = Vec::new();
        for entries in &series {
            for entry in entries {
                match aggregates.binary_search_by(|probe| probe.0.total_cmp(&entry.x)) {
                    Ok(index) => {
                        if entry.y >= 0.0 {
                            aggregates[index].1 += entry.y;
                        } else {
                            aggregates[index].2 += entry.y;
                        }
                    }
                    Err(index) => {
                        let (positive, negative) = if entry.y >= 0.0 {
                            (entry.y, 0.0)
                        } else {
                            (0.0, entry.y)
                        };
                        aggregates.insert(index, (entry.x, positive, negative));
                    }
                }
            }
        }
        let max_aggregate_y = aggregates
            .iter()
            .map(|(_, positive, _)| *positive)
            .fold(0.0f64, f64::max);
        let min_aggregate_y = aggregates
            .iter()
            .map(|(_, _, negative)| *negative)
            .fold(0.0f64, f64::min);

        let x_step = x_delta_gcd(x_buffers.iter().map(Vec::as_slice));

        Ok(Self {
            series,
            min_x,
            max_x,
            min_y,
            max_y,
            min_aggregate_y,
            max_aggregate_y,
            x_step,
            id,
        })
    }
}

/// Immutable candlestick-data snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlestickModel {
    pub series: Vec<CandleEntry>,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub x_step: f64,
    pub id: ModelId,
}

impl CandlestickModel {
    pub fn new(series: Vec<CandleEntry>) -> ChartResult<Self> {
        Self::with_id(series, ModelId::fresh())
    }

    pub fn with_id(series: Vec<CandleEntry>, id: ModelId) -> ChartResult<Self> {
        if series.is_empty() {
            return Err(ChartError::InvalidData(
                "candlestick model must contain at least one entry".to_owned(),
            ));
        }

        let xs: Vec<f64> = series.iter().map(|entry| entry.x).collect();
        validate_x_order(&xs, "candlestick series")?;

        let mut min_y = f64::MAX;
        let mut max_y = f64::MIN;
        for entry in &series {
            min_y = min_y.min(entry.low);
            max_y = max_y.max(entry.high);
        }

        let min_x = xs[0];
        let max_x = xs[xs.len() - 1];
        let x_step = x_delta_gcd(std::iter::once(xs.as_slice()));

        Ok(Self {
            series,
            min_x,
            max_x,
            min_y,
            max_y,
            x_step,
            id,
        })
    }

    /// Builds entries from `(x, open, close, low, high)` tuples, deriving each
    /// entry's relative change from its predecessor's close.
    pub fn from_ohlc(values: &[(f64, f64, f64, f64, f64)]) -> ChartResult<Self> {
        let mut series = Vec::with_capacity(values.len());
        let mut previous_close = None;
        for &(x, open, close, low, high) in values {
            series.push(CandleEntry::new(x, open, close, low, high, previous_close));
            previous_close = Some(close);
        }
        Self::new(series)
    }
}
