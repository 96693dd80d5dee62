use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

pub(crate) fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp() as f64 + f64::from(time.timestamp_subsec_nanos()) / 1e9
}

pub(crate) fn decimal_to_f64(value: Decimal, name: &str) -> ChartResult<f64> {
    value
        .to_f64()
        .filter(|converted| converted.is_finite())
        .ok_or_else(|| {
            ChartError::InvalidData(format!("decimal `{name}` is not representable as f64"))
        })
}

/// One plotted column data point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnEntry {
    pub x: f64,
    pub y: f64,
}

impl ColumnEntry {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        Ok(Self {
            x: datetime_to_unix_seconds(time),
            y: decimal_to_f64(value, "value")?,
        })
    }
}

/// Direction of a candle's price movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Change {
    Bullish,
    Neutral,
    Bearish,
}

impl Change {
    /// Classifies `new` against `old`.
    #[must_use]
    pub fn between(old: f64, new: f64) -> Self {
        if new > old {
            Self::Bullish
        } else if new < old {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }
}

/// One plotted candlestick data point.
///
/// Callers are expected to uphold `low <= min(open, close)` and
/// `max(open, close) <= high`; the layout math tolerates violations without
/// panicking but draws whatever geometry the values imply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleEntry {
    pub x: f64,
    pub open: f64,
    pub close: f64,
    pub low: f64,
    pub high: f64,
    /// Close vs. open of this entry.
    pub absolute_change: Change,
    /// Close vs. the previous entry's close. `Neutral` for the first entry.
    pub relative_change: Change,
}

impl CandleEntry {
    /// Builds an entry with `relative_change` derived from the previous close,
    /// if any.
    #[must_use]
    pub fn new(
        x: f64,
        open: f64,
        close: f64,
        low: f64,
        high: f64,
        previous_close: Option<f64>,
    ) -> Self {
        Self {
            x,
            open,
            close,
            low,
            high,
            absolute_change: Change::between(open, close),
            relative_change: previous_close
                .map_or(Change::Neutral, |previous| Change::between(previous, close)),
        }
    }

    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        close: Decimal,
        low: Decimal,
        high: Decimal,
        previous_close: Option<f64>,
    ) -> ChartResult<Self> {
        Ok(Self::new(
            datetime_to_unix_seconds(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(close, "close")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(high, "high")?,
            previous_close,
        ))
    }
}
