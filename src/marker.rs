//! Screen-space hit regions linking rendered elements back to data entries.
//!
//! Each layer rebuilds its marker-target map wholesale every draw pass; an
//! external tooltip/crosshair consumer reads it afterwards. Absence of an x
//! value (culled or out of range) is a valid, non-error state.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CandleEntry, ColumnEntry};
use crate::render::Color;

/// One column's hit descriptor within a column marker target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnTarget {
    pub entry: ColumnEntry,
    pub canvas_y: f64,
    pub color: Color,
}

/// Hit descriptors for the columns rendered at one x value.
///
/// Grouped layers append one target per series; stacked layers accumulate all
/// columns into a single target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMarkerTarget {
    pub x: f64,
    pub canvas_x: f64,
    pub columns: SmallVec<[ColumnTarget; 4]>,
}

/// Hit descriptor for the candle rendered at one x value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleMarkerTarget {
    pub x: f64,
    pub canvas_x: f64,
    pub entry: CandleEntry,
    pub opening_canvas_y: f64,
    pub closing_canvas_y: f64,
    pub low_canvas_y: f64,
    pub high_canvas_y: f64,
    pub body_color: Color,
    pub wick_color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkerTarget {
    Column(ColumnMarkerTarget),
    Candle(CandleMarkerTarget),
}

/// Per-x-value marker targets for one layer, in x order.
pub type MarkerTargets = IndexMap<OrderedFloat<f64>, Vec<MarkerTarget>>;
