//! cartesian-chart: layout and rendering pipeline for 2D Cartesian charts.
//!
//! This crate computes chart geometry (column and candlestick layers, a
//! horizontal axis with pluggable item placement) from immutable data
//! snapshots and emits backend-agnostic render frames. Data updates animate
//! through normalized drawing models interpolated between the old and new
//! snapshot; pan, zoom, and right-to-left layout are applied at draw time.

pub mod anim;
pub mod axis;
pub mod chart;
pub mod core;
pub mod error;
pub mod layer;
pub mod marker;
pub mod render;
pub mod telemetry;

pub use chart::{CartesianChart, ChartLayer, LayerModel};
pub use error::{ChartError, ChartResult};
