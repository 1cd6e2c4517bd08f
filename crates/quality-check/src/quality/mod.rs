//! Data quality analysis module.
//!
//! This module computes the three independent checks of a run: missing
//! values per column, duplicate rows, and zero/negative values in numeric
//! columns.

mod analyzer;

pub use analyzer::{AnomalyCounts, DataQualityAnalyzer};
