//! Shared utilities for the quality check.
//!
//! This module contains helpers used across the loader, analyzer and
//! reporters to keep type classification and text handling consistent.

use crate::types::ColumnKind;
use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is an integer type.
#[inline]
pub fn is_integer_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Check if a DataType is a floating point type.
#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Map a polars DataType onto the column kind used by the analyzer.
///
/// Booleans, dates and strings all collapse into [`ColumnKind::Text`].
pub fn column_kind(dtype: &DataType) -> ColumnKind {
    if is_integer_dtype(dtype) {
        ColumnKind::Integer
    } else if is_float_dtype(dtype) {
        ColumnKind::Float
    } else {
        ColumnKind::Text
    }
}

// =============================================================================
// Missing Value Markers
// =============================================================================

/// Cell contents that load as null, in addition to empty fields.
///
/// These are the markers spreadsheet exports and dataframe tools write for
/// absent values.
pub const NULL_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// =============================================================================
// Text Utilities
// =============================================================================

/// Truncate a string to max length (in characters) with ellipsis.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

// =============================================================================
// Tests
// =============================================================================
