//! Custom error types for the data quality check.
//!
//! This module provides the error hierarchy using `thiserror` so every
//! failure of a run (missing input, malformed CSV, unwritable workbook)
//! carries enough context to be reported to the user.
//!
//! Errors are serializable so they can be emitted as part of a JSON summary.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for a quality check run.
#[derive(Error, Debug)]
pub enum QualityError {
    /// The input path does not point at an existing file.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The input exists but is not well-formed delimited text.
    #[error("Failed to parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: polars::error::PolarsError,
    },

    /// The workbook could not be written.
    #[error("Failed to write report to '{}': {reason}", path.display())]
    Write { path: PathBuf, reason: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Column was not found in the table.
    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl QualityError {
    /// Get a stable error code for machine-readable output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InputNotFound(_) => "INPUT_NOT_FOUND",
            Self::Parse { .. } => "PARSE_ERROR",
            Self::Write { .. } => "WRITE_ERROR",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::Polars(_) => "POLARS_ERROR",
        }
    }

    /// Check if this error is the explicit missing-input case.
    ///
    /// The CLI treats this one as a clean halt rather than a failure.
    pub fn is_input_not_found(&self) -> bool {
        matches!(self, Self::InputNotFound(_))
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for QualityError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("QualityError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for quality check operations.
pub type Result<T> = std::result::Result<T, QualityError>;
