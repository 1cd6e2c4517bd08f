//! Data Quality Check Library
//!
//! A one-shot audit of a CSV dataset, built with Rust and Polars, that
//! writes its findings to a multi-sheet workbook.
//!
//! # Overview
//!
//! A run is three steps, strictly in sequence:
//!
//! - **Loading**: the CSV is read fully into memory and every column is tagged
//!   as integer, float or text ([`ColumnKind`])
//! - **Analysis**: three independent checks
//!   - *Missing Values*: per-column count of absent cells, only columns with at
//!     least one
//!   - *Duplicates*: number of rows repeating an earlier row across all columns
//!   - *Anomalies*: negative and zero counts for numeric columns that have any
//! - **Reporting**: one sheet per check, each a `Check` / `Result` table
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use quality_check::{CheckConfig, QualityCheck};
//!
//! let config = CheckConfig::builder()
//!     .input_path("data/sample_data.csv")
//!     .output_path("reports/data_quality_report.xlsx")
//!     .build()?;
//!
//! let outcome = QualityCheck::new(config).run()?;
//! println!("Duplicates: {}", outcome.report.duplicate_count());
//! ```
//!
//! # Using the pieces directly
//!
//! ```rust,ignore
//! use quality_check::{DataQualityAnalyzer, Loader, WorkbookReporter};
//!
//! let table = Loader::load(Path::new("orders.csv"))?;
//! let report = DataQualityAnalyzer::analyze(&table)?;
//!
//! for entry in &report.anomalies().entries {
//!     println!("{}: {}", entry.label, entry.value);
//! }
//!
//! WorkbookReporter::write(&report, Path::new("orders_quality.xlsx"))?;
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod quality;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{CheckConfig, CheckConfigBuilder, ConfigValidationError};
pub use error::{QualityError, Result as QualityResult};
pub use loader::Loader;
pub use pipeline::{CheckOutcome, QualityCheck, run_quality_check};
pub use quality::{AnomalyCounts, DataQualityAnalyzer};
pub use reporting::{ReportSummary, WorkbookReporter, render_text};
pub use types::{
    ANOMALIES, ColumnKind, ColumnSchema, DUPLICATES, MISSING_VALUES, Report, ReportEntry,
    ReportSection, ReportValue, TOTAL_DUPLICATES, Table,
};
pub use utils::{NULL_MARKERS, column_kind};
