//! Report output module.
//!
//! - [`WorkbookReporter`] writes the report as a workbook, one sheet per
//!   section with `Check` and `Result` columns.
//! - [`ReportSummary`] is the serializable summary printed by `--json`, and
//!   [`render_text`] its human-readable form.
//!
//! # Example
//!
//! ```rust,ignore
//! use quality_check::reporting::WorkbookReporter;
//!
//! let report = DataQualityAnalyzer::analyze(&table)?;
//! WorkbookReporter::write(&report, Path::new("reports/data_quality_report.xlsx"))?;
//! ```

mod summary;
mod workbook;

pub use summary::{ReportSummary, SummaryRow, SummarySection, render_text};
pub use workbook::{
    CHECK_HEADER, ILLEGAL_SHEET_CHARS, MAX_SHEET_NAME_LEN, RESULT_HEADER, WorkbookReporter,
    check_sheet_name,
};
