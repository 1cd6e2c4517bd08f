//! The end-to-end run: load, analyze, write.

use crate::config::CheckConfig;
use crate::error::{QualityError, Result};
use crate::loader::Loader;
use crate::quality::DataQualityAnalyzer;
use crate::reporting::{ReportSummary, WorkbookReporter};
use crate::types::Report;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub report: Report,
    /// (rows, columns) of the input table
    pub table_shape: (usize, usize),
    /// Columns that took part in the anomaly check
    pub numeric_columns: Vec<String>,
    pub output_path: PathBuf,
}

impl CheckOutcome {
    /// Build the serializable summary of this run.
    pub fn summary(&self, input_path: &Path) -> ReportSummary {
        ReportSummary::new(
            &input_path.display().to_string(),
            Some(&self.output_path.display().to_string()),
            self.table_shape,
            self.numeric_columns.clone(),
            &self.report,
        )
    }
}

/// A configured quality check, run once.
#[derive(Debug, Clone)]
pub struct QualityCheck {
    config: CheckConfig,
}

static_assertions::assert_impl_all!(QualityCheck: Send, Sync);
static_assertions::assert_impl_all!(CheckOutcome: Send, Sync);

impl QualityCheck {
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Load the input, run every check, then write the workbook.
    ///
    /// Nothing is written unless loading and analysis both succeed.
    pub fn run(&self) -> Result<CheckOutcome> {
        self.config
            .validate()
            .map_err(|e| QualityError::InvalidConfig(e.to_string()))?;

        let input = &self.config.input_path;
        if !input.is_file() {
            return Err(QualityError::InputNotFound(input.clone()));
        }

        let start = Instant::now();

        let table = Loader::load(input)?;
        let report = DataQualityAnalyzer::analyze(&table)?;
        let output_path = WorkbookReporter::write(&report, &self.config.output_path)?;

        info!(
            "Quality check finished in {}ms: {} flagged columns, {} duplicate rows",
            start.elapsed().as_millis(),
            report.flagged_count(),
            report.duplicate_count()
        );

        Ok(CheckOutcome {
            table_shape: table.shape(),
            numeric_columns: table.numeric_columns().map(|c| c.name.clone()).collect(),
            report,
            output_path,
        })
    }
}

/// Run a quality check on `input`, writing the workbook to `output`.
pub fn run_quality_check(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<CheckOutcome> {
    let config = CheckConfig::builder()
        .input_path(input.as_ref())
        .output_path(output.as_ref())
        .build()
        .map_err(|e| QualityError::InvalidConfig(e.to_string()))?;

    QualityCheck::new(config).run()
}
