//! Configuration types for a quality check run.
//!
//! The default project layout mirrors a `scripts/` directory sitting next to
//! `data/` and `reports/`: input and output are resolved relative to a base
//! directory as `../data/sample_data.csv` and
//! `../reports/data_quality_report.xlsx`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Input location relative to the layout base directory.
pub const DEFAULT_INPUT: &str = "../data/sample_data.csv";

/// Output location relative to the layout base directory.
pub const DEFAULT_OUTPUT: &str = "../reports/data_quality_report.xlsx";

/// Configuration for a quality check run.
///
/// Use [`CheckConfig::builder()`] to create a configuration with the fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use quality_check::config::CheckConfig;
///
/// let config = CheckConfig::builder()
///     .input_path("data/orders.csv")
///     .output_path("reports/orders_quality.xlsx")
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// CSV file to audit.
    /// Default: "../data/sample_data.csv"
    pub input_path: PathBuf,

    /// Workbook to create or overwrite.
    /// Default: "../reports/data_quality_report.xlsx"
    pub output_path: PathBuf,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self::from_base_dir(".")
    }
}

impl CheckConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CheckConfigBuilder {
        CheckConfigBuilder::default()
    }

    /// Resolve the default project layout against `base_dir`.
    pub fn from_base_dir(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref();
        Self {
            input_path: base_dir.join(DEFAULT_INPUT),
            output_path: base_dir.join(DEFAULT_OUTPUT),
        }
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("input_path".to_string()));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("output_path".to_string()));
        }

        let is_xlsx = self
            .output_path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
        if !is_xlsx {
            return Err(ConfigValidationError::InvalidOutputExtension(
                self.output_path.clone(),
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Path for '{0}' must not be empty")]
    EmptyPath(String),

    #[error("Output path '{}' must have an .xlsx extension", .0.display())]
    InvalidOutputExtension(PathBuf),
}

/// Builder for [`CheckConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CheckConfigBuilder {
    base_dir: Option<PathBuf>,
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
}

impl CheckConfigBuilder {
    /// Set the base directory used to resolve paths that are not set explicitly.
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Set the CSV file to audit.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the workbook path to write.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CheckConfig` or an error if validation fails.
    pub fn build(self) -> Result<CheckConfig, ConfigValidationError> {
        let base_dir = self.base_dir.unwrap_or_else(|| PathBuf::from("."));
        let layout = CheckConfig::from_base_dir(base_dir);
        let config = CheckConfig {
            input_path: self.input_path.unwrap_or(layout.input_path),
            output_path: self.output_path.unwrap_or(layout.output_path),
        };

        config.validate()?;
        Ok(config)
    }
}
