use crate::error::{QualityError, Result};
use crate::utils::column_kind;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sheet name for the missing-value section.
pub const MISSING_VALUES: &str = "Missing Values";
/// Sheet name for the duplicate-row section.
pub const DUPLICATES: &str = "Duplicates";
/// Sheet name for the zero/negative section.
pub const ANOMALIES: &str = "Anomalies";
/// Label of the single entry in the duplicate-row section.
pub const TOTAL_DUPLICATES: &str = "Total Duplicates";

// ============================================================================
// Table
// ============================================================================

/// Column type tag computed once when the table is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    Integer,
    Float,
    /// Anything that is not integer or floating point.
    Text,
}

impl ColumnKind {
    /// Integer and float columns take part in the anomaly check.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub kind: ColumnKind,
}

/// In-memory dataset: the loaded frame plus its per-column type tags.
///
/// The schema is in source column order and never changes after
/// construction.
#[derive(Debug, Clone)]
pub struct Table {
    frame: DataFrame,
    schema: Vec<ColumnSchema>,
}

impl Table {
    pub fn new(frame: DataFrame) -> Self {
        let schema = frame
            .get_columns()
            .iter()
            .map(|col| ColumnSchema {
                name: col.name().to_string(),
                kind: column_kind(col.dtype()),
            })
            .collect();

        Self { frame, schema }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn schema(&self) -> &[ColumnSchema] {
        &self.schema
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.schema.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    /// Columns tagged as integer or float, in source order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.schema.iter().filter(|col| col.kind.is_numeric())
    }

    pub fn column(&self, name: &str) -> Result<&Series> {
        self.frame
            .column(name)
            .map(|col| col.as_materialized_series())
            .map_err(|_| QualityError::ColumnNotFound(name.to_string()))
    }
}

// ============================================================================
// Report
// ============================================================================

/// Value cell of a report row.
///
/// Counts are written as numeric cells, text as string cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportValue {
    Count(usize),
    Text(String),
}

impl ReportValue {
    pub fn as_count(&self) -> Option<usize> {
        match self {
            Self::Count(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for ReportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub label: String,
    pub value: ReportValue,
}

impl ReportEntry {
    pub fn new(label: impl Into<String>, value: ReportValue) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// One named section of the report, written as one sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub name: String,
    pub entries: Vec<ReportEntry>,
}

impl ReportSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: ReportValue) {
        self.entries.push(ReportEntry::new(label, value));
    }

    /// Look up the value recorded for `label`.
    pub fn get(&self, label: &str) -> Option<&ReportValue> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| &entry.value)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of one analysis run: missing values, duplicates and anomalies,
/// always in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(
        missing_values: ReportSection,
        duplicates: ReportSection,
        anomalies: ReportSection,
    ) -> Self {
        Self {
            sections: vec![missing_values, duplicates, anomalies],
        }
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|section| section.name == name)
    }

    pub fn missing_values(&self) -> &ReportSection {
        &self.sections[0]
    }

    pub fn duplicates(&self) -> &ReportSection {
        &self.sections[1]
    }

    pub fn anomalies(&self) -> &ReportSection {
        &self.sections[2]
    }

    /// Number of duplicate rows, zero if the entry is absent.
    pub fn duplicate_count(&self) -> usize {
        self.duplicates()
            .get(TOTAL_DUPLICATES)
            .and_then(ReportValue::as_count)
            .unwrap_or(0)
    }

    /// Number of flagged columns across the missing-value and anomaly sections.
    pub fn flagged_count(&self) -> usize {
        self.missing_values().len() + self.anomalies().len()
    }

    /// True when nothing was flagged.
    pub fn is_clean(&self) -> bool {
        self.flagged_count() == 0 && self.duplicate_count() == 0
    }
}
