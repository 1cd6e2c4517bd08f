//! Run summaries: the JSON document printed by `--json` and its text rendering.

use crate::types::{Report, ReportValue};
use crate::utils::truncate_str;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Widest label shown in the text summary before truncation.
const LABEL_DISPLAY_WIDTH: usize = 30;

/// One `Check`/`Result` row of a summarized section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub check: String,
    pub result: ReportValue,
}

/// A summarized section, named after its sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySection {
    pub sheet: String,
    pub rows: Vec<SummaryRow>,
}

/// Machine-readable summary of a run.
///
/// This is what `--json` prints; the section rows match the workbook sheets
/// row for row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Timestamp when the summary was generated
    pub generated_at: String,
    pub input_file: String,
    pub output_file: Option<String>,
    pub rows: usize,
    pub columns: usize,
    /// Columns that took part in the anomaly check
    pub numeric_columns: Vec<String>,
    pub duplicate_count: usize,
    pub is_clean: bool,
    pub sections: Vec<SummarySection>,
}

impl ReportSummary {
    pub fn new(
        input_file: &str,
        output_file: Option<&str>,
        shape: (usize, usize),
        numeric_columns: Vec<String>,
        report: &Report,
    ) -> Self {
        let sections = report
            .sections()
            .iter()
            .map(|section| SummarySection {
                sheet: section.name.clone(),
                rows: section
                    .entries
                    .iter()
                    .map(|entry| SummaryRow {
                        check: entry.label.clone(),
                        result: entry.value.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            output_file: output_file.map(String::from),
            rows: shape.0,
            columns: shape.1,
            numeric_columns,
            duplicate_count: report.duplicate_count(),
            is_clean: report.is_clean(),
            sections,
        }
    }
}

/// Render a human-readable summary, one block per sheet.
pub fn render_text(summary: &ReportSummary) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "DATA QUALITY SUMMARY");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "Input:  {} ({} rows x {} columns)",
        summary.input_file, summary.rows, summary.columns
    );
    if let Some(ref output) = summary.output_file {
        let _ = writeln!(out, "Output: {}", output);
    }
    let _ = writeln!(out);

    for section in &summary.sections {
        let _ = writeln!(out, "{}", section.sheet);
        let _ = writeln!(out, "{}", "-".repeat(40));
        if section.rows.is_empty() {
            let _ = writeln!(out, "  (nothing flagged)");
        }
        for row in &section.rows {
            let _ = writeln!(
                out,
                "  {:<width$} {}",
                truncate_str(&row.check, LABEL_DISPLAY_WIDTH),
                row.result,
                width = LABEL_DISPLAY_WIDTH
            );
        }
        let _ = writeln!(out);
    }

    let verdict = if summary.is_clean {
        "No data quality issues detected"
    } else {
        "Data quality issues detected"
    };
    let _ = writeln!(out, "{}", verdict);
    let _ = write!(out, "{}", rule);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ANOMALIES, DUPLICATES, MISSING_VALUES, ReportSection, TOTAL_DUPLICATES};
    use pretty_assertions::assert_eq;

    fn sample_report() -> Report {
        let mut missing = ReportSection::new(MISSING_VALUES);
        missing.push("email", ReportValue::Count(2));
        let mut duplicates = ReportSection::new(DUPLICATES);
        duplicates.push(TOTAL_DUPLICATES, ReportValue::Count(1));
        Report::new(missing, duplicates, ReportSection::new(ANOMALIES))
    }

    fn sample_summary() -> ReportSummary {
        ReportSummary::new(
            "data/sample.csv",
            Some("reports/out.xlsx"),
            (5, 3),
            vec!["id".to_string()],
            &sample_report(),
        )
    }

    #[test]
    fn test_summary_mirrors_report_sections() {
        let summary = sample_summary();

        let sheets: Vec<_> = summary.sections.iter().map(|s| s.sheet.as_str()).collect();
        assert_eq!(sheets, vec![MISSING_VALUES, DUPLICATES, ANOMALIES]);
        assert_eq!(
            summary.sections[0].rows,
            vec![SummaryRow {
                check: "email".to_string(),
                result: ReportValue::Count(2),
            }]
        );
        assert_eq!(summary.duplicate_count, 1);
        assert!(!summary.is_clean);
    }

    #[test]
    fn test_summary_json_shape() {
        let json = serde_json::to_value(sample_summary()).unwrap();

        assert_eq!(json["rows"], 5);
        assert_eq!(json["sections"][1]["rows"][0]["check"], "Total Duplicates");
        assert_eq!(json["sections"][1]["rows"][0]["result"], 1);
        assert_eq!(json["sections"][2]["rows"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample_summary());

        assert!(text.contains("Input:  data/sample.csv (5 rows x 3 columns)"));
        assert!(text.contains("Output: reports/out.xlsx"));
        assert!(text.contains("Missing Values"));
        assert!(text.contains("email"));
        assert!(text.contains("(nothing flagged)"));
        assert!(text.contains("Data quality issues detected"));
    }
}
