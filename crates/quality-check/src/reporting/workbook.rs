use crate::error::{QualityError, Result};
use crate::types::{Report, ReportSection, ReportValue};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Header of the label column on every sheet.
pub const CHECK_HEADER: &str = "Check";
/// Header of the value column on every sheet.
pub const RESULT_HEADER: &str = "Result";

/// Longest sheet name a workbook accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;
/// Characters a sheet name may not contain.
pub const ILLEGAL_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

const MIN_COLUMN_WIDTH: usize = 10;
const MAX_COLUMN_WIDTH: usize = 80;

/// Writes a [`Report`] as a workbook with one two-column sheet per section.
pub struct WorkbookReporter;

impl WorkbookReporter {
    /// Write `report` to `path`, replacing any existing file.
    ///
    /// The parent directory must already exist; it is not created.
    pub fn write(report: &Report, path: &Path) -> Result<PathBuf> {
        Self::validate_sheet_names(report, path)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.is_dir()
        {
            return Err(QualityError::Write {
                path: path.to_path_buf(),
                reason: format!("output directory '{}' does not exist", parent.display()),
            });
        }

        let mut workbook = Self::build_workbook(report).map_err(|e| write_error(path, e))?;
        workbook.save(path).map_err(|e| write_error(path, e))?;

        info!("Report saved: {}", path.display());
        Ok(path.to_path_buf())
    }

    /// Render `report` as workbook bytes without touching the filesystem.
    pub fn to_buffer(report: &Report) -> Result<Vec<u8>> {
        let target = Path::new("<memory>");
        Self::validate_sheet_names(report, target)?;

        let mut workbook = Self::build_workbook(report).map_err(|e| write_error(target, e))?;
        workbook
            .save_to_buffer()
            .map_err(|e| write_error(target, e))
    }

    fn validate_sheet_names(report: &Report, path: &Path) -> Result<()> {
        for section in report.sections() {
            if let Err(reason) = check_sheet_name(&section.name) {
                return Err(QualityError::Write {
                    path: path.to_path_buf(),
                    reason,
                });
            }
        }
        Ok(())
    }

    fn build_workbook(report: &Report) -> std::result::Result<Workbook, XlsxError> {
        let header_format = Format::new()
            .set_bold()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Center);

        let mut workbook = Workbook::new();
        for section in report.sections() {
            let worksheet = workbook.add_worksheet();
            Self::write_section(worksheet, section, &header_format)?;
            debug!(
                "Sheet '{}' written with {} rows",
                section.name,
                section.len()
            );
        }

        Ok(workbook)
    }

    fn write_section(
        worksheet: &mut Worksheet,
        section: &ReportSection,
        header_format: &Format,
    ) -> std::result::Result<(), XlsxError> {
        worksheet.set_name(&section.name)?;
        worksheet.write_string_with_format(0, 0, CHECK_HEADER, header_format)?;
        worksheet.write_string_with_format(0, 1, RESULT_HEADER, header_format)?;

        let mut label_width = CHECK_HEADER.len();
        let mut value_width = RESULT_HEADER.len();

        for (row, entry) in (1u32..).zip(&section.entries) {
            worksheet.write_string(row, 0, &entry.label)?;
            match &entry.value {
                ReportValue::Count(n) => worksheet.write_number(row, 1, *n as f64)?,
                ReportValue::Text(text) => worksheet.write_string(row, 1, text)?,
            };

            label_width = label_width.max(entry.label.chars().count());
            value_width = value_width.max(entry.value.to_string().chars().count());
        }

        worksheet.set_column_width(0, column_width(label_width))?;
        worksheet.set_column_width(1, column_width(value_width))?;
        Ok(())
    }
}

/// Check a sheet name against the workbook limits.
pub fn check_sheet_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("sheet name must not be empty".to_string());
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(format!(
            "sheet name '{}' exceeds {} characters",
            name, MAX_SHEET_NAME_LEN
        ));
    }
    if let Some(c) = name.chars().find(|c| ILLEGAL_SHEET_CHARS.contains(c)) {
        return Err(format!("sheet name '{}' contains illegal character '{}'", name, c));
    }
    Ok(())
}

fn column_width(chars: usize) -> f64 {
    (chars + 2).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH) as f64
}

fn write_error(path: &Path, error: XlsxError) -> QualityError {
    QualityError::Write {
        path: path.to_path_buf(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ANOMALIES, DUPLICATES, MISSING_VALUES, TOTAL_DUPLICATES};

    fn report_with_sheet_names(names: [&str; 3]) -> Report {
        let mut duplicates = ReportSection::new(names[1]);
        duplicates.push(TOTAL_DUPLICATES, ReportValue::Count(0));
        Report::new(
            ReportSection::new(names[0]),
            duplicates,
            ReportSection::new(names[2]),
        )
    }

    #[test]
    fn test_check_sheet_name() {
        assert!(check_sheet_name(MISSING_VALUES).is_ok());
        assert!(check_sheet_name(DUPLICATES).is_ok());
        assert!(check_sheet_name(ANOMALIES).is_ok());
        assert!(check_sheet_name("").is_err());
        assert!(check_sheet_name("a/b").is_err());
        assert!(check_sheet_name(&"x".repeat(32)).is_err());
        assert!(check_sheet_name(&"x".repeat(31)).is_ok());
    }

    #[test]
    fn test_column_width_is_clamped() {
        assert_eq!(column_width(1), 10.0);
        assert_eq!(column_width(20), 22.0);
        assert_eq!(column_width(500), 80.0);
    }

    #[test]
    fn test_to_buffer_produces_zip_container() {
        let report = report_with_sheet_names([MISSING_VALUES, DUPLICATES, ANOMALIES]);
        let bytes = WorkbookReporter::to_buffer(&report).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_invalid_sheet_name_is_write_error() {
        let report = report_with_sheet_names([MISSING_VALUES, "Dupes?", ANOMALIES]);
        let result = WorkbookReporter::to_buffer(&report);
        assert!(matches!(result, Err(QualityError::Write { .. })));
    }

    #[test]
    fn test_missing_output_directory_is_write_error() {
        let report = report_with_sheet_names([MISSING_VALUES, DUPLICATES, ANOMALIES]);
        let path = Path::new("no/such/directory/report.xlsx");

        let result = WorkbookReporter::write(&report, path);

        match result {
            Err(QualityError::Write { path: failed, reason }) => {
                assert_eq!(failed, path);
                assert!(reason.contains("does not exist"));
            }
            other => panic!("expected write error, got {:?}", other),
        }
        assert!(!path.exists());
    }
}
