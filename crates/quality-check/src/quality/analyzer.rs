use crate::error::Result;
use crate::types::{
    ANOMALIES, ColumnKind, DUPLICATES, MISSING_VALUES, Report, ReportSection, ReportValue,
    TOTAL_DUPLICATES, Table,
};
use polars::prelude::*;
use std::fmt;
use tracing::debug;

/// Negative and zero counts for one numeric column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnomalyCounts {
    pub negatives: usize,
    pub zeros: usize,
}

impl AnomalyCounts {
    /// A column is reported when it has at least one negative or zero value.
    pub fn is_flagged(&self) -> bool {
        self.negatives > 0 || self.zeros > 0
    }
}

impl fmt::Display for AnomalyCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} negative, {} zero values", self.negatives, self.zeros)
    }
}

pub struct DataQualityAnalyzer;

impl DataQualityAnalyzer {
    /// Run all three checks against `table`.
    ///
    /// Each check runs regardless of what the others found, and none of them
    /// modifies the table.
    pub fn analyze(table: &Table) -> Result<Report> {
        let missing_values = Self::missing_values(table)?;
        let duplicates = Self::duplicate_rows(table)?;
        let anomalies = Self::numeric_anomalies(table)?;

        Ok(Report::new(missing_values, duplicates, anomalies))
    }

    /// Columns with at least one absent cell, in source order.
    pub fn missing_values(table: &Table) -> Result<ReportSection> {
        let mut section = ReportSection::new(MISSING_VALUES);

        for column in table.schema() {
            let series = table.column(&column.name)?;
            let missing = Self::missing_count(series, column.kind)?;
            debug!("Column '{}': {} missing values", column.name, missing);

            if missing > 0 {
                section.push(column.name.clone(), ReportValue::Count(missing));
            }
        }

        Ok(section)
    }

    /// Number of rows that repeat an earlier row across every column.
    pub fn duplicate_rows(table: &Table) -> Result<ReportSection> {
        let duplicates = Self::count_duplicate_rows(table.frame())?;
        debug!("Found {} duplicate rows", duplicates);

        let mut section = ReportSection::new(DUPLICATES);
        section.push(TOTAL_DUPLICATES, ReportValue::Count(duplicates));
        Ok(section)
    }

    /// Numeric columns containing negative or zero values, in source order.
    pub fn numeric_anomalies(table: &Table) -> Result<ReportSection> {
        let mut section = ReportSection::new(ANOMALIES);

        for column in table.numeric_columns() {
            let counts = Self::count_anomalies(table.column(&column.name)?)?;
            debug!(
                "Column '{}': {} negative, {} zero",
                column.name, counts.negatives, counts.zeros
            );

            if counts.is_flagged() {
                section.push(column.name.clone(), ReportValue::Text(counts.to_string()));
            }
        }

        Ok(section)
    }

    /// Nulls, plus NaN for float columns.
    fn missing_count(series: &Series, kind: ColumnKind) -> Result<usize> {
        let mut missing = series.null_count();

        if kind == ColumnKind::Float {
            let floats = series.cast(&DataType::Float64)?;
            missing += floats
                .f64()?
                .into_iter()
                .flatten()
                .filter(|v| v.is_nan())
                .count();
        }

        Ok(missing)
    }

    /// The first occurrence of a row is kept, every later copy counts.
    fn count_duplicate_rows(df: &DataFrame) -> Result<usize> {
        if df.height() == 0 || df.width() == 0 {
            return Ok(0);
        }

        let unique = df.unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?;
        Ok(df.height() - unique.height())
    }

    /// Absent values are skipped.
    pub fn count_anomalies(series: &Series) -> Result<AnomalyCounts> {
        let floats = series.cast(&DataType::Float64)?;
        let mut counts = AnomalyCounts::default();

        for value in floats.f64()?.into_iter().flatten() {
            if value < 0.0 {
                counts.negatives += 1;
            } else if value == 0.0 {
                counts.zeros += 1;
            }
        }

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReportEntry;
    use pretty_assertions::assert_eq;

    fn entries(section: &ReportSection) -> Vec<(String, ReportValue)> {
        section
            .entries
            .iter()
            .map(|ReportEntry { label, value }| (label.clone(), value.clone()))
            .collect()
    }

    // ==================== analyze tests ====================

    #[test]
    fn test_analyze_id_qty_scenario() {
        let df = df![
            "id" => [1i64, 2, 3, 1],
            "qty" => [5i64, -3, 0, 5],
        ]
        .unwrap();
        let table = Table::new(df);

        let report = DataQualityAnalyzer::analyze(&table).unwrap();

        assert!(report.missing_values().is_empty());
        assert_eq!(
            entries(report.duplicates()),
            vec![(TOTAL_DUPLICATES.to_string(), ReportValue::Count(1))]
        );
        assert_eq!(
            entries(report.anomalies()),
            vec![(
                "qty".to_string(),
                ReportValue::Text("1 negative, 1 zero values".to_string())
            )]
        );
    }

    #[test]
    fn test_analyze_does_not_modify_table() {
        let df = df![
            "a" => [Some(1i64), None, Some(-1)],
            "b" => [Some("x"), Some("x"), None],
        ]
        .unwrap();
        let table = Table::new(df.clone());

        DataQualityAnalyzer::analyze(&table).unwrap();

        assert!(table.frame().equals_missing(&df));
    }

    #[test]
    fn test_analyze_zero_rows() {
        let df = df![
            "id" => Vec::<i64>::new(),
            "name" => Vec::<String>::new(),
        ]
        .unwrap();
        let report = DataQualityAnalyzer::analyze(&Table::new(df)).unwrap();

        assert!(report.missing_values().is_empty());
        assert_eq!(report.duplicate_count(), 0);
        assert!(report.anomalies().is_empty());
        assert!(report.is_clean());
    }

    // ==================== missing_values tests ====================

    #[test]
    fn test_missing_values_only_positive_counts() {
        let df = df![
            "id" => [1i64, 2, 3, 4, 5],
            "email" => [Some("a@x"), None, Some("c@x"), None, Some("e@x")],
            "score" => [Some(1.0f64), Some(2.0), Some(3.0), Some(4.0), Some(5.0)],
        ]
        .unwrap();

        let section = DataQualityAnalyzer::missing_values(&Table::new(df)).unwrap();

        assert_eq!(
            entries(&section),
            vec![("email".to_string(), ReportValue::Count(2))]
        );
    }

    #[test]
    fn test_missing_values_follow_column_order() {
        let df = df![
            "z" => [None, Some(1i64)],
            "a" => [None::<&str>, None],
            "m" => [Some(1.0f64), None],
        ]
        .unwrap();

        let section = DataQualityAnalyzer::missing_values(&Table::new(df)).unwrap();

        let labels: Vec<_> = section.labels().collect();
        assert_eq!(labels, vec!["z", "a", "m"]);
        assert_eq!(section.get("a"), Some(&ReportValue::Count(2)));
    }

    #[test]
    fn test_missing_values_counts_nan_in_float_columns() {
        let df = df!["ratio" => [Some(0.5f64), Some(f64::NAN), None]].unwrap();

        let section = DataQualityAnalyzer::missing_values(&Table::new(df)).unwrap();

        assert_eq!(section.get("ratio"), Some(&ReportValue::Count(2)));
    }

    // ==================== duplicate_rows tests ====================

    #[test]
    fn test_duplicates_need_every_column_to_match() {
        let df = df![
            "id" => [1i64, 1, 1],
            "city" => ["Oslo", "Oslo", "Bergen"],
        ]
        .unwrap();

        let section = DataQualityAnalyzer::duplicate_rows(&Table::new(df)).unwrap();

        assert_eq!(section.get(TOTAL_DUPLICATES), Some(&ReportValue::Count(1)));
    }

    #[test]
    fn test_duplicates_count_repeats_not_first_occurrence() {
        let df = df!["v" => [7i64, 7, 7, 7]].unwrap();

        let section = DataQualityAnalyzer::duplicate_rows(&Table::new(df)).unwrap();

        assert_eq!(section.get(TOTAL_DUPLICATES), Some(&ReportValue::Count(3)));
    }

    #[test]
    fn test_duplicates_treat_nulls_as_equal() {
        let df = df![
            "a" => [Some(1i64), Some(1), Some(2)],
            "b" => [None::<&str>, None, None],
        ]
        .unwrap();

        let section = DataQualityAnalyzer::duplicate_rows(&Table::new(df)).unwrap();

        assert_eq!(section.get(TOTAL_DUPLICATES), Some(&ReportValue::Count(1)));
    }

    #[test]
    fn test_duplicates_entry_present_when_none_found() {
        let df = df!["v" => [1i64, 2, 3]].unwrap();

        let section = DataQualityAnalyzer::duplicate_rows(&Table::new(df)).unwrap();

        assert_eq!(
            entries(&section),
            vec![(TOTAL_DUPLICATES.to_string(), ReportValue::Count(0))]
        );
    }

    // ==================== numeric_anomalies tests ====================

    #[test]
    fn test_anomalies_skip_text_columns() {
        let df = df![
            "name" => ["-1", "0", "zero"],
            "flag" => [true, false, true],
        ]
        .unwrap();

        let section = DataQualityAnalyzer::numeric_anomalies(&Table::new(df)).unwrap();

        assert!(section.is_empty());
    }

    #[test]
    fn test_anomalies_omit_clean_columns() {
        let df = df![
            "price" => [1.5f64, 0.0, -2.25, -0.5],
            "stock" => [1i64, 2, 3, 4],
        ]
        .unwrap();

        let section = DataQualityAnalyzer::numeric_anomalies(&Table::new(df)).unwrap();

        assert_eq!(
            entries(&section),
            vec![(
                "price".to_string(),
                ReportValue::Text("2 negative, 1 zero values".to_string())
            )]
        );
    }

    #[test]
    fn test_anomalies_ignore_missing_values() {
        let df = df!["qty" => [None, Some(0i64), None, Some(3)]].unwrap();

        let counts =
            DataQualityAnalyzer::count_anomalies(df.column("qty").unwrap().as_materialized_series())
                .unwrap();

        assert_eq!(counts, AnomalyCounts { negatives: 0, zeros: 1 });
        assert!(counts.is_flagged());
    }

    #[test]
    fn test_anomaly_counts_display() {
        let counts = AnomalyCounts { negatives: 3, zeros: 0 };
        assert_eq!(counts.to_string(), "3 negative, 0 zero values");
        assert!(!AnomalyCounts::default().is_flagged());
    }

    // ==================== bounds ====================

    #[test]
    fn test_counts_are_bounded_by_row_count() {
        let df = df![
            "a" => [Some(-1i64), Some(-1), None, Some(0), Some(-1), Some(0)],
            "b" => [None::<f64>, None, None, None, None, None],
            "c" => ["x", "x", "x", "x", "x", "x"],
        ]
        .unwrap();
        let table = Table::new(df);
        let rows = table.height();

        let report = DataQualityAnalyzer::analyze(&table).unwrap();

        for entry in &report.missing_values().entries {
            let count = entry.value.as_count().unwrap();
            assert!(count > 0 && count <= rows);
        }
        assert!(report.duplicate_count() <= rows - 1);
        for column in table.numeric_columns() {
            let counts = DataQualityAnalyzer::count_anomalies(table.column(&column.name).unwrap())
                .unwrap();
            assert!(counts.negatives + counts.zeros <= rows);
        }
        assert_eq!(report.missing_values().get("b"), Some(&ReportValue::Count(6)));
    }
}
