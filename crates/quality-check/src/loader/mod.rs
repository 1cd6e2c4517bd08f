//! CSV loading.
//!
//! Reads a delimited file with a header row fully into memory and tags each
//! column with its [`ColumnKind`](crate::types::ColumnKind).
//!
//! Every field is read as a string first. Each column is then typed from its
//! whitespace-trimmed values: integer if all of them fit in `i64`, float if
//! all of them parse as `f64`, text otherwise. A single non-numeric value
//! anywhere in a column makes it text instead of failing the parse, and an
//! integer too large for `i64` makes it float.

use crate::error::{QualityError, Result};
use crate::types::Table;
use crate::utils::NULL_MARKERS;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Loads CSV input into a [`Table`].
pub struct Loader;

impl Loader {
    /// Load a CSV file from disk.
    ///
    /// Returns [`QualityError::InputNotFound`] when `path` is not an existing
    /// file and [`QualityError::Parse`] when the content is not valid CSV.
    pub fn load(path: &Path) -> Result<Table> {
        if !path.is_file() {
            return Err(QualityError::InputNotFound(path.to_path_buf()));
        }

        info!("Loading dataset from: {}", path.display());

        let frame = Self::read_options()
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .and_then(|reader| reader.finish())
            .and_then(Self::infer_columns)
            .map_err(|source| QualityError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::into_table(frame))
    }

    /// Load CSV content held in memory.
    pub fn load_from_str(content: &str) -> Result<Table> {
        let cursor = Cursor::new(content.as_bytes().to_vec());
        let frame = Self::read_options()
            .into_reader_with_file_handle(cursor)
            .finish()
            .and_then(Self::infer_columns)
            .map_err(|source| QualityError::Parse {
                path: "<memory>".into(),
                source,
            })?;

        Ok(Self::into_table(frame))
    }

    fn read_options() -> CsvReadOptions {
        let null_values: Vec<PlSmallStr> = NULL_MARKERS
            .iter()
            .map(|marker| PlSmallStr::from(*marker))
            .collect();

        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_parse_options(
                CsvParseOptions::default()
                    .with_quote_char(Some(b'"'))
                    .with_null_values(Some(NullValues::AllColumns(null_values))),
            )
    }

    /// Retype the all-string frame column by column.
    fn infer_columns(frame: DataFrame) -> PolarsResult<DataFrame> {
        let columns = frame
            .get_columns()
            .iter()
            .map(Self::infer_column)
            .collect::<PolarsResult<Vec<_>>>()?;

        DataFrame::new(columns)
    }

    /// Integer, then float, then the untouched strings.
    ///
    /// A column without any present value stays text.
    fn infer_column(column: &Column) -> PolarsResult<Column> {
        let values = column.as_materialized_series().str()?;
        let trimmed: Vec<Option<&str>> = values
            .into_iter()
            .map(|value| value.map(str::trim))
            .collect();

        if trimmed.iter().all(Option::is_none) {
            return Ok(column.clone());
        }

        let name = column.name().clone();

        if let Ok(ints) = Self::parse_all::<i64>(&trimmed) {
            return Ok(Series::new(name, ints).into_column());
        }
        if let Ok(floats) = Self::parse_all::<f64>(&trimmed) {
            return Ok(Series::new(name, floats).into_column());
        }

        Ok(column.clone())
    }

    fn parse_all<T: FromStr>(
        values: &[Option<&str>],
    ) -> std::result::Result<Vec<Option<T>>, T::Err> {
        values
            .iter()
            .map(|value| value.map(str::parse::<T>).transpose())
            .collect()
    }

    fn into_table(frame: DataFrame) -> Table {
        let table = Table::new(frame);
        info!("Dataset loaded successfully: {:?}", table.shape());

        if table.height() == 0 {
            warn!("Dataset has a header but no rows");
        }
        for column in table.schema() {
            debug!("Column '{}' inferred as {}", column.name, column.kind);
        }

        table
    }
}
