//! CSV Data Loader Module
//! Reads raw sales extracts and the consolidated table using Polars.

use crate::data::record::{parse_date, Region, SalesRecord, SalesTable};
use polars::prelude::*;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Columns every raw extract must provide.
pub const RAW_COLUMNS: [&str; 5] = ["product", "date", "region", "quantity", "price"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("{}: missing required column {column:?}", path.display())]
    MissingColumn { path: PathBuf, column: String },
    #[error("{}:{line}: {reason}", path.display())]
    InvalidRow {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// One row of a raw extract, before any cleaning.
///
/// Cells are kept as read; nulls stay `None` so the processor decides what
/// a missing value means for its row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub product: Option<String>,
    pub date: Option<String>,
    pub region: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
}

/// A raw extract loaded from one file.
#[derive(Debug, Clone)]
pub struct RawExtract {
    /// Where the rows came from, for error messages.
    pub source: PathBuf,
    pub rows: Vec<RawRow>,
}

impl RawExtract {
    pub fn new(source: impl Into<PathBuf>, rows: Vec<RawRow>) -> Self {
        Self {
            source: source.into(),
            rows,
        }
    }
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// `infer_rows` of `Some(0)` reads every column as text.
    fn read_frame(path: &Path, infer_rows: Option<usize>) -> Result<DataFrame, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::FileNotFound(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(infer_rows)
            .finish()?
            .collect()?;

        Ok(df)
    }

    fn require_columns(df: &DataFrame, path: &Path, columns: &[&str]) -> Result<(), LoaderError> {
        match columns.iter().find(|name| df.column(name).is_err()) {
            Some(missing) => Err(LoaderError::MissingColumn {
                path: path.to_path_buf(),
                column: missing.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Read a column as optional strings whatever dtype Polars inferred.
    fn string_cells(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
        let column = df.column(name)?.cast(&DataType::String)?;
        let cells = column
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();
        Ok(cells)
    }

    fn float_cells(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
        let column = df.column(name)?.cast(&DataType::Float64)?;
        let cells = column.f64()?.into_iter().collect();
        Ok(cells)
    }

    /// Load a single raw extract.
    ///
    /// Cells are read as text without type inference, so a quantity like
    /// `2.5` reaches the processor verbatim instead of being coerced.
    pub fn load_extract(path: impl AsRef<Path>) -> Result<RawExtract, LoaderError> {
        let path = path.as_ref();
        let df = Self::read_frame(path, Some(0))?;
        Self::require_columns(&df, path, &RAW_COLUMNS)?;

        let products = Self::string_cells(&df, "product")?;
        let dates = Self::string_cells(&df, "date")?;
        let regions = Self::string_cells(&df, "region")?;
        let quantities = Self::string_cells(&df, "quantity")?;
        let prices = Self::string_cells(&df, "price")?;

        let rows: Vec<RawRow> = products
            .into_iter()
            .zip(dates)
            .zip(regions)
            .zip(quantities)
            .zip(prices)
            .map(|((((product, date), region), quantity), price)| RawRow {
                product,
                date,
                region,
                quantity,
                price,
            })
            .collect();

        debug!(path = %path.display(), rows = rows.len(), "Loaded raw extract");
        Ok(RawExtract::new(path, rows))
    }

    /// Load several extracts in parallel. Output order follows `paths`.
    pub fn load_extracts<P>(paths: &[P]) -> Result<Vec<RawExtract>, LoaderError>
    where
        P: AsRef<Path> + Sync,
    {
        paths.par_iter().map(|path| Self::load_extract(path)).collect()
    }

    /// Load a consolidated table previously written by the ETL pass.
    pub fn load_consolidated(path: impl AsRef<Path>) -> Result<SalesTable, LoaderError> {
        let path = path.as_ref();
        let df = Self::read_frame(path, Some(10000))?;
        Self::require_columns(&df, path, &["Sales", "Date", "Region"])?;

        let sales = Self::float_cells(&df, "Sales")?;
        let dates = Self::string_cells(&df, "Date")?;
        let regions = Self::string_cells(&df, "Region")?;

        // Record index to file line; assumes no embedded newlines in cells.
        let invalid = |idx: usize, reason: String| LoaderError::InvalidRow {
            path: path.to_path_buf(),
            line: idx + 2,
            reason,
        };

        let mut records = Vec::with_capacity(sales.len());
        for (idx, ((sales, date), region)) in sales.into_iter().zip(dates).zip(regions).enumerate() {
            let sales = sales
                .filter(|v| v.is_finite() && *v >= 0.0)
                .ok_or_else(|| invalid(idx, "missing or invalid Sales value".to_string()))?;
            let date = date
                .as_deref()
                .and_then(parse_date)
                .ok_or_else(|| invalid(idx, format!("invalid Date {:?}", date)))?;
            let region = region
                .as_deref()
                .ok_or_else(|| invalid(idx, "missing Region".to_string()))?
                .parse::<Region>()
                .map_err(|e| invalid(idx, e.to_string()))?;

            records.push(SalesRecord {
                sales,
                date,
                region,
            });
        }

        debug!(path = %path.display(), rows = records.len(), "Loaded consolidated table");
        Ok(SalesTable::new(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_csv(name: &str, content: &str) -> PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_extract_keeps_raw_cells() {
        let path = temp_csv(
            "morsel_loader_raw.csv",
            "product,price,quantity,date,region\n\
             pink morsel,$3.00,546,2018-02-06,north\n\
             gold morsel,$9.99,2,2018-02-06,south\n",
        );

        let extract = DataLoader::load_extract(&path).unwrap();
        assert_eq!(extract.rows.len(), 2);
        assert_eq!(extract.rows[0].product.as_deref(), Some("pink morsel"));
        assert_eq!(extract.rows[0].price.as_deref(), Some("$3.00"));
        assert_eq!(extract.rows[0].quantity.as_deref(), Some("546"));
        assert_eq!(extract.rows[1].region.as_deref(), Some("south"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_extract_keeps_fractional_quantity_text() {
        let path = temp_csv(
            "morsel_loader_fractional.csv",
            "product,price,quantity,date,region\n\
             pink morsel,$2.00,2.5,2021-01-10,north\n\
             pink morsel,$2.00,3,2021-01-11,north\n",
        );

        let extract = DataLoader::load_extract(&path).unwrap();
        let quantities: Vec<Option<&str>> = extract.rows.iter().map(|r| r.quantity.as_deref()).collect();
        assert_eq!(quantities, vec![Some("2.5"), Some("3")]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_extract_missing_file() {
        let path = env::temp_dir().join("morsel_loader_does_not_exist.csv");
        let err = DataLoader::load_extract(&path).unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
    }

    #[test]
    fn test_load_extract_missing_column() {
        let path = temp_csv(
            "morsel_loader_no_price.csv",
            "product,quantity,date,region\npink morsel,1,2021-01-01,east\n",
        );

        let err = DataLoader::load_extract(&path).unwrap_err();
        match err {
            LoaderError::MissingColumn { column, .. } => assert_eq!(column, "price"),
            other => panic!("unexpected error: {other}"),
        }

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_consolidated_sorts_and_parses() {
        let path = temp_csv(
            "morsel_loader_consolidated.csv",
            "Sales,Date,Region\n7.5,2021-01-11,east\n10.0,2021-01-10,north\n",
        );

        let table = DataLoader::load_consolidated(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].region, Region::North);
        assert_eq!(table.records()[0].sales, 10.0);
        assert_eq!(table.records()[1].sales, 7.5);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_consolidated_rejects_unknown_region() {
        let path = temp_csv(
            "morsel_loader_bad_region.csv",
            "Sales,Date,Region\n1.0,2021-01-10,central\n",
        );

        let err = DataLoader::load_consolidated(&path).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidRow { line: 2, .. }));

        fs::remove_file(&path).unwrap();
    }
}
