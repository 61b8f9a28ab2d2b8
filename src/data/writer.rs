//! Consolidated Table Writer
//! Persists the consolidated table and reports a run summary.

use crate::data::record::{Region, SalesRecord, SalesTable};
use crate::stats::format_currency;
use chrono::NaiveDate;
use polars::prelude::*;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Number of rows shown in the summary preview.
pub const PREVIEW_ROWS: usize = 10;

#[derive(Error, Debug)]
pub enum WriterError {
    #[error("Cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Writes the consolidated table as `Sales,Date,Region`.
pub struct SalesWriter;

impl SalesWriter {
    /// Convert the table to a Polars frame with the output column order.
    pub fn to_dataframe(table: &SalesTable) -> Result<DataFrame, WriterError> {
        let sales: Vec<f64> = table.iter().map(|r| r.sales).collect();
        let dates: Vec<String> = table
            .iter()
            .map(|r| r.date.format("%Y-%m-%d").to_string())
            .collect();
        let regions: Vec<&str> = table.iter().map(|r| r.region.as_str()).collect();

        let df = DataFrame::new(vec![
            Column::new("Sales".into(), sales),
            Column::new("Date".into(), dates),
            Column::new("Region".into(), regions),
        ])?;

        Ok(df)
    }

    /// Write the table to `path` with a header row and no index column.
    pub fn write_csv(table: &SalesTable, path: impl AsRef<Path>) -> Result<(), WriterError> {
        let path = path.as_ref();
        let mut df = Self::to_dataframe(table)?;

        let mut file = File::create(path).map_err(|source| WriterError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .finish(&mut df)?;

        info!(path = %path.display(), rows = table.len(), "Output saved");
        Ok(())
    }
}

/// Human-readable report of one ETL run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub row_count: usize,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub regions: Vec<Region>,
    pub total_sales: f64,
    pub preview: Vec<SalesRecord>,
}

impl RunSummary {
    pub fn from_table(table: &SalesTable) -> Self {
        Self {
            row_count: table.len(),
            date_range: table.date_range(),
            regions: table.regions(),
            total_sales: crate::stats::total_sales(table),
            preview: table.iter().take(PREVIEW_ROWS).copied().collect(),
        }
    }

    /// Emit the summary on the diagnostic stream.
    pub fn log(&self) {
        info!("Total rows: {}", self.row_count);
        match self.date_range {
            Some((first, last)) => info!("Date range: {} → {}", first, last),
            None => info!("Date range: (empty)"),
        }
        let regions: Vec<&str> = self.regions.iter().map(|r| r.as_str()).collect();
        info!("Regions: {:?}", regions);
        info!("Total Sales: {}", format_currency(self.total_sales));
        info!("Preview:\n{}", self);
    }
}

/// Renders the preview rows as a fixed-width table.
impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>12}  {:<10}  {}", "Sales", "Date", "Region")?;
        for record in &self.preview {
            writeln!(
                f,
                "{:>12.2}  {}  {}",
                record.sales, record.date, record.region
            )?;
        }
        Ok(())
    }
}
