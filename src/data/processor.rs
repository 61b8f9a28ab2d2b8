//! Data Processor Module
//! Cleans raw extracts into the consolidated sales table.

use crate::data::loader::{RawExtract, RawRow};
use crate::data::record::{parse_date, Region, SalesRecord, SalesTable};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Currency symbol stripped from raw price cells.
pub const CURRENCY_SYMBOL: char = '$';

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessorError {
    #[error("{}:{line}: unparsable price {raw:?}", file.display())]
    InvalidPrice {
        file: PathBuf,
        line: usize,
        raw: String,
    },
    #[error("{}:{line}: quantity {raw:?} is not a non-negative integer", file.display())]
    InvalidQuantity {
        file: PathBuf,
        line: usize,
        raw: String,
    },
    #[error("{}:{line}: unparsable date {raw:?}", file.display())]
    InvalidDate {
        file: PathBuf,
        line: usize,
        raw: String,
    },
    #[error("{}:{line}: unknown region {raw:?}", file.display())]
    UnknownRegion {
        file: PathBuf,
        line: usize,
        raw: String,
    },
    #[error("{}:{line}: missing {field}", file.display())]
    MissingField {
        file: PathBuf,
        line: usize,
        field: &'static str,
    },
}

/// Turns raw extracts into the consolidated table.
pub struct SalesProcessor;

impl SalesProcessor {
    /// Strip one leading currency symbol and parse the remainder.
    ///
    /// Returns `None` unless the result is a finite, non-negative number.
    pub fn parse_price(raw: &str) -> Option<f64> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix(CURRENCY_SYMBOL).unwrap_or(trimmed);
        digits
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite() && *price >= 0.0)
    }

    /// Parse a whole, non-negative unit count. Fractions are rejected.
    pub fn parse_quantity(raw: &str) -> Option<i64> {
        raw.trim().parse::<i64>().ok().filter(|quantity| *quantity >= 0)
    }

    /// Case-insensitive product match.
    pub fn is_target_product(product: Option<&str>, target: &str) -> bool {
        product.is_some_and(|p| p.trim().to_lowercase() == target.trim().to_lowercase())
    }

    /// Clean one raw row already known to belong to the target product.
    ///
    /// `line` is the 1-based CSV line, header included. It counts records,
    /// so a quoted field spanning several physical lines shifts every later
    /// row's reported line.
    pub fn clean_row(row: &RawRow, file: &Path, line: usize) -> Result<SalesRecord, ProcessorError> {
        let missing = |field: &'static str| ProcessorError::MissingField {
            file: file.to_path_buf(),
            line,
            field,
        };

        let raw_price = row.price.as_deref().ok_or_else(|| missing("price"))?;
        let price = Self::parse_price(raw_price).ok_or_else(|| ProcessorError::InvalidPrice {
            file: file.to_path_buf(),
            line,
            raw: raw_price.to_string(),
        })?;

        let raw_quantity = row.quantity.as_deref().ok_or_else(|| missing("quantity"))?;
        let quantity = Self::parse_quantity(raw_quantity).ok_or_else(|| ProcessorError::InvalidQuantity {
            file: file.to_path_buf(),
            line,
            raw: raw_quantity.to_string(),
        })?;

        let raw_date = row.date.as_deref().ok_or_else(|| missing("date"))?;
        let date = parse_date(raw_date).ok_or_else(|| ProcessorError::InvalidDate {
            file: file.to_path_buf(),
            line,
            raw: raw_date.to_string(),
        })?;

        let raw_region = row.region.as_deref().ok_or_else(|| missing("region"))?;
        let region = raw_region
            .parse::<Region>()
            .map_err(|_| ProcessorError::UnknownRegion {
                file: file.to_path_buf(),
                line,
                raw: raw_region.to_string(),
            })?;

        Ok(SalesRecord {
            sales: quantity as f64 * price,
            date,
            region,
        })
    }

    /// Filter, clean and derive the rows of one extract, in input order.
    pub fn process_extract(extract: &RawExtract, product: &str) -> Result<Vec<SalesRecord>, ProcessorError> {
        let records = extract
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| Self::is_target_product(row.product.as_deref(), product))
            .map(|(idx, row)| Self::clean_row(row, &extract.source, idx + 2))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            source = %extract.source.display(),
            raw_rows = extract.rows.len(),
            kept = records.len(),
            "Processed extract"
        );
        Ok(records)
    }

    /// Build the consolidated table from every extract.
    ///
    /// Extracts are concatenated in the given order, then stable-sorted by
    /// date. The first bad target row aborts the run.
    pub fn transform(extracts: &[RawExtract], product: &str) -> Result<SalesTable, ProcessorError> {
        let mut records = Vec::new();
        for extract in extracts {
            records.extend(Self::process_extract(extract, product)?);
        }

        if records.is_empty() {
            warn!(product, "No rows matched the target product");
        }

        Ok(SalesTable::new(records))
    }
}
