//! Sales Record Module
//! Consolidated table types shared by the ETL pass and the dashboard.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown region: {0:?}")]
pub struct UnknownRegion(pub String);

/// Geographic partition of the sales rows.
///
/// Variants are declared alphabetically so the derived ordering matches the
/// lexicographic order of the stored labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    East,
    North,
    South,
    West,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::East, Region::North, Region::South, Region::West];

    /// Canonical lower-case label as stored in the consolidated file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::East => "east",
            Region::North => "north",
            Region::South => "south",
            Region::West => "west",
        }
    }

    /// Title-case label for captions.
    pub fn label(&self) -> &'static str {
        match self {
            Region::East => "East",
            Region::North => "North",
            Region::South => "South",
            Region::West => "West",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "east" => Ok(Region::East),
            "north" => Ok(Region::North),
            "south" => Ok(Region::South),
            "west" => Ok(Region::West),
            _ => Err(UnknownRegion(s.to_string())),
        }
    }
}

/// One row of the consolidated table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Sales")]
    pub sales: f64,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Region")]
    pub region: Region,
}

/// Date layouts accepted on input, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Date-time layouts whose time part is discarded.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a raw date cell. A trailing time component is dropped.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Immutable, date-sorted consolidated table.
///
/// Cloning shares the underlying rows, so one handle can be passed to every
/// render and aggregate call for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct SalesTable {
    records: Arc<[SalesRecord]>,
}

impl SalesTable {
    /// Build a table, stable-sorting by date so rows sharing a date keep
    /// their input order.
    pub fn new(mut records: Vec<SalesRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &SalesRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last date, `None` for an empty table.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some((first.date, last.date))
    }

    /// Distinct regions present, sorted.
    pub fn regions(&self) -> Vec<Region> {
        let mut regions: Vec<Region> = self.records.iter().map(|r| r.region).collect();
        regions.sort();
        regions.dedup();
        regions
    }

    pub fn sales_values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.sales).collect()
    }

    /// Rows of one region, in table order.
    pub fn for_region(&self, region: Region) -> impl Iterator<Item = &SalesRecord> {
        self.records.iter().filter(move |r| r.region == region)
    }
}
