//! Chart Figure Module
//! Builds the drawable chart for a region selection.
//!
//! `render` is a pure function of the shared table and the current
//! selection. Every drawing surface (egui viewer, PNG renderer, JSON export)
//! consumes the `ChartFigure` it returns.

use crate::data::{Region, SalesTable};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Date of the Pink Morsel price increase.
pub const PRICE_INCREASE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2021, 1, 15) {
    Some(date) => date,
    None => panic!("invalid price increase date"),
};

pub const PRICE_INCREASE_LABEL: &str = "Price Increase";
pub const CHART_TITLE: &str = "Pink Morsel Sales";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Invalid region selection: {0:?}")]
    InvalidSelection(String),
}

/// Region radio selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl RegionFilter {
    /// Radio options in display order.
    pub const OPTIONS: [RegionFilter; 5] = [
        RegionFilter::All,
        RegionFilter::Only(Region::North),
        RegionFilter::Only(Region::East),
        RegionFilter::Only(Region::South),
        RegionFilter::Only(Region::West),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RegionFilter::All => "All",
            RegionFilter::Only(region) => region.label(),
        }
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionFilter::All => f.write_str("all"),
            RegionFilter::Only(region) => f.write_str(region.as_str()),
        }
    }
}

impl FromStr for RegionFilter {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(RegionFilter::All);
        }
        s.parse::<Region>()
            .map(RegionFilter::Only)
            .map_err(|_| RenderError::InvalidSelection(s.to_string()))
    }
}

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceMode {
    Lines,
    LinesMarkers,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub sales: f64,
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub region: Region,
    pub mode: TraceMode,
    pub points: Vec<SeriesPoint>,
}

/// Vertical annotation spanning the full plot height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceMarker {
    pub date: NaiveDate,
    pub label: String,
}

impl Default for PriceMarker {
    fn default() -> Self {
        Self {
            date: PRICE_INCREASE_DATE,
            label: PRICE_INCREASE_LABEL.to_string(),
        }
    }
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFigure {
    pub title: String,
    pub filter: RegionFilter,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub marker: PriceMarker,
}

impl ChartFigure {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Date span covered by the series and the marker.
    pub fn x_range(&self) -> (NaiveDate, NaiveDate) {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.date))
            .fold((self.marker.date, self.marker.date), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            })
    }

    /// Largest plotted sales value, 0.0 when nothing is plotted.
    pub fn y_max(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.sales))
            .fold(0.0, f64::max)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn title_for(filter: RegionFilter) -> String {
    match filter {
        RegionFilter::All => format!("{} - All Regions", CHART_TITLE),
        RegionFilter::Only(region) => format!("{} - {} Region", CHART_TITLE, region.label()),
    }
}

/// Build the chart for `filter`.
///
/// `All` yields one line series per region present, in region order.
/// `Only` yields exactly one series with point markers, empty when the
/// region has no rows.
pub fn render(table: &SalesTable, filter: RegionFilter) -> ChartFigure {
    let series = match filter {
        RegionFilter::All => {
            let mut by_region: BTreeMap<Region, Vec<SeriesPoint>> = BTreeMap::new();
            for record in table.iter() {
                by_region.entry(record.region).or_default().push(SeriesPoint {
                    date: record.date,
                    sales: record.sales,
                });
            }

            by_region
                .into_iter()
                .map(|(region, points)| Series {
                    name: region.to_string(),
                    region,
                    mode: TraceMode::Lines,
                    points,
                })
                .collect()
        }
        RegionFilter::Only(region) => {
            let points = table
                .for_region(region)
                .map(|r| SeriesPoint {
                    date: r.date,
                    sales: r.sales,
                })
                .collect();

            vec![Series {
                name: region.to_string(),
                region,
                mode: TraceMode::LinesMarkers,
                points,
            }]
        }
    };

    ChartFigure {
        title: title_for(filter),
        filter,
        x_label: "Date".to_string(),
        y_label: "Sales ($)".to_string(),
        series,
        marker: PriceMarker::default(),
    }
}

/// Parse a raw selection string and render it.
pub fn render_selection(table: &SalesTable, selection: &str) -> Result<ChartFigure, RenderError> {
    let filter = selection.parse::<RegionFilter>()?;
    Ok(render(table, filter))
}
