//! Morsel Sales - Pink Morsel sales ETL & regional sales dashboard
//!
//! The ETL pass (`data`) turns raw daily extracts into one consolidated
//! table. The dashboard (`gui`) loads that table once and redraws the chart
//! (`charts`) on every region selection, next to the KPI cards (`stats`).

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod logging;
pub mod stats;
