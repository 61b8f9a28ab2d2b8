//! Stats module - KPI aggregation

mod calculator;

pub use calculator::{
    average_sales, format_currency, peak_sales, total_sales, welch_ttest, PeriodStats,
    PriceImpact, SalesKpis, StatsError, SIGNIFICANCE_THRESHOLD,
};
