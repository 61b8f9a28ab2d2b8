//! Statistics Calculator Module
//! KPI reductions over the consolidated table and the price-change comparison.

use crate::data::SalesTable;
use chrono::NaiveDate;
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;
use thiserror::Error;

/// Significance threshold for t-test
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Cannot aggregate an empty table")]
    EmptyTable,
    #[error("No sales {side} {boundary}")]
    EmptyPeriod {
        side: &'static str,
        boundary: NaiveDate,
    },
}

/// Sum of every row's sales; 0.0 for an empty table.
pub fn total_sales(table: &SalesTable) -> f64 {
    table.iter().map(|r| r.sales).sum()
}

/// Mean sales per row, `None` for an empty table.
///
/// Rows from different regions share dates, so this is a per-row mean and
/// not a per-calendar-day one.
pub fn average_sales(table: &SalesTable) -> Option<f64> {
    if table.is_empty() {
        return None;
    }
    Some(Statistics::mean(table.iter().map(|r| r.sales)))
}

/// Largest single-row sales value, `None` for an empty table.
pub fn peak_sales(table: &SalesTable) -> Option<f64> {
    if table.is_empty() {
        return None;
    }
    Some(Statistics::max(table.iter().map(|r| r.sales)))
}

/// Format an amount as dollars with thousands separators, e.g. `$1,234.56`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u128;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}

/// The three dashboard KPIs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalesKpis {
    pub total: f64,
    pub average: f64,
    pub peak: f64,
}

impl SalesKpis {
    pub fn compute(table: &SalesTable) -> Result<Self, StatsError> {
        let (Some(average), Some(peak)) = (average_sales(table), peak_sales(table)) else {
            return Err(StatsError::EmptyTable);
        };

        Ok(Self {
            total: total_sales(table),
            average,
            peak,
        })
    }
}

/// Descriptive statistics for one side of the price change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub total: f64,
}

impl PeriodStats {
    pub fn from_values(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self {
                count: 0,
                mean: f64::NAN,
                std: f64::NAN,
                total: 0.0,
            };
        }

        let total = values.iter().sum::<f64>();
        let mean = total / n as f64;
        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        Self {
            count: n,
            mean,
            std: variance.sqrt(),
            total,
        }
    }
}

/// Sales before and after a price change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceImpact {
    pub boundary: NaiveDate,
    /// Rows dated strictly before the boundary.
    pub before: PeriodStats,
    /// Rows dated on or after the boundary.
    pub after: PeriodStats,
    pub p_value: f64,
    pub is_significant: bool,
}

impl PriceImpact {
    pub fn compute(table: &SalesTable, boundary: NaiveDate) -> Result<Self, StatsError> {
        let before: Vec<f64> = table
            .iter()
            .filter(|r| r.date < boundary)
            .map(|r| r.sales)
            .collect();
        let after: Vec<f64> = table
            .iter()
            .filter(|r| r.date >= boundary)
            .map(|r| r.sales)
            .collect();

        if before.is_empty() {
            return Err(StatsError::EmptyPeriod {
                side: "before",
                boundary,
            });
        }
        if after.is_empty() {
            return Err(StatsError::EmptyPeriod {
                side: "on or after",
                boundary,
            });
        }

        let before = PeriodStats::from_values(&before);
        let after = PeriodStats::from_values(&after);
        let (p_value, is_significant) = welch_ttest(&after, &before);

        Ok(Self {
            boundary,
            before,
            after,
            p_value,
            is_significant,
        })
    }

    /// Relative change of the mean row value, in percent.
    pub fn mean_change_pct(&self) -> f64 {
        if self.before.mean == 0.0 {
            return f64::NAN;
        }
        (self.after.mean - self.before.mean) / self.before.mean * 100.0
    }
}

/// Two-tailed Welch's t-test between two periods (unequal variance).
///
/// Needs at least two rows per period; otherwise the p-value is NaN.
pub fn welch_ttest(after: &PeriodStats, before: &PeriodStats) -> (f64, bool) {
    if after.count < 2 || before.count < 2 {
        return (f64::NAN, false);
    }

    let se_after = after.std.powi(2) / after.count as f64;
    let se_before = before.std.powi(2) / before.count as f64;
    let se_sum = se_after + se_before;
    if se_sum == 0.0 {
        return (1.0, false);
    }

    let t = (after.mean - before.mean) / se_sum.sqrt();
    let df = se_sum.powi(2)
        / (se_after.powi(2) / (after.count - 1) as f64
            + se_before.powi(2) / (before.count - 1) as f64);

    StudentsT::new(0.0, 1.0, df)
        .map(|dist| {
            let p_value = 2.0 * dist.sf(t.abs());
            (p_value, p_value <= SIGNIFICANCE_THRESHOLD)
        })
        .unwrap_or((f64::NAN, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Region, SalesRecord};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, m, d).unwrap()
    }

    fn example_table() -> SalesTable {
        SalesTable::new(vec![
            SalesRecord { sales: 10.0, date: date(1, 10), region: Region::North },
            SalesRecord { sales: 7.5, date: date(1, 11), region: Region::East },
        ])
    }

    #[test]
    fn test_kpis_example() {
        let kpis = SalesKpis::compute(&example_table()).unwrap();
        assert_eq!(kpis.total, 17.5);
        assert_eq!(kpis.peak, 10.0);
        assert_eq!(kpis.average, 8.75);
    }

    #[test]
    fn test_empty_table_policy() {
        let empty = SalesTable::default();
        assert_eq!(total_sales(&empty), 0.0);
        assert_eq!(average_sales(&empty), None);
        assert_eq!(peak_sales(&empty), None);
        assert_eq!(SalesKpis::compute(&empty), Err(StatsError::EmptyTable));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(17.5), "$17.50");
        assert_eq!(format_currency(1234.567), "$1,234.57");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-42.1), "-$42.10");
    }

    #[test]
    fn test_price_impact_split() {
        let table = SalesTable::new(vec![
            SalesRecord { sales: 10.0, date: date(1, 13), region: Region::North },
            SalesRecord { sales: 12.0, date: date(1, 14), region: Region::South },
            SalesRecord { sales: 20.0, date: date(1, 15), region: Region::North },
            SalesRecord { sales: 22.0, date: date(1, 16), region: Region::South },
        ]);

        let impact = PriceImpact::compute(&table, date(1, 15)).unwrap();
        assert_eq!(impact.before.count, 2);
        assert_eq!(impact.after.count, 2);
        assert_eq!(impact.before.mean, 11.0);
        assert_eq!(impact.after.mean, 21.0);
        assert_eq!(impact.after.total, 42.0);
        assert!((impact.mean_change_pct() - 90.909).abs() < 1e-3);
        assert!(impact.p_value < 0.05);
        assert!(impact.is_significant);
    }

    #[test]
    fn test_price_impact_needs_both_sides() {
        let err = PriceImpact::compute(&example_table(), date(1, 1)).unwrap_err();
        assert!(matches!(err, StatsError::EmptyPeriod { side: "before", .. }));
    }

    #[test]
    fn test_ttest_identical_samples() {
        let flat = PeriodStats::from_values(&[1.0, 1.0, 1.0]);
        let (p, sig) = welch_ttest(&flat, &PeriodStats::from_values(&[1.0, 1.0]));
        assert_eq!(p, 1.0);
        assert!(!sig);

        let single = PeriodStats::from_values(&[1.0]);
        let (p, sig) = welch_ttest(&single, &PeriodStats::from_values(&[1.0, 2.0]));
        assert!(p.is_nan());
        assert!(!sig);
    }

    #[test]
    fn test_price_impact_boundary_row_counts_as_after() {
        let table = SalesTable::new(vec![
            SalesRecord { sales: 4.0, date: date(1, 14), region: Region::East },
            SalesRecord { sales: 6.0, date: date(1, 14), region: Region::West },
            SalesRecord { sales: 8.0, date: date(1, 15), region: Region::East },
        ]);

        let impact = PriceImpact::compute(&table, date(1, 15)).unwrap();
        assert_eq!(impact.before.count, 2);
        assert_eq!(impact.before.total, 10.0);
        assert_eq!(impact.after.count, 1);
        assert_eq!(impact.after.mean, 8.0);
        assert!(impact.p_value.is_nan());
        assert!(!impact.is_significant);
    }
}
