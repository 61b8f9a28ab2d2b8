use chrono::NaiveDate;
use morsel_sales::charts::{render, render_selection, RegionFilter, PRICE_INCREASE_DATE};
use morsel_sales::data::{
    DataLoader, ProcessorError, Region, RunSummary, SalesProcessor, SalesWriter,
};
use morsel_sales::stats::{PriceImpact, SalesKpis};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, d).unwrap()
}

#[test]
fn test_full_pipeline() {
    let paths = [
        fixture("daily_sales_data_0.csv"),
        fixture("daily_sales_data_1.csv"),
    ];
    let extracts = DataLoader::load_extracts(&paths).expect("Failed to load extracts");
    assert_eq!(extracts.len(), 2);
    assert_eq!(extracts[0].source, paths[0]);

    let table = SalesProcessor::transform(&extracts, "pink morsel").expect("Failed to transform");
    assert_eq!(table.len(), 7);

    let dates: Vec<NaiveDate> = table.iter().map(|r| r.date).collect();
    assert!(dates.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(table.records()[0].sales, 1800.0);
    // Ties keep extract order: the three 2021-01-14 rows.
    let same_day: Vec<Region> = table
        .iter()
        .filter(|r| r.date == date(14))
        .map(|r| r.region)
        .collect();
    assert_eq!(same_day, vec![Region::South, Region::North, Region::West]);

    let output = env::temp_dir().join("morsel_pipeline_output.csv");
    let _ = fs::remove_file(&output);
    SalesWriter::write_csv(&table, &output).expect("Failed to write");

    let header = fs::read_to_string(&output).unwrap();
    assert!(header.starts_with("Sales,Date,Region\n"));

    let reloaded = DataLoader::load_consolidated(&output).expect("Failed to reload");
    assert_eq!(reloaded.records(), table.records());

    let summary = RunSummary::from_table(&reloaded);
    assert_eq!(summary.row_count, 7);
    assert_eq!(summary.date_range, Some((date(13), date(16))));
    assert_eq!(
        summary.regions,
        vec![Region::East, Region::North, Region::South, Region::West]
    );

    fs::remove_file(&output).unwrap();
}

#[test]
fn test_dashboard_view_of_pipeline_output() {
    let extracts = DataLoader::load_extracts(&[
        fixture("daily_sales_data_0.csv"),
        fixture("daily_sales_data_1.csv"),
    ])
    .unwrap();
    let table = SalesProcessor::transform(&extracts, "Pink Morsel").unwrap();

    let kpis = SalesKpis::compute(&table).unwrap();
    let expected_total: f64 = table.iter().map(|r| r.sales).sum();
    assert_eq!(kpis.total, expected_total);
    assert_eq!(kpis.peak, 2600.0);

    let all = render(&table, RegionFilter::All);
    assert_eq!(all.series.len(), 4);
    assert_eq!(all.point_count(), table.len());
    assert_eq!(all.marker.date, PRICE_INCREASE_DATE);

    let north = render_selection(&table, "north").unwrap();
    assert_eq!(north.series.len(), 1);
    assert_eq!(north.series[0].points.len(), 2);
    assert!(render_selection(&table, "everywhere").is_err());

    let impact = PriceImpact::compute(&table, PRICE_INCREASE_DATE).unwrap();
    assert_eq!(impact.before.count + impact.after.count, table.len());
    assert_eq!(impact.after.count, 3);
}

#[test]
fn test_bad_price_aborts_run() {
    let extracts = DataLoader::load_extracts(&[fixture("bad_price.csv")]).unwrap();
    let err = SalesProcessor::transform(&extracts, "pink morsel").unwrap_err();
    match err {
        ProcessorError::InvalidPrice { line, raw, .. } => {
            assert_eq!(line, 3);
            assert_eq!(raw, "three dollars");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_extract_is_reported() {
    let err = DataLoader::load_extracts(&[
        fixture("daily_sales_data_0.csv"),
        fixture("daily_sales_data_9.csv"),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("daily_sales_data_9.csv"));
}
