//! One-shot ETL pass: raw daily extracts → consolidated Pink Morsel table.

use anyhow::{Context, Result};
use clap::Parser;
use morsel_sales::config::{EtlConfig, DEFAULT_DATA_DIR, DEFAULT_EXTRACTS, DEFAULT_OUTPUT, TARGET_PRODUCT};
use morsel_sales::data::{DataLoader, RunSummary, SalesProcessor, SalesWriter};
use morsel_sales::logging::init_tracing;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "process_sales")]
#[command(about = "Consolidate raw sales extracts into one CSV", long_about = None)]
struct Cli {
    /// Directory holding the raw extracts
    #[arg(short = 'd', long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Extract file names inside the data directory, read in order
    #[arg(value_name = "EXTRACT", default_values = DEFAULT_EXTRACTS)]
    extracts: Vec<String>,

    /// Consolidated CSV to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Product to keep (case-insensitive)
    #[arg(short, long, default_value = TARGET_PRODUCT)]
    product: String,
}

impl From<Cli> for EtlConfig {
    fn from(cli: Cli) -> Self {
        Self {
            data_dir: cli.data_dir,
            extracts: cli.extracts,
            output: cli.output,
            product: cli.product,
        }
    }
}

fn run(config: &EtlConfig) -> Result<RunSummary> {
    let paths = config.extract_paths();
    let extracts = DataLoader::load_extracts(&paths).context("loading raw extracts")?;
    let table = SalesProcessor::transform(&extracts, &config.product).context("cleaning extracts")?;

    SalesWriter::write_csv(&table, &config.output).context("writing consolidated table")?;
    Ok(RunSummary::from_table(&table))
}

fn main() -> Result<()> {
    init_tracing();
    let config = EtlConfig::from(Cli::parse());
    info!(?config, "Starting ETL run");

    let summary = run(&config)?;
    summary.log();
    Ok(())
}
