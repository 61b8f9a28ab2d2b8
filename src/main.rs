//! Pink Morsel Sales Dashboard
//!
//! Loads the consolidated sales table once and shows it in an interactive
//! window with a region picker and KPI cards.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use morsel_sales::config::DEFAULT_OUTPUT;
use morsel_sales::data::DataLoader;
use morsel_sales::gui::{SalesDashboardApp, DASHBOARD_TITLE};
use morsel_sales::logging::init_tracing;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "morsel_sales")]
#[command(about = "Interactive Pink Morsel sales dashboard", long_about = None)]
struct Cli {
    /// Consolidated CSV produced by `process_sales`
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    data: PathBuf,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let table = DataLoader::load_consolidated(&cli.data)
        .with_context(|| format!("loading {}", cli.data.display()))?;
    info!(path = %cli.data.display(), rows = table.len(), "Dashboard data loaded");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title(DASHBOARD_TITLE),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        DASHBOARD_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(SalesDashboardApp::new(table, cli.data)))),
    )
    .map_err(|e| anyhow!("dashboard exited with error: {e}"))
}
