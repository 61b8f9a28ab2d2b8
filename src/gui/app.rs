//! Sales Dashboard Main Application
//! Main window with KPI cards, control panel and chart viewer.

use crate::charts::{render, RegionFilter, StaticChartRenderer, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::data::{DataLoader, SalesTable};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, KpiPanel};
use egui::{Color32, RichText, SidePanel, TopBottomPanel};
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};

pub const DASHBOARD_TITLE: &str = "Pink Morsel Sales Dashboard";

/// Main application window.
///
/// Holds the one shared table; every selection change re-renders from it.
pub struct SalesDashboardApp {
    table: SalesTable,
    control_panel: ControlPanel,
    kpi_panel: KpiPanel,
    chart_viewer: ChartViewer,
}

impl SalesDashboardApp {
    pub fn new(table: SalesTable, source: PathBuf) -> Self {
        let mut app = Self {
            table: SalesTable::default(),
            control_panel: ControlPanel::new(),
            kpi_panel: KpiPanel::default(),
            chart_viewer: ChartViewer::new(),
        };
        app.set_table(table, source);
        app
    }

    pub fn table(&self) -> &SalesTable {
        &self.table
    }

    pub fn chart_viewer(&self) -> &ChartViewer {
        &self.chart_viewer
    }

    pub fn kpi_panel(&self) -> &KpiPanel {
        &self.kpi_panel
    }

    /// Swap in a new table: KPIs are computed once here, the chart is
    /// re-rendered for the current selection.
    fn set_table(&mut self, table: SalesTable, source: PathBuf) {
        self.control_panel.set_source(source, table.len());
        self.kpi_panel = KpiPanel::from_table(&table);
        self.table = table;
        self.apply_filter(self.control_panel.filter);
    }

    /// Redraw for a selection.
    pub fn apply_filter(&mut self, filter: RegionFilter) {
        self.control_panel.filter = filter;
        self.chart_viewer.set_figure(render(&self.table, filter));
    }

    pub fn handle_action(&mut self, action: ControlPanelAction) {
        match action {
            ControlPanelAction::None => {}
            ControlPanelAction::FilterChanged(filter) => self.apply_filter(filter),
            ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
            ControlPanelAction::ExportPng => self.handle_export_png(),
            ControlPanelAction::ExportJson => self.handle_export_json(),
        }
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        match DataLoader::load_consolidated(&path) {
            Ok(table) => {
                info!(path = %path.display(), rows = table.len(), "Loaded consolidated table");
                self.control_panel
                    .set_status(&format!("Loaded {} rows", table.len()));
                self.set_table(table, path);
            }
            Err(e) => {
                error!("{e}");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn handle_export_png(&mut self) {
        let Some(figure) = &self.chart_viewer.figure else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("pink_morsel_sales.png")
            .save_file()
        else {
            return;
        };

        match StaticChartRenderer::render_png(figure, &path, DEFAULT_WIDTH, DEFAULT_HEIGHT) {
            Ok(()) => {
                self.control_panel.set_status("PNG exported");
                if let Err(e) = open::that(&path) {
                    error!("Could not open {}: {}", path.display(), e);
                }
            }
            Err(e) => {
                error!("{e}");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn handle_export_json(&mut self) {
        let Some(figure) = &self.chart_viewer.figure else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("pink_morsel_sales.json")
            .save_file()
        else {
            return;
        };

        let result = figure
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(&path, json).map_err(|e| e.to_string()));

        match result {
            Ok(()) => {
                info!(path = %path.display(), "Chart JSON exported");
                self.control_panel.set_status("JSON exported");
            }
            Err(e) => {
                error!("{e}");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for SalesDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("header").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(5.0);
                ui.label(
                    RichText::new(DASHBOARD_TITLE)
                        .size(26.0)
                        .strong()
                        .color(Color32::from_rgb(100, 149, 237)),
                );
                ui.add_space(5.0);
            });
        });

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(220.0)
            .max_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);
                    self.handle_action(action);
                });
            });

        // Central panel - KPI cards above the chart
        egui::CentralPanel::default().show(ctx, |ui| {
            self.kpi_panel.show(ui);
            ui.add_space(10.0);
            ui.separator();
            self.chart_viewer.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::TraceMode;
    use crate::data::{Region, SalesRecord};
    use chrono::NaiveDate;

    fn app() -> SalesDashboardApp {
        let date = |d| NaiveDate::from_ymd_opt(2021, 1, d).unwrap();
        let table = SalesTable::new(vec![
            SalesRecord { sales: 10.0, date: date(10), region: Region::North },
            SalesRecord { sales: 7.5, date: date(11), region: Region::East },
        ]);
        SalesDashboardApp::new(table, PathBuf::from("formatted_sales_data.csv"))
    }

    #[test]
    fn test_initial_chart_shows_all_regions() {
        let app = app();
        let figure = app.chart_viewer().figure.as_ref().unwrap();
        assert_eq!(figure.filter, RegionFilter::All);
        assert_eq!(figure.series.len(), 2);
        assert!(figure.title.contains("All Regions"));
        assert_eq!(app.kpi_panel().kpis.unwrap().total, 17.5);
    }

    #[test]
    fn test_filter_change_replaces_chart() {
        let mut app = app();
        app.handle_action(ControlPanelAction::FilterChanged(RegionFilter::Only(Region::North)));

        let figure = app.chart_viewer().figure.as_ref().unwrap();
        assert!(figure.title.contains("North"));
        assert_eq!(figure.series.len(), 1);
        assert_eq!(figure.series[0].mode, TraceMode::LinesMarkers);
        // KPIs are not affected by the selection.
        assert_eq!(app.kpi_panel().kpis.unwrap().total, 17.5);
        assert_eq!(app.table().len(), 2);
    }
}
