//! Control Panel Widget
//! Left side panel with the region picker, data source and export controls.

use crate::charts::RegionFilter;
use egui::{Color32, RichText};
use std::path::PathBuf;

/// Left side control panel.
pub struct ControlPanel {
    pub filter: RegionFilter,
    pub csv_path: Option<PathBuf>,
    pub row_count: usize,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            filter: RegionFilter::default(),
            csv_path: None,
            row_count: 0,
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update data source info after a table load
    pub fn set_source(&mut self, path: PathBuf, row_count: usize) {
        self.csv_path = Some(path);
        self.row_count = row_count;
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file loaded".to_string());

                    ui.label(RichText::new(&path_text).size(12.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Open").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
                ui.label(
                    RichText::new(format!("{} rows", self.row_count))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Region Filter Section =====
        ui.label(RichText::new("🌍 Region").size(14.0).strong());
        ui.add_space(5.0);

        let previous = self.filter;
        ui.vertical(|ui| {
            for option in RegionFilter::OPTIONS {
                ui.radio_value(&mut self.filter, option, option.label());
            }
        });
        if self.filter != previous {
            action = ControlPanelAction::FilterChanged(self.filter);
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Section =====
        ui.vertical_centered(|ui| {
            let png_button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add(png_button).clicked() {
                action = ControlPanelAction::ExportPng;
            }

            ui.add_space(8.0);

            let json_button = egui::Button::new(RichText::new("📄 Export JSON").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add(json_button).clicked() {
                action = ControlPanelAction::ExportJson;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    FilterChanged(RegionFilter),
    ExportPng,
    ExportJson,
}
