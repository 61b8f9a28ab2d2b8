//! Chart Viewer Widget
//! Central panel holding the figure for the current selection.

use crate::charts::{ChartFigure, ChartPlotter};
use egui::RichText;

const MIN_CHART_HEIGHT: f32 = 300.0;

/// Displays the most recently rendered figure.
#[derive(Default)]
pub struct ChartViewer {
    pub figure: Option<ChartFigure>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed figure.
    pub fn set_figure(&mut self, figure: ChartFigure) {
        self.figure = Some(figure);
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(figure) = &self.figure else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&figure.title).size(18.0).strong());
        });
        ui.add_space(6.0);
        ChartPlotter::draw_region_legend(ui, figure);
        ui.add_space(6.0);

        let height = ui.available_height().max(MIN_CHART_HEIGHT);
        ChartPlotter::draw_figure(ui, figure, height);
    }
}
