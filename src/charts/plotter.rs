//! Chart Plotter Module
//! Draws a `ChartFigure` interactively using egui_plot.

use crate::charts::figure::{ChartFigure, TraceMode};
use crate::data::Region;
use chrono::{Datelike, NaiveDate};
use egui::{Align2, Color32, RichText};
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoint, PlotPoints, Points, Text, VLine};

/// Dashed line and caption colour of the price marker.
pub const MARKER_COLOR: Color32 = Color32::from_rgb(220, 53, 69); // Red

/// Fixed colour per region.
pub const REGION_COLORS: [(Region, Color32); 4] = [
    (Region::East, Color32::from_rgb(46, 204, 113)),  // Green
    (Region::North, Color32::from_rgb(52, 152, 219)), // Blue
    (Region::South, Color32::from_rgb(243, 156, 18)), // Orange
    (Region::West, Color32::from_rgb(155, 89, 182)),  // Purple
];

/// Map a date onto the plot's x axis (days since the common era).
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Inverse of [`date_to_x`] for axis labels.
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

/// Creates the interactive sales chart using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn region_color(region: Region) -> Color32 {
        REGION_COLORS
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, color)| *color)
            .unwrap_or(Color32::GRAY)
    }

    /// Draw the figure: one line per series, markers where requested, and
    /// the dashed price marker across the whole plot.
    pub fn draw_figure(ui: &mut egui::Ui, figure: &ChartFigure, height: f32) {
        let y_top = figure.y_max().max(1.0);
        let marker_x = date_to_x(figure.marker.date);

        Plot::new("sales_chart")
            .height(height)
            .legend(Legend::default())
            .x_axis_label(figure.x_label.clone())
            .y_axis_label(figure.y_label.clone())
            .include_y(0.0)
            .include_y(y_top * 1.05)
            .include_x(marker_x)
            .allow_scroll(false)
            .x_axis_formatter(|mark, _range| {
                x_to_date(mark.value)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            })
            .label_formatter(|name, value| {
                let date = x_to_date(value.x)
                    .map(|d| d.to_string())
                    .unwrap_or_default();
                if name.is_empty() {
                    format!("{}\n${:.2}", date, value.y)
                } else {
                    format!("{}\n{}\n${:.2}", name, date, value.y)
                }
            })
            .show(ui, |plot_ui| {
                for series in &figure.series {
                    let color = Self::region_color(series.region);
                    let points: Vec<[f64; 2]> = series
                        .points
                        .iter()
                        .map(|p| [date_to_x(p.date), p.sales])
                        .collect();

                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(points.iter().copied()))
                            .color(color)
                            .width(1.5)
                            .name(&series.name),
                    );

                    if series.mode == TraceMode::LinesMarkers {
                        plot_ui.points(
                            Points::new(PlotPoints::from_iter(points.iter().copied()))
                                .radius(3.0)
                                .color(color)
                                .name(&series.name),
                        );
                    }
                }

                plot_ui.vline(
                    VLine::new(marker_x)
                        .color(MARKER_COLOR)
                        .width(2.0)
                        .style(LineStyle::dashed_loose())
                        .name(&figure.marker.label),
                );
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(marker_x, y_top * 0.95),
                        RichText::new(format!(" {}", figure.marker.label)).color(MARKER_COLOR),
                    )
                    .anchor(Align2::LEFT_CENTER),
                );
            });
    }

    /// Small colour legend drawn above the plot.
    pub fn draw_region_legend(ui: &mut egui::Ui, figure: &ChartFigure) {
        ui.horizontal(|ui| {
            for series in &figure.series {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                ui.painter()
                    .rect_filled(rect, 3.0, Self::region_color(series.region));
                ui.label(
                    RichText::new(format!("{} ({} pts)", series.region.label(), series.points.len()))
                        .size(13.0),
                );
                ui.add_space(12.0);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_axis_round_trip() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 15).unwrap();
        assert_eq!(x_to_date(date_to_x(date)), Some(date));
        assert_eq!(x_to_date(date_to_x(date) + 0.4), Some(date));
        assert_eq!(x_to_date(f64::NAN), None);
    }

    #[test]
    fn test_every_region_has_a_color() {
        for region in Region::ALL {
            assert_ne!(ChartPlotter::region_color(region), Color32::GRAY);
        }
    }
}
