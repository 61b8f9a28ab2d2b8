//! Static Chart Renderer
//! Draws a `ChartFigure` to a PNG file with plotters.
//!
//! Layout mirrors the interactive chart: title caption, date axis, one line
//! per series (with point markers when requested), dashed price marker and a
//! legend in the upper-left corner.

use crate::charts::figure::{ChartFigure, TraceMode};
use crate::charts::plotter::{date_to_x, x_to_date, ChartPlotter, MARKER_COLOR};
use egui::Color32;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const DEFAULT_WIDTH: u32 = 1400;
pub const DEFAULT_HEIGHT: u32 = 800;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Chart drawing failed: {0}")]
    Draw(String),
}

fn draw_err<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Draw(err.to_string())
}

fn rgb(color: Color32) -> RGBColor {
    RGBColor(color.r(), color.g(), color.b())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `figure` as a PNG of `width` x `height` pixels at `path`.
    pub fn render_png(
        figure: &ChartFigure,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), ChartError> {
        let (first, last) = figure.x_range();
        // Pad a day each side so edge points and the marker stay visible.
        let x_min = date_to_x(first) - 1.0;
        let x_max = date_to_x(last) + 1.0;
        let y_max = (figure.y_max() * 1.1).max(1.0);

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&figure.title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(figure.x_label.as_str())
            .y_desc(figure.y_label.as_str())
            .x_labels(8)
            .x_label_formatter(&|x| {
                x_to_date(*x)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            })
            .y_label_formatter(&|y| format!("${:.0}", y))
            .draw()
            .map_err(draw_err)?;

        for series in &figure.series {
            let color = rgb(ChartPlotter::region_color(series.region));
            let points: Vec<(f64, f64)> = series
                .points
                .iter()
                .map(|p| (date_to_x(p.date), p.sales))
                .collect();

            chart
                .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
                .map_err(draw_err)?
                .label(series.region.label())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

            if series.mode == TraceMode::LinesMarkers {
                chart
                    .draw_series(points.iter().map(|&p| Circle::new(p, 3, color.filled())))
                    .map_err(draw_err)?;
            }
        }

        let marker_color = rgb(MARKER_COLOR);
        let marker_x = date_to_x(figure.marker.date);
        chart
            .draw_series(DashedLineSeries::new(
                vec![(marker_x, 0.0), (marker_x, y_max)],
                8,
                6,
                marker_color.stroke_width(2),
            ))
            .map_err(draw_err)?;
        chart
            .draw_series(std::iter::once(Text::new(
                format!(" {}", figure.marker.label),
                (marker_x, y_max * 0.95),
                ("sans-serif", 18).into_font().color(&marker_color),
            )))
            .map_err(draw_err)?;

        if !figure.series.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(draw_err)?;
        }

        root.present().map_err(draw_err)?;
        info!(path = %path.display(), "Chart exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::figure::{render, RegionFilter};
    use crate::data::{Region, SalesRecord, SalesTable};
    use chrono::NaiveDate;
    use std::env;
    use std::fs;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    fn sample_table() -> SalesTable {
        let date = |d| NaiveDate::from_ymd_opt(2021, 1, d).unwrap();
        SalesTable::new(vec![
            SalesRecord { sales: 10.0, date: date(10), region: Region::North },
            SalesRecord { sales: 7.5, date: date(11), region: Region::East },
            SalesRecord { sales: 12.0, date: date(18), region: Region::North },
        ])
    }

    fn assert_png(path: &Path) {
        let bytes = fs::read(path).unwrap();
        assert!(bytes.starts_with(&PNG_SIGNATURE));
    }

    #[test]
    fn test_render_png_for_region() {
        let path = env::temp_dir().join("morsel_renderer_north.png");
        let _ = fs::remove_file(&path);

        let figure = render(&sample_table(), RegionFilter::Only(Region::North));
        StaticChartRenderer::render_png(&figure, &path, 640, 400).unwrap();
        assert_png(&path);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_render_png_empty_figure() {
        let path = env::temp_dir().join("morsel_renderer_empty.png");
        let _ = fs::remove_file(&path);

        let figure = render(&SalesTable::default(), RegionFilter::All);
        assert!(figure.series.is_empty());
        StaticChartRenderer::render_png(&figure, &path, DEFAULT_WIDTH, DEFAULT_HEIGHT).unwrap();
        assert_png(&path);

        fs::remove_file(&path).unwrap();
    }
}
