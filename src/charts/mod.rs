//! Charts module - Figure building and chart rendering

mod figure;
mod plotter;
mod renderer;

pub use figure::{
    render, render_selection, ChartFigure, PriceMarker, RegionFilter, RenderError, Series,
    SeriesPoint, TraceMode, CHART_TITLE, PRICE_INCREASE_DATE, PRICE_INCREASE_LABEL,
};
pub use plotter::{date_to_x, x_to_date, ChartPlotter, MARKER_COLOR, REGION_COLORS};
pub use renderer::{ChartError, StaticChartRenderer, DEFAULT_HEIGHT, DEFAULT_WIDTH};
