//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
mod kpi_panel;

pub use app::{SalesDashboardApp, DASHBOARD_TITLE};
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use kpi_panel::KpiPanel;
