//! GUI module - User interface components

mod app;
mod chart_viewer;
mod summary_panel;

pub use app::ExtratoApp;
pub use chart_viewer::ChartViewer;
pub use summary_panel::SummaryPanel;
