//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::{ChartData, ChartPlotter, CREDIT_COLOR, SPENDING_COLOR};
pub use renderer::StaticChartRenderer;
