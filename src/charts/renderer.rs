//! Static Chart Renderer
//! Draws the statement charts into a PNG with plotters.
//!
//! Layout (top to bottom, dark background):
//! 1. Balance Over Time - line with markers
//! 2. Top Spending Categories - horizontal bars, largest on top
//! 3. Top Credits - horizontal bars, largest on top

use crate::charts::{ChartData, ChartPlotter};
use crate::stats::CategoryTotal;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

// Colors
const BACKGROUND: RGBColor = RGBColor(0, 0, 0);
const FOREGROUND: RGBColor = RGBColor(255, 255, 255);
const GRID: RGBColor = RGBColor(128, 128, 128);
const BALANCE: RGBColor = RGBColor(0, 255, 255); // Cyan
const SPENDING: RGBColor = RGBColor(250, 128, 114); // Salmon
const CREDIT: RGBColor = RGBColor(144, 238, 144); // Light green

const MAX_LABEL_CHARS: usize = 28;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart drawing failed: {0}")]
    Draw(String),
}

fn draw_err<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Draw(err.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render all three charts into a PNG file.
    pub fn render_png(
        data: &ChartData,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&BACKGROUND).map_err(draw_err)?;

        let areas = root.split_evenly((3, 1));
        Self::draw_balance(&areas[0], data)?;
        Self::draw_ranked(
            &areas[1],
            "Top Spending Categories",
            "Total Spent (€)",
            &data.top_spending,
            SPENDING,
        )?;
        Self::draw_ranked(
            &areas[2],
            "Top Credits",
            "Total Credit (€)",
            &data.top_credits,
            CREDIT,
        )?;

        root.present().map_err(draw_err)?;
        tracing::info!("Charts written to {}", path.display());
        Ok(())
    }

    fn draw_balance(
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        data: &ChartData,
    ) -> Result<(), RenderError> {
        let points: Vec<(f64, f64)> = data
            .balance
            .iter()
            .map(|(date, balance)| (ChartPlotter::date_to_x(*date), *balance))
            .collect();

        let (x_min, x_max) = Self::padded_range(points.iter().map(|p| p.0), 0.0, 1.0);
        let (y_min, y_max) = Self::padded_range(points.iter().map(|p| p.1), 0.1, 10.0);

        let mut chart = ChartBuilder::on(area)
            .caption("Balance Over Time", ("sans-serif", 22).into_font().color(&FOREGROUND))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Balance (€)")
            .x_label_formatter(&|x| {
                ChartPlotter::x_to_date(x.round())
                    .map(|d| d.format("%d/%m").to_string())
                    .unwrap_or_default()
            })
            .label_style(("sans-serif", 12).into_font().color(&FOREGROUND))
            .axis_desc_style(("sans-serif", 14).into_font().color(&FOREGROUND))
            .axis_style(FOREGROUND)
            .bold_line_style(GRID.mix(0.5))
            .light_line_style(TRANSPARENT)
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(LineSeries::new(points.iter().copied(), BALANCE.stroke_width(2)))
            .map_err(draw_err)?;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, BALANCE.filled())),
            )
            .map_err(draw_err)?;

        Ok(())
    }

    fn draw_ranked(
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        title: &str,
        x_desc: &str,
        items: &[CategoryTotal],
        color: RGBColor,
    ) -> Result<(), RenderError> {
        let n = items.len();
        let x_max = items
            .iter()
            .map(|c| c.total)
            .fold(0.0_f64, f64::max)
            .max(1.0)
            * 1.1;
        let y_max = n.max(1) as f64 - 0.5;

        // Row index (top = first entry) -> axis label
        let labels: Vec<(f64, String)> = ChartPlotter::bar_positions(items)
            .into_iter()
            .map(|(y, item)| (y, Self::truncate_label(&item.description)))
            .collect();

        let mut chart = ChartBuilder::on(area)
            .caption(title, ("sans-serif", 22).into_font().color(&FOREGROUND))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(200)
            .build_cartesian_2d(0.0..x_max, -0.5..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(x_desc)
            .y_labels(n.max(1))
            .y_label_formatter(&|y| {
                labels
                    .iter()
                    .find(|(pos, _)| (pos - y).abs() < 1e-6)
                    .map(|(_, label)| label.clone())
                    .unwrap_or_default()
            })
            .label_style(("sans-serif", 12).into_font().color(&FOREGROUND))
            .axis_desc_style(("sans-serif", 14).into_font().color(&FOREGROUND))
            .axis_style(FOREGROUND)
            .bold_line_style(GRID.mix(0.5))
            .light_line_style(TRANSPARENT)
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(ChartPlotter::bar_positions(items).into_iter().map(|(y, item)| {
                Rectangle::new([(0.0, y - 0.35), (item.total, y + 0.35)], color.filled())
            }))
            .map_err(draw_err)?;

        Ok(())
    }

    /// Min/max of the values with proportional padding. Falls back to
    /// `fallback_pad` around a single value and to 0..1 for no values.
    fn padded_range(values: impl Iterator<Item = f64>, ratio: f64, fallback_pad: f64) -> (f64, f64) {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if !min.is_finite() || !max.is_finite() {
            return (0.0, 1.0);
        }
        let pad = if max > min {
            (max - min) * ratio
        } else {
            fallback_pad
        };
        (min - pad, max + pad)
    }

    fn truncate_label(label: &str) -> String {
        if label.chars().count() <= MAX_LABEL_CHARS {
            label.to_string()
        } else {
            let cut: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
            format!("{cut}…")
        }
    }
}
