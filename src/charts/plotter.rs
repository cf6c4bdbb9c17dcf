//! Chart Plotter Module
//! Creates interactive statement charts using egui_plot.

use crate::stats::CategoryTotal;
use chrono::{Datelike, NaiveDate};
use egui::Color32;
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

pub const BALANCE_COLOR: Color32 = Color32::from_rgb(0, 255, 255); // Cyan
pub const SPENDING_COLOR: Color32 = Color32::from_rgb(250, 128, 114); // Salmon
pub const CREDIT_COLOR: Color32 = Color32::from_rgb(144, 238, 144); // Light green

/// Chart data for one statement.
#[derive(Clone, Default)]
pub struct ChartData {
    pub balance: Vec<(NaiveDate, f64)>,
    pub top_spending: Vec<CategoryTotal>,
    pub top_credits: Vec<CategoryTotal>,
}

/// Creates statement charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Day number used as the x coordinate of a date.
    pub fn date_to_x(date: NaiveDate) -> f64 {
        date.num_days_from_ce() as f64
    }

    /// Inverse of `date_to_x`, for axis labels.
    pub fn x_to_date(x: f64) -> Option<NaiveDate> {
        if !x.is_finite() || x.fract().abs() > 1e-6 {
            return None;
        }
        NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
    }

    /// Bar positions for a ranked list: the first entry sits at the top.
    pub fn bar_positions(items: &[CategoryTotal]) -> Vec<(f64, &CategoryTotal)> {
        let n = items.len();
        items
            .iter()
            .enumerate()
            .map(|(i, item)| ((n - 1 - i) as f64, item))
            .collect()
    }

    /// Balance over time, line with markers.
    pub fn draw_balance_chart(ui: &mut egui::Ui, data: &ChartData, height: f32) {
        let points: Vec<[f64; 2]> = data
            .balance
            .iter()
            .map(|(date, balance)| [Self::date_to_x(*date), *balance])
            .collect();

        Plot::new("balance_over_time")
            .height(height)
            .allow_scroll(false)
            .x_axis_label("Date")
            .y_axis_label("Balance (€)")
            .x_axis_formatter(|mark, _range| {
                Self::x_to_date(mark.value)
                    .map(|d| d.format("%d/%m").to_string())
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(BALANCE_COLOR)
                        .width(1.5)
                        .name("Balance"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(3.0)
                        .color(BALANCE_COLOR),
                );
            });
    }

    /// Horizontal bar chart of a ranked category list.
    pub fn draw_ranked_chart(
        ui: &mut egui::Ui,
        id: &str,
        items: &[CategoryTotal],
        color: Color32,
        x_label: &str,
        height: f32,
    ) {
        let positioned = Self::bar_positions(items);
        let bars: Vec<Bar> = positioned
            .iter()
            .map(|(y, item)| {
                Bar::new(*y, item.total)
                    .name(&item.description)
                    .fill(color)
                    .width(0.7)
            })
            .collect();

        // y tick -> description
        let labels: Vec<(f64, String)> = positioned
            .iter()
            .map(|(y, item)| (*y, item.description.clone()))
            .collect();

        Plot::new(id)
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(x_label)
            .include_x(0.0)
            .y_axis_min_width(140.0)
            .y_axis_formatter(move |mark, _range| {
                labels
                    .iter()
                    .find(|(y, _)| (y - mark.value).abs() < 1e-6)
                    .map(|(_, label)| label.clone())
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().color(color));
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_axis_round_trips_whole_days() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(ChartPlotter::x_to_date(ChartPlotter::date_to_x(date)), Some(date));
        assert_eq!(ChartPlotter::x_to_date(ChartPlotter::date_to_x(date) + 0.5), None);
    }

    #[test]
    fn first_ranked_entry_is_drawn_on_top() {
        let items = vec![
            CategoryTotal { description: "Renda".to_string(), total: 700.0 },
            CategoryTotal { description: "Mercado".to_string(), total: 210.0 },
            CategoryTotal { description: "Cafe".to_string(), total: 12.0 },
        ];
        let positions = ChartPlotter::bar_positions(&items);
        assert_eq!(positions[0].0, 2.0);
        assert_eq!(positions[0].1.description, "Renda");
        assert_eq!(positions[2].0, 0.0);
    }
}
