//! Chart Viewer Widget
//! Central scrollable panel stacking the three statement charts.

use crate::charts::{ChartData, ChartPlotter, CREDIT_COLOR, SPENDING_COLOR};
use egui::{Color32, RichText, ScrollArea};

const CHART_SPACING: f32 = 15.0;
const CHART_HEIGHT: f32 = 300.0;

/// Scrollable chart display area.
#[derive(Default)]
pub struct ChartViewer {
    pub chart_data: ChartData,
}

impl ChartViewer {
    pub fn new(chart_data: ChartData) -> Self {
        Self { chart_data }
    }

    /// Draw the three chart cards
    pub fn show(&mut self, ui: &mut egui::Ui) {
        if self.chart_data.balance.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        let data = &self.chart_data;
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::chart_card(ui, "Balance Over Time", |ui| {
                    ChartPlotter::draw_balance_chart(ui, data, CHART_HEIGHT);
                });
                ui.add_space(CHART_SPACING);

                Self::chart_card(ui, "Top Spending Categories", |ui| {
                    ChartPlotter::draw_ranked_chart(
                        ui,
                        "top_spending",
                        &data.top_spending,
                        SPENDING_COLOR,
                        "Total Spent (€)",
                        CHART_HEIGHT,
                    );
                });
                ui.add_space(CHART_SPACING);

                Self::chart_card(ui, "Top Credits", |ui| {
                    ChartPlotter::draw_ranked_chart(
                        ui,
                        "top_credits",
                        &data.top_credits,
                        CREDIT_COLOR,
                        "Total Credit (€)",
                        CHART_HEIGHT,
                    );
                });
            });
    }

    fn chart_card(ui: &mut egui::Ui, title: &str, add_chart: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::GRAY))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(title).size(16.0).strong().color(Color32::WHITE));
                    ui.add_space(8.0);
                    add_chart(ui);
                });
            });
    }
}
