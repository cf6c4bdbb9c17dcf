//! Summary Window
//! Floating window listing the statement statistics and ranked categories.

use crate::report::{format_money, StatementReport};
use crate::stats::CategoryTotal;
use egui::{Color32, RichText, ScrollArea};

const LABEL_SIZE: f32 = 13.0;
const VALUE_SIZE: f32 = 13.0;

/// "Summary Statistics" window, hidden until requested.
#[derive(Default)]
pub struct SummaryPanel {
    pub open: bool,
}

impl SummaryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Draw the window when open.
    pub fn show(&mut self, ctx: &egui::Context, report: &StatementReport) {
        if !self.open {
            return;
        }

        let mut close_clicked = false;
        egui::Window::new("Summary Statistics")
            .open(&mut self.open)
            .default_width(380.0)
            .resizable(true)
            .show(ctx, |ui| {
                ScrollArea::vertical().max_height(520.0).show(ui, |ui| {
                    ui.label(RichText::new("Summary Statistics").size(18.0).strong());
                    ui.add_space(5.0);

                    for (label, value) in report.summary_lines() {
                        ui.label(RichText::new(format!("{label}:")).size(LABEL_SIZE).strong());
                        ui.indent(label, |ui| {
                            ui.label(RichText::new(value).size(VALUE_SIZE));
                        });
                    }

                    ui.add_space(10.0);
                    Self::ranked_section(ui, "Top Spending Categories:", &report.summary.top_debits);
                    ui.add_space(10.0);
                    Self::ranked_section(ui, "Top Credits:", &report.summary.top_credits);
                });

                ui.add_space(10.0);
                ui.vertical_centered(|ui| {
                    if ui.button("Close").clicked() {
                        close_clicked = true;
                    }
                });
            });

        if close_clicked {
            self.open = false;
        }
    }

    fn ranked_section(ui: &mut egui::Ui, title: &str, items: &[CategoryTotal]) {
        ui.label(RichText::new(title).size(15.0).strong());
        if items.is_empty() {
            ui.indent(title, |ui| {
                ui.label(RichText::new("None").size(VALUE_SIZE).color(Color32::GRAY));
            });
            return;
        }
        ui.indent(title, |ui| {
            for item in items {
                ui.label(
                    RichText::new(format!("{}: {}", item.description, format_money(item.total)))
                        .size(VALUE_SIZE),
                );
            }
        });
    }
}
