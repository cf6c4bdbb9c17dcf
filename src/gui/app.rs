//! Extrato Main Application
//! "Financial Analysis" window: action bar, chart viewer and summary window.

use crate::charts::{ChartData, StaticChartRenderer};
use crate::gui::{ChartViewer, SummaryPanel};
use crate::report::StatementReport;
use egui::{Color32, RichText, TopBottomPanel};

const EXPORT_WIDTH: u32 = 1200;
const EXPORT_HEIGHT: u32 = 1400;

/// Actions triggered from the action bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppAction {
    None,
    ToggleSummary,
    ExportPng,
    ExportJson,
    Close,
}

/// Main application window.
pub struct ExtratoApp {
    report: StatementReport,
    chart_viewer: ChartViewer,
    summary_panel: SummaryPanel,
    status: String,
}

impl ExtratoApp {
    pub fn new(cc: &eframe::CreationContext<'_>, report: StatementReport) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let chart_viewer = ChartViewer::new(Self::chart_data(&report));
        let status = format!(
            "{} transactions loaded from '{}'",
            report.table.len(),
            report.table.sheet
        );

        Self {
            report,
            chart_viewer,
            summary_panel: SummaryPanel::new(),
            status,
        }
    }

    fn chart_data(report: &StatementReport) -> ChartData {
        ChartData {
            balance: report.table.balance_series(),
            top_spending: report.summary.top_debits.clone(),
            top_credits: report.summary.top_credits.clone(),
        }
    }

    fn action_bar(&self, ui: &mut egui::Ui) -> AppAction {
        let mut action = AppAction::None;

        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("📊 {} statement", self.report.summary.month))
                    .size(18.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.add_space(20.0);

            let summary_label = if self.summary_panel.open {
                "Hide Summary"
            } else {
                "Show Summary"
            };
            if ui.button(summary_label).clicked() {
                action = AppAction::ToggleSummary;
            }
            if ui.button("🖼 Export PNG").clicked() {
                action = AppAction::ExportPng;
            }
            if ui.button("📄 Export JSON").clicked() {
                action = AppAction::ExportJson;
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Close").clicked() {
                    action = AppAction::Close;
                }
            });
        });

        action
    }

    /// Render the charts to a PNG chosen by the user
    fn handle_export_png(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("extrato_charts.png")
            .save_file()
        else {
            return; // User cancelled
        };

        self.status = match StaticChartRenderer::render_png(
            &self.chart_viewer.chart_data,
            &path,
            EXPORT_WIDTH,
            EXPORT_HEIGHT,
        ) {
            Ok(()) => format!("Charts exported to {}", path.display()),
            Err(e) => {
                tracing::error!("PNG export failed: {}", e);
                format!("Error: {}", e)
            }
        };
    }

    /// Write the report as JSON to a file chosen by the user
    fn handle_export_json(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("extrato_report.json")
            .save_file()
        else {
            return;
        };

        self.status = match self.report.write_json(&path) {
            Ok(()) => format!("Report exported to {}", path.display()),
            Err(e) => {
                tracing::error!("JSON export failed: {}", e);
                format!("Error: {}", e)
            }
        };
    }
}

impl eframe::App for ExtratoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top panel - actions
        let action = TopBottomPanel::top("action_bar")
            .show(ctx, |ui| {
                ui.add_space(6.0);
                let action = self.action_bar(ui);
                ui.add_space(6.0);
                action
            })
            .inner;

        match action {
            AppAction::ToggleSummary => self.summary_panel.toggle(),
            AppAction::ExportPng => self.handle_export_png(),
            AppAction::ExportJson => self.handle_export_json(),
            AppAction::Close => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            AppAction::None => {}
        }

        // Bottom panel - status line
        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let color = if self.status.starts_with("Error") {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(color));
        });

        // Central panel - charts
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });

        self.summary_panel.show(ctx, &self.report);
    }
}
