//! Extrato - Bank Statement Analysis & Chart Viewer
//!
//! Reads a bank statement workbook, summarizes the month and shows the result
//! as charts in a desktop window.

mod charts;
mod config;
mod data;
mod gui;
mod report;
mod stats;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use data::StatementLoader;
use eframe::egui;
use gui::ExtratoApp;
use report::StatementReport;
use stats::SummaryCalculator;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "extrato", version, about = "Monthly bank statement analysis")]
struct Cli {
    /// Path to the statement workbook (.xlsx, .xls or .ods)
    file_path: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "extrato=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let layout = config::load_layout().context("Failed to load statement layout")?;
    let top_n = layout.top_n;
    let loader = StatementLoader::new(layout);

    let table = loader
        .load(&cli.file_path)
        .with_context(|| format!("Failed to load {}", cli.file_path.display()))?;
    let summary = SummaryCalculator::summarize(&table, top_n)
        .with_context(|| format!("Failed to summarize {}", cli.file_path.display()))?;

    tracing::info!(
        "{}: debits {:.2}, credits {:.2}, month resume {:.2}",
        summary.month,
        summary.total_debits,
        summary.total_credits,
        summary.net_change
    );

    let report = StatementReport::new(table, summary);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Financial Analysis"),
        ..Default::default()
    };

    eframe::run_native(
        "Financial Analysis",
        options,
        Box::new(|cc| Ok(Box::new(ExtratoApp::new(cc, report)))),
    )
    .map_err(|e| anyhow!("Window error: {e}"))
}
