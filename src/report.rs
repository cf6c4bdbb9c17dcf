//! Statement Report
//! Serializable bundle handed to the presentation layer, plus money formatting.

use crate::data::StatementTable;
use crate::stats::Summary;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const CURRENCY_SUFFIX: &str = "€";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Loaded table and its summary, as consumed by any front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementReport {
    pub table: StatementTable,
    pub summary: Summary,
}

impl StatementReport {
    pub fn new(table: StatementTable, summary: Summary) -> Self {
        Self { table, summary }
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), ReportError> {
        std::fs::write(path, self.to_json()?)?;
        tracing::info!("Report written to {}", path.display());
        Ok(())
    }

    /// Label/value pairs in display order.
    pub fn summary_lines(&self) -> Vec<(&'static str, String)> {
        let s = &self.summary;
        vec![
            ("Month", s.month.clone()),
            ("Total Debits", format_money(s.total_debits)),
            ("Total Credits", format_money(s.total_credits)),
            ("Month Resume", format_money(s.net_change)),
            ("Average Transaction Amount", format_money(s.average_amount)),
            ("Highest Debit", format_optional_money(s.extreme_debit)),
            ("Highest Credit", format_optional_money(s.extreme_credit)),
        ]
    }
}

/// `1234.5` -> `"1234.50 €"`
pub fn format_money(value: f64) -> String {
    format!("{:.2} {}", value, CURRENCY_SUFFIX)
}

pub fn format_optional_money(value: Option<f64>) -> String {
    value.map(format_money).unwrap_or_else(|| "-".to_string())
}
