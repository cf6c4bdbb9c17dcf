//! Data Processor Module
//! Handles cell cleaning (dates, currency strings) and the DataFrame view of a statement.

use crate::data::{StatementTable, TransactionKind};
use calamine::Data;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use thiserror::Error;

/// Day/month/year, the only accepted text form of a movement date.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Turn a local currency string such as `"1.234,56 €"` into `1234.56`.
    ///
    /// The currency symbol is stripped, `.` thousands separators removed and the
    /// decimal comma converted to a point. The sign is kept. Returns `None` when
    /// the cleaned text is not a number.
    pub fn normalize_currency(raw: &str, symbol: &str) -> Option<f64> {
        let mut cleaned = raw.to_string();
        if !symbol.is_empty() {
            cleaned = cleaned.replace(symbol, "");
        }
        let cleaned = cleaned.replace('.', "").replace(',', ".");
        let cleaned = cleaned.trim();

        if cleaned.is_empty() {
            return None;
        }

        cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Parse a movement date cell. `None` marks the row for exclusion.
    pub fn parse_movement_date(cell: &Data) -> Option<NaiveDate> {
        match cell {
            Data::String(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok(),
            Data::DateTime(dt) => Self::excel_serial_to_date(dt.as_f64()),
            Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .map(|dt| dt.date())
                .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
                .ok(),
            _ => None,
        }
    }

    /// Excel serial date using the 1899-12-30 base.
    fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
        if !serial.is_finite() || serial < 1.0 {
            return None;
        }
        let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
        base.checked_add_signed(Duration::days(serial.floor() as i64))
    }

    /// Columnar view of the table: `description`, `kind`, `amount`.
    pub fn to_dataframe(table: &StatementTable) -> Result<DataFrame, ProcessorError> {
        let descriptions: Vec<&str> = table
            .transactions
            .iter()
            .map(|t| t.description.as_str())
            .collect();
        let kinds: Vec<&str> = table.transactions.iter().map(|t| t.kind.as_str()).collect();
        let amounts: Vec<f64> = table.transactions.iter().map(|t| t.amount).collect();

        let df = DataFrame::new(vec![
            Column::new("description".into(), descriptions),
            Column::new("kind".into(), kinds),
            Column::new("amount".into(), amounts),
        ])?;

        Ok(df)
    }

    /// Filter DataFrame for a single transaction kind.
    pub fn filter_by_kind(
        df: &DataFrame,
        kind: TransactionKind,
    ) -> Result<DataFrame, ProcessorError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(col("kind").eq(lit(kind.as_str())))
            .collect()?;
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Transaction;

    #[test]
    fn normalizes_local_currency_strings() {
        assert_eq!(DataProcessor::normalize_currency("1.234,56 €", "€"), Some(1234.56));
        assert_eq!(DataProcessor::normalize_currency("0,99 €", "€"), Some(0.99));
        assert_eq!(DataProcessor::normalize_currency("1.000,00 €", "€"), Some(1000.0));
        assert_eq!(DataProcessor::normalize_currency("€1.234.567,89", "€"), Some(1234567.89));
        assert_eq!(DataProcessor::normalize_currency("10,00", "€"), Some(10.0));
    }

    #[test]
    fn keeps_embedded_sign() {
        assert_eq!(DataProcessor::normalize_currency("-5,50 €", "€"), Some(-5.5));
        assert_eq!(DataProcessor::normalize_currency("-1.200,00 €", "€"), Some(-1200.0));
    }

    #[test]
    fn rejects_non_numeric_text() {
        assert_eq!(DataProcessor::normalize_currency("", "€"), None);
        assert_eq!(DataProcessor::normalize_currency("  € ", "€"), None);
        assert_eq!(DataProcessor::normalize_currency("12,34 USD", "€"), None);
        assert_eq!(DataProcessor::normalize_currency("n/a", "€"), None);
    }

    #[test]
    fn parses_day_month_year_dates() {
        let cell = Data::String("05/03/2024".to_string());
        assert_eq!(
            DataProcessor::parse_movement_date(&cell),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
    }

    #[test]
    fn rejects_impossible_and_foreign_dates() {
        for text in ["31/02/2024", "2024-03-05", "", "Saldo inicial"] {
            let cell = Data::String(text.to_string());
            assert_eq!(DataProcessor::parse_movement_date(&cell), None, "{text}");
        }
        assert_eq!(DataProcessor::parse_movement_date(&Data::Empty), None);
        assert_eq!(DataProcessor::parse_movement_date(&Data::Float(12.5)), None);
    }

    #[test]
    fn accepts_iso_datetime_cells() {
        let cell = Data::DateTimeIso("2024-03-05T00:00:00".to_string());
        assert_eq!(
            DataProcessor::parse_movement_date(&cell),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
    }

    #[test]
    fn filters_dataframe_by_kind() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let row = |description: &str, kind, amount| Transaction {
            date,
            description: description.to_string(),
            kind,
            amount,
            balance_after: 0.0,
        };
        let table = StatementTable {
            sheet: "Conta".to_string(),
            transactions: vec![
                row("Mercado", TransactionKind::Debit, 12.0),
                row("Salario", TransactionKind::Credit, 900.0),
                row("Farmacia", TransactionKind::Debit, 7.5),
            ],
            skipped_rows: 0,
        };

        let df = DataProcessor::to_dataframe(&table).unwrap();
        assert_eq!(df.height(), 3);

        let debits = DataProcessor::filter_by_kind(&df, TransactionKind::Debit).unwrap();
        assert_eq!(debits.height(), 2);
        let credits = DataProcessor::filter_by_kind(&df, TransactionKind::Credit).unwrap();
        assert_eq!(credits.height(), 1);
    }
}
