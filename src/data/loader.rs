//! Statement Loader Module
//! Reads the statement sheet with calamine and builds the normalized transaction table.

use crate::config::StatementLayout;
use crate::data::{DataProcessor, StatementTable, Transaction, TransactionKind};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to open statement: {0}")]
    Open(#[source] calamine::Error),
    #[error("Failed to read sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: calamine::Error,
    },
    #[error("Sheet '{sheet}' has no header row after skipping {skip_rows} rows")]
    MissingHeader { sheet: String, skip_rows: usize },
    #[error("Column '{column}' not found in sheet '{sheet}'")]
    MissingColumn { column: String, sheet: String },
    #[error("Column '{column}' in sheet '{sheet}' holds a malformed currency value {value:?} (row {row})")]
    InvalidCurrency {
        column: String,
        sheet: String,
        row: usize,
        value: String,
    },
    #[error("Column '{column}' in sheet '{sheet}' holds an unknown transaction kind {value:?} (row {row})")]
    UnknownKind {
        column: String,
        sheet: String,
        row: usize,
        value: String,
    },
}

/// Column indices resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    date: usize,
    description: usize,
    kind: usize,
    amount: usize,
    balance: usize,
}

/// Loads one statement sheet into a `StatementTable`.
pub struct StatementLoader {
    layout: StatementLayout,
}

impl StatementLoader {
    pub fn new(layout: StatementLayout) -> Self {
        Self { layout }
    }

    /// Open the workbook, read the configured sheet and normalize it.
    ///
    /// The workbook handle lives only for the duration of this call.
    pub fn load(&self, path: &Path) -> Result<StatementTable, LoaderError> {
        let sheet = &self.layout.sheet_name;
        tracing::info!("Loading sheet '{}' from {}", sheet, path.display());

        let range = {
            let mut workbook = open_workbook_auto(path).map_err(LoaderError::Open)?;
            workbook
                .worksheet_range(sheet)
                .map_err(|source| LoaderError::Sheet {
                    sheet: sheet.clone(),
                    source,
                })?
        };

        self.parse_range(&range, sheet)
    }

    /// Normalize an already-read sheet.
    pub fn parse_range(
        &self,
        range: &Range<Data>,
        sheet: &str,
    ) -> Result<StatementTable, LoaderError> {
        // calamine trims leading empty rows, so the range may not start at row 0.
        let start_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
        let mut rows = range
            .rows()
            .skip(self.layout.skip_rows.saturating_sub(start_row));

        let header = rows.next().ok_or_else(|| LoaderError::MissingHeader {
            sheet: sheet.to_string(),
            skip_rows: self.layout.skip_rows,
        })?;
        let columns = self.resolve_columns(header, sheet)?;

        let mut transactions = Vec::new();
        let mut skipped_rows = 0;

        // Spreadsheet row numbers are 1-based; the header sits at skip_rows + 1.
        let first_data_row = self.layout.skip_rows.max(start_row) + 2;

        for (offset, row) in rows.enumerate() {
            let row_number = first_data_row + offset;

            let Some(date) = row.get(columns.date).and_then(DataProcessor::parse_movement_date)
            else {
                tracing::debug!("Skipping row {}: unparsable movement date", row_number);
                skipped_rows += 1;
                continue;
            };

            let kind = self.parse_kind(row.get(columns.kind), sheet, row_number)?;
            let amount = self.parse_currency(
                row.get(columns.amount),
                &self.layout.amount_column,
                sheet,
                row_number,
            )?;
            let balance_after = self.parse_currency(
                row.get(columns.balance),
                &self.layout.balance_column,
                sheet,
                row_number,
            )?;
            let description = row
                .get(columns.description)
                .map(cell_text)
                .unwrap_or_default();

            transactions.push(Transaction {
                date,
                description,
                kind,
                amount: amount.abs(),
                balance_after,
            });
        }

        tracing::info!(
            "Loaded {} transactions from '{}' ({} rows skipped)",
            transactions.len(),
            sheet,
            skipped_rows
        );

        Ok(StatementTable {
            sheet: sheet.to_string(),
            transactions,
            skipped_rows,
        })
    }

    fn resolve_columns(&self, header: &[Data], sheet: &str) -> Result<ColumnIndices, LoaderError> {
        let find = |name: &str| {
            header
                .iter()
                .position(|cell| cell_text(cell) == name)
                .ok_or_else(|| LoaderError::MissingColumn {
                    column: name.to_string(),
                    sheet: sheet.to_string(),
                })
        };

        Ok(ColumnIndices {
            date: find(&self.layout.date_column)?,
            description: find(&self.layout.description_column)?,
            kind: find(&self.layout.kind_column)?,
            amount: find(&self.layout.amount_column)?,
            balance: find(&self.layout.balance_column)?,
        })
    }

    fn parse_kind(
        &self,
        cell: Option<&Data>,
        sheet: &str,
        row: usize,
    ) -> Result<TransactionKind, LoaderError> {
        let label = cell.map(cell_text).unwrap_or_default();
        if label == self.layout.debit_label {
            Ok(TransactionKind::Debit)
        } else if label == self.layout.credit_label {
            Ok(TransactionKind::Credit)
        } else {
            Err(LoaderError::UnknownKind {
                column: self.layout.kind_column.clone(),
                sheet: sheet.to_string(),
                row,
                value: label,
            })
        }
    }

    fn parse_currency(
        &self,
        cell: Option<&Data>,
        column: &str,
        sheet: &str,
        row: usize,
    ) -> Result<f64, LoaderError> {
        let value = match cell {
            Some(Data::Float(f)) => Some(*f),
            Some(Data::Int(i)) => Some(*i as f64),
            Some(other) => {
                DataProcessor::normalize_currency(&cell_text(other), &self.layout.currency_symbol)
            }
            None => None,
        };

        value.ok_or_else(|| LoaderError::InvalidCurrency {
            column: column.to_string(),
            sheet: sheet.to_string(),
            row,
            value: cell.map(cell_text).unwrap_or_default(),
        })
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}
