//! Statement Layout Configuration
//! Describes where the transactions live inside the exported workbook.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable pointing at an optional layout TOML file.
pub const LAYOUT_ENV_VAR: &str = "EXTRATO_LAYOUT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read layout file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid layout file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Sheet name, header offset and column names of a statement export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementLayout {
    pub sheet_name: String,
    /// Metadata rows above the header row.
    pub skip_rows: usize,
    pub date_column: String,
    pub description_column: String,
    pub kind_column: String,
    pub amount_column: String,
    pub balance_column: String,
    pub debit_label: String,
    pub credit_label: String,
    pub currency_symbol: String,
    /// Length of the ranked category lists.
    pub top_n: usize,
}

impl Default for StatementLayout {
    fn default() -> Self {
        Self {
            sheet_name: "Conta_40244254236".to_string(),
            skip_rows: 4,
            date_column: "Data Movimento".to_string(),
            description_column: "Descrição".to_string(),
            kind_column: "Tipo".to_string(),
            amount_column: "Valor".to_string(),
            balance_column: "Saldo após movimento".to_string(),
            debit_label: "Débito".to_string(),
            credit_label: "Crédito".to_string(),
            currency_symbol: "€".to_string(),
            top_n: 10,
        }
    }
}

impl StatementLayout {
    /// Read a layout from a TOML file. Keys absent from the file keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Load the layout named by `EXTRATO_LAYOUT`, or the built-in default.
pub fn load_layout() -> Result<StatementLayout, ConfigError> {
    match std::env::var_os(LAYOUT_ENV_VAR) {
        Some(path) => {
            let path = PathBuf::from(path);
            tracing::info!("Using statement layout from {}", path.display());
            StatementLayout::from_toml_file(&path)
        }
        None => Ok(StatementLayout::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sheet_name = \"Conta_1\"\nskip_rows = 2").unwrap();

        let layout = StatementLayout::from_toml_file(file.path()).unwrap();
        assert_eq!(layout.sheet_name, "Conta_1");
        assert_eq!(layout.skip_rows, 2);
        assert_eq!(layout.amount_column, "Valor");
        assert_eq!(layout.top_n, 10);
    }

    #[test]
    fn malformed_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "skip_rows = \"four\"").unwrap();

        let err = StatementLayout::from_toml_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = StatementLayout::from_toml_file(Path::new("/nonexistent/layout.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
