//! Data module - statement loading and cleaning

mod loader;
mod processor;
mod transaction;

pub use loader::StatementLoader;
pub use processor::{DataProcessor, ProcessorError};
pub use transaction::{StatementTable, Transaction, TransactionKind};
