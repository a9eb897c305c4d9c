use thiserror::Error;

pub mod ledger;
pub mod summary;
pub mod transactions;

#[cfg(test)]
mod ledger_tests;

use crate::data::CodecError;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid type '{0}', must be 'income' or 'expense'")]
    InvalidType(String),
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("invalid date '{0}', please use dd-MM-yyyy")]
    InvalidDate(String),
    #[error("error parsing line {line}: {source}")]
    Decode { line: u64, source: CodecError },
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Csv(#[from] csv::Error),
}
