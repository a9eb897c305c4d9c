use std::path::Path;
use std::slice::Iter;

use log::debug;

use super::summary::MonthlySummary;
use super::transactions::{parse_amount, parse_date, Kind, Transaction};
use super::LedgerError;
use crate::data::{self, LoadReport};

#[derive(Debug, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger {
            transactions: Vec::new(),
        }
    }

    /// Validates the raw fields and appends a new transaction.
    /// Nothing is stored unless every field is valid.
    pub fn add(&mut self, kind: &str, category: &str, amount: &str, date: &str) -> Result<(), LedgerError> {
        if Kind::parse(kind).is_none() {
            return Err(LedgerError::InvalidType(kind.to_string()));
        }
        let amount = parse_amount(amount).ok_or_else(|| LedgerError::InvalidAmount(amount.to_string()))?;
        let date = parse_date(date).ok_or_else(|| LedgerError::InvalidDate(date.to_string()))?;

        self.push(Transaction::new(kind, category, amount, date)?);

        Ok(())
    }

    /// Duplicates are kept, insertion order is preserved.
    pub fn push(&mut self, transaction: Transaction) {
        debug!(
            "adding transaction, kind={:?}, category={}, amount={}",
            transaction.kind(),
            transaction.category(),
            transaction.amount()
        );
        self.transactions.push(transaction);
    }

    /// Overwrites `path` with a header and every transaction. Returns the number
    /// of transactions written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<usize, LedgerError> {
        data::export_csv(path, self)
    }

    /// Appends the transactions stored in `path` after the ones already held.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadReport, LedgerError> {
        data::import_csv(path, self)
    }

    pub fn summarize(&self, year: i32, month: u32) -> MonthlySummary {
        let mut summary = MonthlySummary::new(year, month);
        for transaction in self.transactions.iter().filter(|tx| tx.is_in_month(year, month)) {
            summary.record(transaction);
        }

        summary
    }

    pub fn transactions_iter(&self) -> Iter<Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
