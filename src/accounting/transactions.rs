use std::str::FromStr;

use chrono::NaiveDate;
use getset::{CopyGetters, Getters};
use rust_decimal::Decimal;

use super::LedgerError;

pub const DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    /// Case-insensitive match against "income" and "expense".
    pub fn parse(label: &str) -> Option<Kind> {
        if label.eq_ignore_ascii_case("income") {
            Some(Kind::Income)
        } else if label.eq_ignore_ascii_case("expense") {
            Some(Kind::Expense)
        } else {
            None
        }
    }

    /// Anything that is not income counts as an expense.
    pub fn classify(label: &str) -> Kind {
        Kind::parse(label).unwrap_or(Kind::Expense)
    }
}

/// A single ledger entry. The kind label is kept exactly as it was typed or
/// read so that saving writes it back unchanged.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct Transaction {
    #[getset(get_copy = "pub")]
    kind: Kind,
    #[getset(get = "pub")]
    label: String,
    #[getset(get = "pub")]
    category: String,
    #[getset(get_copy = "pub")]
    amount: Decimal,
    #[getset(get_copy = "pub")]
    date: NaiveDate,
}

impl Transaction {
    pub fn new(label: &str, category: &str, amount: Decimal, date: NaiveDate) -> Result<Transaction, LedgerError> {
        let kind = Kind::parse(label).ok_or_else(|| LedgerError::InvalidType(label.to_string()))?;

        Ok(Transaction {
            kind,
            label: label.to_string(),
            category: category.to_string(),
            amount,
            date,
        })
    }

    /// Builds a transaction without checking the label against the known kinds.
    pub fn with_label(label: &str, category: &str, amount: Decimal, date: NaiveDate) -> Transaction {
        Transaction {
            kind: Kind::classify(label),
            label: label.to_string(),
            category: category.to_string(),
            amount,
            date,
        }
    }

    pub fn is_in_month(&self, year: i32, month: u32) -> bool {
        use chrono::Datelike;

        self.date.year() == year && self.date.month() == month
    }
}

pub fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();
    // digit separators are not part of the amount syntax
    if text.contains('_') {
        return None;
    }
    Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text)).ok()
}

/// Parses `dd-MM-yyyy` with both day and month zero padded and a four digit year.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let bytes = text.as_bytes();

    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
