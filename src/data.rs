use std::fmt;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use getset::{CopyGetters, Getters};
use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::accounting::ledger::Ledger;
use crate::accounting::transactions::{format_date, parse_amount, parse_date, Transaction};
use crate::accounting::LedgerError;

pub const HEADER: [&str; 4] = ["type", "category", "amount", "date"];
pub const DELIMITER: u8 = b',';

const FIELD_COUNT: usize = HEADER.len();
const HEADER_LINE: u64 = 1;

#[derive(Debug, PartialEq, Error)]
pub enum CodecError {
    #[error("expected 4 fields, found {0}")]
    Shape(usize),
    #[error("invalid amount '{0}'")]
    Amount(String),
    #[error("invalid date '{0}', expected dd-MM-yyyy")]
    Date(String),
}

/// One line of the ledger file. Fields are written as-is, without quoting.
#[derive(Debug, Serialize)]
pub struct TransactionRecord {
    #[serde(rename = "type")]
    pub type_: String,
    pub category: String,
    pub amount: String,
    pub date: String,
}

impl From<&Transaction> for TransactionRecord {
    fn from(transaction: &Transaction) -> Self {
        TransactionRecord {
            type_: transaction.label().clone(),
            category: transaction.category().clone(),
            amount: transaction.amount().to_string(),
            date: format_date(transaction.date()),
        }
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = CodecError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let amount = parse_amount(&record.amount).ok_or(CodecError::Amount(record.amount))?;
        let date = parse_date(&record.date).ok_or(CodecError::Date(record.date))?;

        Ok(Transaction::with_label(&record.type_, &record.category, amount, date))
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delimiter = DELIMITER as char;
        write!(
            f,
            "{}{delimiter}{}{delimiter}{}{delimiter}{}",
            self.type_, self.category, self.amount, self.date
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    pub line: u64,
    pub content: String,
}

#[derive(Debug, Default, Getters, CopyGetters)]
pub struct LoadReport {
    #[getset(get_copy = "pub")]
    loaded: usize,
    #[getset(get = "pub")]
    skipped: Vec<SkippedLine>,
}

impl LoadReport {
    fn skip(&mut self, line: u64, content: String) {
        warn!("skipping line {}, content={}", line, content);
        self.skipped.push(SkippedLine { line, content });
    }
}

pub fn encode(transaction: &Transaction) -> String {
    TransactionRecord::from(transaction).to_string()
}

pub fn decode(line: &str) -> Result<Transaction, CodecError> {
    let record: StringRecord = line.split(DELIMITER as char).collect();
    decode_record(&record)
}

fn decode_record(record: &StringRecord) -> Result<Transaction, CodecError> {
    // trailing empty fields do not count, so `a,b,c,d,` still has four
    let fields: Vec<&str> = record.iter().collect();
    let len = fields.iter().rposition(|field| !field.is_empty()).map_or(0, |last| last + 1);
    if len != FIELD_COUNT {
        return Err(CodecError::Shape(len));
    }

    TransactionRecord {
        type_: fields[0].trim().to_string(),
        category: fields[1].trim().to_string(),
        amount: fields[2].trim().to_string(),
        date: fields[3].trim().to_string(),
    }
    .try_into()
}

/// Reads every line after the header into the ledger. Lines with the wrong
/// number of fields, blank ones included, are skipped; a line that fails to
/// parse stops the import.
pub fn import_csv<P: AsRef<Path>>(path: P, ledger: &mut Ledger) -> Result<LoadReport, LedgerError> {
    let file = File::open(path.as_ref())?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(file);

    let mut report = LoadReport::default();
    let mut next_line = HEADER_LINE;
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map_or(next_line, |pos| pos.line());

        // the reader drops blank lines, recover them from the gap in line numbers
        for blank in next_line.max(HEADER_LINE + 1)..line {
            report.skip(blank, String::new());
        }
        next_line = line + 1;
        if line == HEADER_LINE {
            continue;
        }

        match decode_record(&record) {
            Ok(transaction) => {
                ledger.push(transaction);
                report.loaded += 1;
            },
            Err(CodecError::Shape(_)) => {
                let content = record.iter().collect::<Vec<_>>().join(",");
                report.skip(line, content);
            },
            Err(source) => {
                debug!("aborting import at line {}, err={}", line, source);
                return Err(LedgerError::Decode { line, source });
            },
        }
    }

    info!(
        "imported {} transactions from {}, skipped {}",
        report.loaded,
        path.as_ref().display(),
        report.skipped.len()
    );

    Ok(report)
}

/// Truncates `path` and writes the header followed by one line per transaction.
pub fn export_csv<P: AsRef<Path>>(path: P, ledger: &Ledger) -> Result<usize, LedgerError> {
    let file = File::create(path.as_ref())?;
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(file);

    csv_writer.write_record(HEADER)?;

    let mut written = 0;
    for transaction in ledger.transactions_iter() {
        let record: TransactionRecord = transaction.into();
        csv_writer.serialize(record)?;
        written += 1;
    }

    csv_writer.flush()?;
    info!("exported {} transactions to {}", written, path.as_ref().display());

    Ok(written)
}
