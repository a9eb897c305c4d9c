use std::collections::HashMap;

use anyhow::{bail, Result};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::ledger::Ledger;
use super::summary::MonthlySummary;
use super::transactions::Kind;
use super::LedgerError;

fn categories(pairs: &[(&str, Decimal)]) -> HashMap<String, Decimal> {
    pairs.iter().map(|(category, amount)| (category.to_string(), *amount)).collect()
}

fn assert_summary(summary: &MonthlySummary, income: Decimal, expense: Decimal) {
    assert_eq!(summary.income_total(), income);
    assert_eq!(summary.expense_total(), expense);
    assert_eq!(summary.net_savings(), income - expense);
}

#[test]
fn test_add() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add("income", "salary", "50000", "05-03-2025")?;

    assert_eq!(ledger.len(), 1);
    let transaction = ledger.transactions_iter().next().unwrap();
    assert_eq!(transaction.kind(), Kind::Income);
    assert_eq!(transaction.category(), "salary");
    assert_eq!(transaction.amount(), dec!(50000));

    Ok(())
}

#[test]
fn test_add_keeps_kind_case() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add("Income", "salary", "10", "05-03-2025")?;

    let transaction = ledger.transactions_iter().next().unwrap();
    assert_eq!(transaction.kind(), Kind::Income);
    assert_eq!(transaction.label(), "Income");

    Ok(())
}

#[test]
fn test_add_invalid_type() -> Result<()> {
    let mut ledger = Ledger::new();
    if let Err(err) = ledger.add("transfer", "bank", "10", "05-03-2025") {
        assert!(matches!(err, LedgerError::InvalidType(_)));
    } else {
        bail!("only income and expense should be accepted");
    }

    assert!(ledger.is_empty());

    Ok(())
}

#[test]
fn test_add_invalid_amount() -> Result<()> {
    let mut ledger = Ledger::new();
    if let Err(err) = ledger.add("expense", "food", "ten", "05-03-2025") {
        assert!(matches!(err, LedgerError::InvalidAmount(amount) if amount == "ten"));
    } else {
        bail!("amount should be a decimal number");
    }

    assert!(ledger.is_empty());

    Ok(())
}

#[test]
fn test_add_invalid_date() -> Result<()> {
    let mut ledger = Ledger::new();
    if let Err(err) = ledger.add("income", "salary", "50000", "2025-03-05") {
        assert!(matches!(err, LedgerError::InvalidDate(_)));
    } else {
        bail!("dates should use dd-MM-yyyy");
    }

    assert!(ledger.is_empty());

    Ok(())
}

#[test]
fn test_add_type_checked_first() {
    let mut ledger = Ledger::new();
    let err = ledger.add("gift", "family", "abc", "bad").unwrap_err();

    assert!(matches!(err, LedgerError::InvalidType(_)));
}

#[test]
fn test_add_keeps_duplicates_in_order() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add("expense", "food", "5", "01-03-2025")?;
    ledger.add("expense", "rent", "500", "01-03-2025")?;
    ledger.add("expense", "food", "5", "01-03-2025")?;

    let categories: Vec<_> = ledger.transactions_iter().map(|tx| tx.category().as_str()).collect();
    assert_eq!(categories, vec!["food", "rent", "food"]);

    Ok(())
}

#[test]
fn test_summarize() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add("income", "salary", "50000", "05-03-2025")?;
    ledger.add("expense", "food", "1200.5", "07-03-2025")?;

    let summary = ledger.summarize(2025, 3);

    assert_summary(&summary, dec!(50000), dec!(1200.5));
    assert_eq!(summary.net_savings(), dec!(48799.5));
    assert_eq!(summary.income_by_category(), &categories(&[("salary", dec!(50000))]));
    assert_eq!(summary.expense_by_category(), &categories(&[("food", dec!(1200.5))]));

    Ok(())
}

#[test]
fn test_summarize_groups_categories() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add("income", "salary", "1000", "01-06-2024")?;
    ledger.add("INCOME", "business", "250.25", "15-06-2024")?;
    ledger.add("income", "salary", "1000", "30-06-2024")?;
    ledger.add("expense", "food", "10.10", "02-06-2024")?;
    ledger.add("Expense", "food", "4.90", "03-06-2024")?;
    ledger.add("expense", "travel", "300", "04-06-2024")?;

    let summary = ledger.summarize(2024, 6);

    assert_summary(&summary, dec!(2250.25), dec!(315));
    assert_eq!(
        summary.income_by_category(),
        &categories(&[("salary", dec!(2000)), ("business", dec!(250.25))])
    );
    assert_eq!(
        summary.expense_by_category(),
        &categories(&[("food", dec!(15)), ("travel", dec!(300))])
    );

    Ok(())
}

#[test]
fn test_summarize_filters_month_and_year() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add("income", "salary", "100", "31-03-2025")?;
    ledger.add("income", "salary", "200", "01-04-2025")?;
    ledger.add("expense", "rent", "50", "28-02-2025")?;
    ledger.add("expense", "rent", "70", "15-03-2024")?;

    let summary = ledger.summarize(2025, 3);

    assert_summary(&summary, dec!(100), dec!(0));
    assert_eq!(summary.income_by_category(), &categories(&[("salary", dec!(100))]));
    assert!(summary.expense_by_category().is_empty());

    Ok(())
}

#[test]
fn test_summarize_empty() {
    let ledger = Ledger::new();
    let summary = ledger.summarize(2025, 1);

    assert_summary(&summary, dec!(0), dec!(0));
    assert!(summary.income_by_category().is_empty());
    assert!(summary.expense_by_category().is_empty());
}

#[test]
fn test_summarize_accepts_negative_amounts() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add("income", "refund", "-20", "10-01-2025")?;
    ledger.add("expense", "food", "30", "11-01-2025")?;

    let summary = ledger.summarize(2025, 1);

    assert_summary(&summary, dec!(-20), dec!(30));
    assert_eq!(summary.net_savings(), dec!(-50));

    Ok(())
}

#[test]
fn test_summarize_saturates_on_overflow() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add("income", "salary", "79228162514264337593543950335", "05-03-2025")?;
    ledger.add("income", "salary", "79228162514264337593543950335", "06-03-2025")?;
    ledger.add("expense", "rent", "-79228162514264337593543950335", "07-03-2025")?;

    let summary = ledger.summarize(2025, 3);

    assert_eq!(summary.income_total(), Decimal::MAX);
    assert_eq!(summary.income_by_category(), &categories(&[("salary", Decimal::MAX)]));
    assert_eq!(summary.expense_total(), Decimal::MIN);
    assert_eq!(summary.net_savings(), Decimal::MAX);

    Ok(())
}

#[test]
fn test_summary_display() -> Result<()> {
    let mut ledger = Ledger::new();
    ledger.add("income", "salary", "50000", "05-03-2025")?;
    ledger.add("expense", "rent", "800", "01-03-2025")?;
    ledger.add("expense", "food", "1200.5", "07-03-2025")?;

    assert_eq!(
        ledger.summarize(2025, 3).to_string(),
        "--- Monthly Summary for MARCH 2025 ---\n\
         Total Income: ₹50000\n\
         \x20 salary: ₹50000\n\
         Total Expenses: ₹2000.5\n\
         \x20 food: ₹1200.5\n\
         \x20 rent: ₹800\n\
         Net Savings: ₹47999.5"
    );

    Ok(())
}
