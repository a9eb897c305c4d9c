use std::collections::HashMap;
use std::fmt;

use getset::{CopyGetters, Getters};
use log::warn;
use rust_decimal::Decimal;

use super::transactions::{Kind, Transaction};

pub const CURRENCY_SYMBOL: &str = "₹";

/// Income and expense totals for one calendar month.
#[derive(Debug, Default, Getters, CopyGetters)]
pub struct MonthlySummary {
    #[getset(get_copy = "pub")]
    year: i32,
    #[getset(get_copy = "pub")]
    month: u32,
    #[getset(get_copy = "pub")]
    income_total: Decimal,
    #[getset(get_copy = "pub")]
    expense_total: Decimal,
    #[getset(get = "pub")]
    income_by_category: HashMap<String, Decimal>,
    #[getset(get = "pub")]
    expense_by_category: HashMap<String, Decimal>,
}

impl MonthlySummary {
    pub fn new(year: i32, month: u32) -> MonthlySummary {
        MonthlySummary {
            year,
            month,
            ..Default::default()
        }
    }

    pub(super) fn record(&mut self, transaction: &Transaction) {
        let (total, by_category) = match transaction.kind() {
            Kind::Income => (&mut self.income_total, &mut self.income_by_category),
            Kind::Expense => (&mut self.expense_total, &mut self.expense_by_category),
        };

        accumulate(total, transaction.amount());
        accumulate(
            by_category.entry(transaction.category().clone()).or_insert(Decimal::ZERO),
            transaction.amount(),
        );
    }

    /// Saturates at the decimal bounds instead of overflowing.
    pub fn net_savings(&self) -> Decimal {
        self.income_total.saturating_sub(self.expense_total)
    }

    fn month_name(&self) -> String {
        u8::try_from(self.month)
            .ok()
            .and_then(|month| chrono::Month::try_from(month).ok())
            .map(|month| month.name().to_uppercase())
            .unwrap_or_else(|| self.month.to_string())
    }
}

/// Totals past the decimal range are clamped to `Decimal::MAX`/`Decimal::MIN`.
fn accumulate(total: &mut Decimal, amount: Decimal) {
    match total.checked_add(amount) {
        Some(sum) => *total = sum,
        None => {
            warn!("total overflowed adding {} to {}, saturating", amount, total);
            *total = total.saturating_add(amount);
        },
    }
}

fn write_categories(f: &mut fmt::Formatter<'_>, by_category: &HashMap<String, Decimal>) -> fmt::Result {
    let mut categories: Vec<_> = by_category.iter().collect();
    categories.sort_by(|a, b| a.0.cmp(b.0));

    for (category, amount) in categories {
        writeln!(f, "  {}: {}{}", category, CURRENCY_SYMBOL, amount)?;
    }

    Ok(())
}

impl fmt::Display for MonthlySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Monthly Summary for {} {} ---", self.month_name(), self.year)?;
        writeln!(f, "Total Income: {}{}", CURRENCY_SYMBOL, self.income_total)?;
        write_categories(f, &self.income_by_category)?;
        writeln!(f, "Total Expenses: {}{}", CURRENCY_SYMBOL, self.expense_total)?;
        write_categories(f, &self.expense_by_category)?;
        write!(f, "Net Savings: {}{}", CURRENCY_SYMBOL, self.net_savings())
    }
}
