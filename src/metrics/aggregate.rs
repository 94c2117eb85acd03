use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{Category, Transaction};

/// Window applied before summing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    /// Calendar month number only (1-12). A transaction from any year with
    /// the same month number is included.
    MonthOfYear(u32),
    /// A specific calendar month of a specific year.
    YearMonth { year: i32, month: u32 },
}

impl MonthFilter {
    /// The month containing `today`, year included.
    pub fn current(today: NaiveDate) -> Self {
        Self::YearMonth {
            year: today.year(),
            month: today.month(),
        }
    }

    /// The month number of `today`, ignoring the year.
    pub fn current_month_of_year(today: NaiveDate) -> Self {
        Self::MonthOfYear(today.month())
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        match *self {
            Self::MonthOfYear(month) => date.month() == month,
            Self::YearMonth { year, month } => date.year() == year && date.month() == month,
        }
    }
}

impl std::fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::MonthOfYear(month) => write!(f, "month {month:02} (any year)"),
            Self::YearMonth { year, month } => write!(f, "{year}-{month:02}"),
        }
    }
}

/// Per-category sums. Categories without matching transactions are absent;
/// [`CategoryTotals::get`] reads them as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    totals: BTreeMap<Category, Decimal>,
}

impl CategoryTotals {
    pub fn get(&self, category: Category) -> Decimal {
        self.totals.get(&category).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        self.totals.iter().map(|(c, amt)| (*c, *amt))
    }

    pub fn total(&self) -> Decimal {
        sum_amounts(self.totals.values().copied()).0
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Entries sorted by amount, largest first.
    pub fn ranked(&self) -> Vec<(Category, Decimal)> {
        let mut entries: Vec<(Category, Decimal)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries
    }
}

/// Transactions falling inside `filter`, or all of them when there is none.
pub fn filter_by_month<'a>(
    transactions: &'a [Transaction],
    filter: Option<MonthFilter>,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions
        .iter()
        .filter(move |t| filter.map_or(true, |f| f.matches(t.date)))
}

/// Sum `amounts`, leaving out any value that would overflow the running
/// total. Returns the sum and how many values went into it.
pub(crate) fn sum_amounts(amounts: impl IntoIterator<Item = Decimal>) -> (Decimal, usize) {
    amounts
        .into_iter()
        .fold((Decimal::ZERO, 0), |(sum, n), amount| match sum.checked_add(amount) {
            Some(next) => (next, n + 1),
            None => (sum, n),
        })
}

/// A record that would overflow its category's total is left out of it.
pub fn aggregate_by_category(
    transactions: &[Transaction],
    filter: Option<MonthFilter>,
) -> CategoryTotals {
    let mut totals: BTreeMap<Category, Decimal> = BTreeMap::new();
    for txn in filter_by_month(transactions, filter) {
        let total = totals.entry(txn.category).or_insert(Decimal::ZERO);
        if let Some(next) = total.checked_add(txn.amount) {
            *total = next;
        }
    }
    CategoryTotals { totals }
}
