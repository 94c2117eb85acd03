use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::Category;
use crate::categorize::Categorizer;
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: Option<i64>,
    pub description: String,
    /// Always positive.
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Category,
}

impl Transaction {
    /// Build a new (unsaved) transaction, assigning its category once.
    pub fn new(
        description: String,
        amount: Decimal,
        date: NaiveDate,
        categorizer: &Categorizer,
    ) -> Self {
        let category = categorizer.categorize(&description);
        Self {
            id: None,
            description,
            amount,
            date,
            category,
        }
    }
}

/// Raw user input for a transaction, as typed into a form, the command
/// line, or a CSV row.
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: String,
    /// Empty means "today".
    pub date: String,
}

impl TransactionDraft {
    pub fn new(description: &str, amount: &str, date: &str) -> Self {
        Self {
            description: description.to_string(),
            amount: amount.to_string(),
            date: date.to_string(),
        }
    }

    /// Validate every field and produce a categorized transaction.
    /// Nothing is returned unless the whole record is well-formed.
    pub fn validate(&self, categorizer: &Categorizer, today: NaiveDate) -> CoreResult<Transaction> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(CoreError::malformed("description", "is required"));
        }

        let amount = parse_amount(&self.amount)?;

        let date = if self.date.trim().is_empty() {
            today
        } else {
            parse_date(&self.date)?
        };

        Ok(Transaction::new(
            description.to_string(),
            amount,
            date,
            categorizer,
        ))
    }
}

/// Largest magnitude accepted for any money field (one billion).
pub(crate) fn max_amount() -> Decimal {
    Decimal::from(1_000_000_000u32)
}

/// Money is kept to cents.
const MAX_MONEY_SCALE: u32 = 2;

/// Parse a money field of either sign. Accepts a leading `$` and thousands
/// separators; at most two decimal places and at most [`max_amount`].
pub(crate) fn parse_money(field: &'static str, raw: &str) -> CoreResult<Decimal> {
    let cleaned = raw.trim().replace(['$', ','], "");
    if cleaned.is_empty() {
        return Err(CoreError::malformed(field, "is required"));
    }
    let value = Decimal::from_str(&cleaned).map_err(|_| {
        CoreError::malformed(field, format!("'{}' is not a number", raw.trim()))
    })?;
    if value.normalize().scale() > MAX_MONEY_SCALE {
        return Err(CoreError::malformed(
            field,
            format!("'{}' has more than {MAX_MONEY_SCALE} decimal places", raw.trim()),
        ));
    }
    if value.abs() > max_amount() {
        return Err(CoreError::malformed(
            field,
            format!("must not exceed {}", max_amount()),
        ));
    }
    Ok(value)
}

/// Parse a positive monetary amount.
pub(crate) fn parse_amount(raw: &str) -> CoreResult<Decimal> {
    let amount = parse_money("amount", raw)?;
    if amount <= Decimal::ZERO {
        return Err(CoreError::malformed(
            "amount",
            format!("must be positive (got {amount})"),
        ));
    }
    Ok(amount)
}

fn parse_date(raw: &str) -> CoreResult<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::malformed("date", "is required"));
    }
    for fmt in &["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(d);
        }
    }
    Err(CoreError::malformed(
        "date",
        format!("'{trimmed}' is not a date (use YYYY-MM-DD)"),
    ))
}
