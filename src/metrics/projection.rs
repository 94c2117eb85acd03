use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::aggregate::sum_amounts;
use crate::models::Transaction;

pub const DEFAULT_MONTHS_AHEAD: usize = 3;

/// Longest horizon `project_next_months` will produce (ten years).
pub const MAX_MONTHS_AHEAD: usize = 120;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Assumed number of months covered by the supplied log. Fixed, not the
/// count of distinct months actually present.
fn lookback_months() -> Decimal {
    Decimal::from(3)
}

/// Month-over-month growth factor (5%).
fn growth_factor() -> Decimal {
    Decimal::new(105, 2)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedMonth {
    pub label: &'static str,
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub amount: Decimal,
}

/// Baseline monthly spend: the whole log divided by the fixed lookback.
pub fn average_monthly(transactions: &[Transaction]) -> Decimal {
    let (total, _) = sum_amounts(transactions.iter().map(|t| t.amount));
    total / lookback_months()
}

/// Project spending for each of the `months_ahead` months after `today`'s
/// month. Entry `i` (0-based) is `average * 1.05^(i + 1)`.
///
/// The horizon is capped at [`MAX_MONTHS_AHEAD`], and the sequence ends
/// early at the first month whose amount cannot be represented.
pub fn project_next_months(
    transactions: &[Transaction],
    today: NaiveDate,
    months_ahead: usize,
) -> Vec<ProjectedMonth> {
    let average = average_monthly(transactions);
    let factor = growth_factor();

    let current_index = today.month0() as usize;
    let mut year = today.year();
    let mut projected = average;
    let months_ahead = months_ahead.min(MAX_MONTHS_AHEAD);
    let mut out = Vec::with_capacity(months_ahead);

    for offset in 1..=months_ahead {
        projected = match projected.checked_mul(factor) {
            Some(next) => next,
            None => break,
        };
        let index = (current_index + offset) % 12;
        if index == 0 {
            year += 1;
        }
        out.push(ProjectedMonth {
            label: MONTH_LABELS[index],
            year,
            month: index as u32 + 1,
            amount: projected,
        });
    }

    out
}
