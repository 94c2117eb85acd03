use rust_decimal::Decimal;

use super::aggregate::{aggregate_by_category, CategoryTotals, MonthFilter};
use crate::models::{BudgetAlert, BudgetLimits, Category, Transaction};

/// Alerts for every limited category whose spending inside `window` is
/// strictly above its limit, in limit-table order.
pub fn evaluate_budgets(
    transactions: &[Transaction],
    limits: &BudgetLimits,
    window: MonthFilter,
) -> Vec<BudgetAlert> {
    let spending = aggregate_by_category(transactions, Some(window));
    alerts_from_totals(&spending, limits)
}

pub fn alerts_from_totals(spending: &CategoryTotals, limits: &BudgetLimits) -> Vec<BudgetAlert> {
    limits
        .iter()
        .filter_map(|(category, limit)| {
            let current = spending.get(category);
            (current > limit).then(|| BudgetAlert {
                category,
                budget_limit: limit,
                current_spending: current,
                over_by: current - limit,
            })
        })
        .collect()
}

/// Spending against one category's limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetStatus {
    pub category: Category,
    pub limit: Decimal,
    pub spent: Decimal,
}

impl BudgetStatus {
    /// Negative once the limit is exceeded.
    pub fn remaining(&self) -> Decimal {
        self.limit - self.spent
    }

    /// Percent of the limit used; zero for a non-positive limit. Saturates
    /// at `Decimal::MAX`.
    pub fn percent_used(&self) -> Decimal {
        if self.limit > Decimal::ZERO {
            self.spent
                .checked_div(self.limit)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::MAX)
        } else {
            Decimal::ZERO
        }
    }

    pub fn is_over(&self) -> bool {
        self.spent > self.limit
    }
}

pub fn budget_statuses(
    transactions: &[Transaction],
    limits: &BudgetLimits,
    window: MonthFilter,
) -> Vec<BudgetStatus> {
    let spending = aggregate_by_category(transactions, Some(window));
    limits
        .iter()
        .map(|(category, limit)| BudgetStatus {
            category,
            limit,
            spent: spending.get(category),
        })
        .collect()
}
