use rust_decimal::Decimal;

use super::aggregate::{filter_by_month, sum_amounts, MonthFilter};
use super::goals::{goal_totals, GoalTotals};
use crate::models::{Goal, Transaction};

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardSummary {
    pub month_spending: Decimal,
    pub month_count: usize,
    /// Mean amount over the whole log; zero when the log is empty.
    pub average_transaction: Decimal,
    pub goals: GoalTotals,
}

impl DashboardSummary {
    pub fn compute(transactions: &[Transaction], goals: &[Goal], window: MonthFilter) -> Self {
        let (month_spending, month_count) =
            sum_amounts(filter_by_month(transactions, Some(window)).map(|t| t.amount));

        let (total, counted) = sum_amounts(transactions.iter().map(|t| t.amount));
        let average_transaction = if counted == 0 {
            Decimal::ZERO
        } else {
            total / Decimal::from(counted)
        };

        Self {
            month_spending,
            month_count,
            average_transaction,
            goals: goal_totals(goals),
        }
    }
}
