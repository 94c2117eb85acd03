use rust_decimal::Decimal;

use super::aggregate::sum_amounts;
use crate::error::{CoreError, CoreResult};
use crate::models::Goal;

/// `saved / target * 100`, unbounded above. A non-positive target, or one
/// so small the ratio cannot be represented, is an error rather than a
/// sentinel value.
pub fn goal_progress(goal: &Goal) -> CoreResult<Decimal> {
    let invalid = || CoreError::InvalidGoal {
        target: goal.target_amount,
    };
    if goal.target_amount <= Decimal::ZERO {
        return Err(invalid());
    }
    goal
        .saved_amount
        .checked_div(goal.target_amount)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(invalid)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GoalTotals {
    pub total_saved: Decimal,
    pub total_target: Decimal,
    /// Zero when `total_target` is zero.
    pub overall_progress: Decimal,
    pub count: usize,
}

pub fn goal_totals(goals: &[Goal]) -> GoalTotals {
    let (total_saved, _) = sum_amounts(goals.iter().map(|g| g.saved_amount));
    let (total_target, _) = sum_amounts(goals.iter().map(|g| g.target_amount));
    let overall_progress = if total_target > Decimal::ZERO {
        total_saved
            .checked_div(total_target)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    };

    GoalTotals {
        total_saved,
        total_target,
        overall_progress,
        count: goals.len(),
    }
}
