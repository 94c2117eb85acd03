//! Derived metrics computed from the transaction and goal logs.
//!
//! Every function here is a pure function of its inputs and an explicit
//! `today`; nothing is cached and no input is mutated. Callers recompute
//! whenever the log changes.

mod aggregate;
mod budget;
mod clock;
mod goals;
mod projection;
mod summary;

pub use aggregate::{aggregate_by_category, filter_by_month, CategoryTotals, MonthFilter};
pub use budget::{alerts_from_totals, budget_statuses, evaluate_budgets, BudgetStatus};
pub use clock::{Clock, FixedClock, SystemClock};
pub use goals::{goal_progress, goal_totals, GoalTotals};
pub use projection::{
    average_monthly, project_next_months, ProjectedMonth, DEFAULT_MONTHS_AHEAD, MAX_MONTHS_AHEAD,
};
pub use summary::DashboardSummary;
