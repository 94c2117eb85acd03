mod budget;
mod category;
mod goal;
mod transaction;

pub use budget::{BudgetAlert, BudgetLimits};
pub use category::Category;
pub use goal::{Goal, GoalDraft, GoalIcon};
pub use transaction::{Transaction, TransactionDraft};

pub(crate) use transaction::{parse_amount, parse_money};
