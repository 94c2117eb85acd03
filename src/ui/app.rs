use anyhow::Result;
use chrono::NaiveDate;
use std::collections::HashSet;

use crate::categorize::Categorizer;
use crate::db::Database;
use crate::metrics::{
    aggregate_by_category, alerts_from_totals, budget_statuses, project_next_months,
    BudgetStatus, CategoryTotals, Clock, DashboardSummary, MonthFilter, ProjectedMonth,
    DEFAULT_MONTHS_AHEAD,
};
use crate::models::{BudgetAlert, BudgetLimits, Category, Goal, Transaction};

use super::theme::{self, Palette};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Goals,
    Budgets,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Transactions,
            Self::Goals,
            Self::Budgets,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Goals => write!(f, "Goals"),
            Self::Budgets => write!(f, "Budgets"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) dark_mode: bool,

    pub(crate) categorizer: Categorizer,
    clock: Box<dyn Clock>,
    pub(crate) today: NaiveDate,
    /// Month the dashboard and budget screens are evaluated against.
    pub(crate) window: MonthFilter,

    // Source records, as stored
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) goals: Vec<Goal>,
    pub(crate) limits: BudgetLimits,

    // Derived, rebuilt by `recompute`
    pub(crate) summary: DashboardSummary,
    pub(crate) category_totals: CategoryTotals,
    pub(crate) alerts: Vec<BudgetAlert>,
    pub(crate) budget_statuses: Vec<BudgetStatus>,
    pub(crate) projection: Vec<ProjectedMonth>,

    /// Alerts acknowledged this session. Cleared whenever the log changes.
    pub(crate) dismissed: HashSet<Category>,

    pub(crate) alert_index: usize,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,
    pub(crate) goal_index: usize,
    pub(crate) goal_scroll: usize,
    pub(crate) budget_index: usize,
    pub(crate) budget_scroll: usize,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(clock: Box<dyn Clock>, dark_mode: bool) -> Self {
        let today = clock.today();
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            dark_mode,

            categorizer: Categorizer::default(),
            clock,
            today,
            window: MonthFilter::current(today),

            transactions: Vec::new(),
            goals: Vec::new(),
            limits: BudgetLimits::default(),

            summary: DashboardSummary::default(),
            category_totals: CategoryTotals::default(),
            alerts: Vec::new(),
            budget_statuses: Vec::new(),
            projection: Vec::new(),

            dismissed: HashSet::new(),

            alert_index: 0,
            transaction_index: 0,
            transaction_scroll: 0,
            goal_index: 0,
            goal_scroll: 0,
            budget_index: 0,
            budget_scroll: 0,

            visible_rows: 20,
        }
    }

    /// Reload every record from the store, then rebuild the derived metrics.
    pub(crate) fn refresh_all(&mut self, db: &Database) -> Result<()> {
        let today = self.clock.today();
        if today != self.today {
            // Keep the window kind, move it to the new current month
            self.window = match self.window {
                MonthFilter::YearMonth { .. } => MonthFilter::current(today),
                MonthFilter::MonthOfYear(_) => MonthFilter::current_month_of_year(today),
            };
            self.today = today;
        }
        self.transactions = db.get_transactions()?;
        self.goals = db.get_goals()?;
        self.limits = db.budget_limits()?;
        self.recompute();
        Ok(())
    }

    /// Refresh after the transaction log was written. Earlier dismissals no
    /// longer apply to the new totals.
    pub(crate) fn log_changed(&mut self, db: &Database) -> Result<()> {
        self.dismissed.clear();
        self.refresh_all(db)
    }

    /// Rebuild every derived value from the current records. Nothing derived
    /// is carried over from a previous pass.
    pub(crate) fn recompute(&mut self) {
        self.summary = DashboardSummary::compute(&self.transactions, &self.goals, self.window);
        self.category_totals = aggregate_by_category(&self.transactions, None);
        let window_totals = aggregate_by_category(&self.transactions, Some(self.window));
        self.alerts = alerts_from_totals(&window_totals, &self.limits);
        self.budget_statuses = budget_statuses(&self.transactions, &self.limits, self.window);
        self.projection =
            project_next_months(&self.transactions, self.today, DEFAULT_MONTHS_AHEAD);
        self.clamp_cursors();
    }

    /// Alerts not yet dismissed this session, in limit-table order.
    pub(crate) fn visible_alerts(&self) -> Vec<&BudgetAlert> {
        self.alerts
            .iter()
            .filter(|a| !self.dismissed.contains(&a.category))
            .collect()
    }

    /// Returns false when there is no such active alert.
    pub(crate) fn dismiss_alert(&mut self, category: Category) -> bool {
        let active = self.alerts.iter().any(|a| a.category == category);
        if active {
            self.dismissed.insert(category);
            self.clamp_cursors();
        }
        active
    }

    pub(crate) fn selected_alert(&self) -> Option<&BudgetAlert> {
        self.visible_alerts().get(self.alert_index).copied()
    }

    /// Toggle between the year-month window and the month-number window.
    pub(crate) fn toggle_window(&mut self) {
        self.window = match self.window {
            MonthFilter::YearMonth { .. } => MonthFilter::current_month_of_year(self.today),
            MonthFilter::MonthOfYear(_) => MonthFilter::current(self.today),
        };
        self.recompute();
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) fn palette(&self) -> &'static Palette {
        theme::palette(self.dark_mode)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn clamp_cursors(&mut self) {
        let clamp = |index: &mut usize, len: usize| {
            if *index >= len {
                *index = len.saturating_sub(1);
            }
        };
        let alert_len = self.visible_alerts().len();
        clamp(&mut self.alert_index, alert_len);
        clamp(&mut self.transaction_index, self.transactions.len());
        clamp(&mut self.goal_index, self.goals.len());
        clamp(&mut self.budget_index, self.budget_statuses.len());
        self.transaction_scroll = self.transaction_scroll.min(self.transaction_index);
        self.goal_scroll = self.goal_scroll.min(self.goal_index);
        self.budget_scroll = self.budget_scroll.min(self.budget_index);
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
