use rust_decimal::Decimal;

use super::transaction::parse_money;
use crate::error::{CoreError, CoreResult};

/// Cosmetic tag shown next to a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoalIcon {
    #[default]
    Emergency,
    Vacation,
    House,
    Car,
    Other,
}

impl GoalIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Vacation => "vacation",
            Self::House => "house",
            Self::Car => "car",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "emergency" => Self::Emergency,
            "vacation" => Self::Vacation,
            "house" | "home" => Self::House,
            "car" => Self::Car,
            _ => Self::Other,
        }
    }

    /// Single glyph used by the terminal UI.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Emergency => "+",
            Self::Vacation => "~",
            Self::House => "^",
            Self::Car => "=",
            Self::Other => "*",
        }
    }
}

impl std::fmt::Display for GoalIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    pub id: Option<i64>,
    pub name: String,
    pub target_amount: Decimal,
    /// May exceed `target_amount`.
    pub saved_amount: Decimal,
    pub icon: GoalIcon,
}

impl Goal {
    pub fn new(name: String, target_amount: Decimal, saved_amount: Decimal, icon: GoalIcon) -> Self {
        Self {
            id: None,
            name,
            target_amount,
            saved_amount,
            icon,
        }
    }
}

/// Raw user input for a savings goal.
#[derive(Debug, Clone, Default)]
pub struct GoalDraft {
    pub name: String,
    pub target_amount: String,
    /// Empty means nothing saved yet.
    pub saved_amount: String,
    /// Empty means `emergency`.
    pub icon: String,
}

impl GoalDraft {
    pub fn validate(&self) -> CoreResult<Goal> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::malformed("name", "is required"));
        }

        let target = parse_money("targetAmount", &self.target_amount)?;
        if target <= Decimal::ZERO {
            return Err(CoreError::InvalidGoal { target });
        }

        let saved = if self.saved_amount.trim().is_empty() {
            Decimal::ZERO
        } else {
            parse_money("savedAmount", &self.saved_amount)?
        };
        if saved < Decimal::ZERO {
            return Err(CoreError::malformed("savedAmount", "must not be negative"));
        }

        let icon = if self.icon.trim().is_empty() {
            GoalIcon::default()
        } else {
            GoalIcon::parse(&self.icon)
        };

        Ok(Goal::new(name.to_string(), target, saved, icon))
    }
}
