use rust_decimal::Decimal;

use super::Category;

/// Monthly spending limit per category. Iteration order is the order the
/// limits were declared in, which is also the order alerts are reported in.
/// A category with no entry is unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetLimits {
    limits: Vec<(Category, Decimal)>,
}

impl BudgetLimits {
    pub fn new(limits: Vec<(Category, Decimal)>) -> Self {
        let mut deduped: Vec<(Category, Decimal)> = Vec::with_capacity(limits.len());
        for (category, limit) in limits {
            match deduped.iter_mut().find(|(c, _)| *c == category) {
                Some(entry) => entry.1 = limit,
                None => deduped.push((category, limit)),
            }
        }
        Self { limits: deduped }
    }

    pub fn get(&self, category: Category) -> Option<Decimal> {
        self.limits
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, limit)| *limit)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        self.limits.iter().copied()
    }

    /// A copy with the given limits replaced. Categories not in the table
    /// are appended in the order given.
    pub fn with_overrides(&self, overrides: &[(Category, Decimal)]) -> Self {
        let mut limits = self.limits.clone();
        limits.extend_from_slice(overrides);
        Self::new(limits)
    }
}

impl Default for BudgetLimits {
    fn default() -> Self {
        Self::new(vec![
            (Category::Groceries, Decimal::from(600)),
            (Category::Dining, Decimal::from(300)),
            (Category::Entertainment, Decimal::from(200)),
            (Category::Transportation, Decimal::from(250)),
            (Category::Shopping, Decimal::from(400)),
            (Category::Utilities, Decimal::from(350)),
            (Category::Healthcare, Decimal::from(150)),
            (Category::Other, Decimal::from(200)),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetAlert {
    pub category: Category,
    pub budget_limit: Decimal,
    pub current_spending: Decimal,
    /// `current_spending - budget_limit`, always positive.
    pub over_by: Decimal,
}
