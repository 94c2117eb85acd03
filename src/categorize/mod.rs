use crate::models::Category;

/// One entry of the rule table: any keyword found in the lower-cased
/// description assigns `category`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: Category, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn matches(&self, desc_lower: &str) -> bool {
        self.keywords.iter().any(|k| desc_lower.contains(k.as_str()))
    }
}

/// Keyword categorizer. Rules are checked in table order and the first
/// rule with a matching keyword wins; no match falls back to `fallback`.
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Vec<CategoryRule>,
    fallback: Category,
}

impl Categorizer {
    pub fn new(rules: Vec<CategoryRule>, fallback: Category) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn categorize(&self, description: &str) -> Category {
        let desc_lower = description.to_lowercase();

        self.rules
            .iter()
            .find(|rule| rule.matches(&desc_lower))
            .map(|rule| rule.category)
            .unwrap_or(self.fallback)
    }

    /// Precedence rank of a category in this table (0 = checked first).
    /// The fallback ranks after every rule.
    pub fn rank(&self, category: Category) -> usize {
        self.rules
            .iter()
            .position(|r| r.category == category)
            .unwrap_or(self.rules.len())
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(
            vec![
                CategoryRule::new(Category::Groceries, &["grocery", "food", "supermarket"]),
                CategoryRule::new(Category::Utilities, &["gas", "fuel", "electric", "water"]),
                CategoryRule::new(Category::Dining, &["restaurant", "dining", "coffee", "lunch"]),
                CategoryRule::new(
                    Category::Entertainment,
                    &["movie", "game", "entertainment", "netflix"],
                ),
                CategoryRule::new(Category::Transportation, &["transport", "uber", "taxi", "bus"]),
                CategoryRule::new(
                    Category::Healthcare,
                    &["health", "medical", "doctor", "pharmacy"],
                ),
                CategoryRule::new(Category::Shopping, &["clothes", "clothing", "fashion", "shoes"]),
            ],
            Category::Other,
        )
    }
}

#[cfg(test)]
mod tests;
