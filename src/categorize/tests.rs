#![allow(clippy::unwrap_used)]

use super::*;

fn keywords_for(category: Category) -> Vec<String> {
    Categorizer::default()
        .rules()
        .iter()
        .find(|r| r.category == category)
        .map(|r| r.keywords.clone())
        .unwrap_or_default()
}

// ── Default rule table ────────────────────────────────────────

#[test]
fn test_each_keyword_in_isolation() {
    let cat = Categorizer::default();
    for rule in cat.rules() {
        for keyword in &rule.keywords {
            let desc = format!("Paid for {keyword} today");
            assert_eq!(
                cat.categorize(&desc),
                rule.category,
                "keyword '{keyword}' should map to {}",
                rule.category
            );
        }
    }
}

#[test]
fn test_examples_from_sample_data() {
    let cat = Categorizer::default();
    assert_eq!(cat.categorize("Grocery shopping at Walmart"), Category::Groceries);
    assert_eq!(cat.categorize("Netflix subscription"), Category::Entertainment);
    assert_eq!(cat.categorize("Electric bill payment"), Category::Utilities);
    assert_eq!(cat.categorize("Lunch at Italian restaurant"), Category::Dining);
    assert_eq!(cat.categorize("Uber ride to airport"), Category::Transportation);
}

#[test]
fn test_categorize_case_insensitive() {
    let cat = Categorizer::default();
    assert_eq!(cat.categorize("COFFEE SHOP"), Category::Dining);
    assert_eq!(cat.categorize("Coffee Shop"), Category::Dining);
    assert_eq!(cat.categorize("coffee shop"), Category::Dining);
}

#[test]
fn test_categorize_no_match_is_other() {
    let cat = Categorizer::default();
    assert_eq!(cat.categorize("Rent for October"), Category::Other);
    assert_eq!(cat.categorize(""), Category::Other);
}

#[test]
fn test_categorize_substring_match() {
    let cat = Categorizer::default();
    // "bus" is found inside "business"
    assert_eq!(cat.categorize("Business cards"), Category::Transportation);
    // "gas" is checked under Utilities, not Transportation
    assert_eq!(cat.categorize("Gas station"), Category::Utilities);
}

// ── Precedence ────────────────────────────────────────────────

#[test]
fn test_groceries_beat_dining() {
    let cat = Categorizer::default();
    assert_eq!(cat.categorize("grocery lunch"), Category::Groceries);
}

#[test]
fn test_dining_beats_transportation() {
    let cat = Categorizer::default();
    assert_eq!(cat.categorize("lunch then taxi home"), Category::Dining);
    assert_eq!(cat.categorize("taxi to lunch"), Category::Dining);
}

#[test]
fn test_utilities_beat_dining() {
    let cat = Categorizer::default();
    assert_eq!(cat.categorize("water and coffee"), Category::Utilities);
}

#[test]
fn test_healthcare_beats_shopping() {
    let cat = Categorizer::default();
    assert_eq!(cat.categorize("shoes from the pharmacy"), Category::Healthcare);
}

#[test]
fn test_pairwise_precedence_follows_table_order() {
    let cat = Categorizer::default();
    let rules = cat.rules();
    for (i, earlier) in rules.iter().enumerate() {
        for later in &rules[i + 1..] {
            let desc = format!("{} {}", later.keywords[0], earlier.keywords[0]);
            assert_eq!(cat.categorize(&desc), earlier.category, "desc: {desc}");
        }
    }
}

#[test]
fn test_default_table_order() {
    let order: Vec<Category> = Categorizer::default()
        .rules()
        .iter()
        .map(|r| r.category)
        .collect();
    assert_eq!(
        order,
        vec![
            Category::Groceries,
            Category::Utilities,
            Category::Dining,
            Category::Entertainment,
            Category::Transportation,
            Category::Healthcare,
            Category::Shopping,
        ]
    );
}

#[test]
fn test_rank() {
    let cat = Categorizer::default();
    assert_eq!(cat.rank(Category::Groceries), 0);
    assert_eq!(cat.rank(Category::Utilities), 1);
    assert_eq!(cat.rank(Category::Shopping), 6);
    assert_eq!(cat.rank(Category::Other), 7);
}

// ── Custom tables ─────────────────────────────────────────────

#[test]
fn test_custom_table_first_match_wins() {
    let cat = Categorizer::new(
        vec![
            CategoryRule::new(Category::Shopping, &["shop"]),
            CategoryRule::new(Category::Dining, &["coffee shop"]),
        ],
        Category::Other,
    );
    assert_eq!(cat.categorize("Coffee Shop"), Category::Shopping);
}

#[test]
fn test_custom_table_keywords_lowercased() {
    let cat = Categorizer::new(
        vec![CategoryRule::new(Category::Groceries, &["COSTCO"])],
        Category::Other,
    );
    assert_eq!(cat.categorize("costco wholesale"), Category::Groceries);
}

#[test]
fn test_empty_table_uses_fallback() {
    let cat = Categorizer::new(vec![], Category::Shopping);
    assert_eq!(cat.categorize("anything"), Category::Shopping);
}

#[test]
fn test_deterministic() {
    let cat = Categorizer::default();
    let first = cat.categorize("Lunch at the food court");
    let second = cat.categorize("Lunch at the food court");
    assert_eq!(first, second);
    assert_eq!(first, Category::Groceries);
    assert!(keywords_for(Category::Groceries).contains(&"food".to_string()));
}
