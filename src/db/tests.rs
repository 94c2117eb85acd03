#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn make_txn(description: &str, amount: Decimal, date: &str) -> Transaction {
    TransactionDraft::new(description, &amount.to_string(), date)
        .validate(&Categorizer::default(), today())
        .unwrap()
}

// ── Sample data ───────────────────────────────────────────────

#[test]
fn test_sample_data_seeded_once() {
    let mut db = Database::open_in_memory().unwrap();
    assert!(db.seed_sample_data(today()).unwrap());

    let txns = db.get_transactions().unwrap();
    assert_eq!(txns.len(), 5);
    assert_eq!(txns[0].description, "Grocery shopping at Walmart");
    assert_eq!(txns[0].category, Category::Groceries);
    assert_eq!(txns[4].description, "Uber ride to airport");
    assert_eq!(txns[4].category, Category::Transportation);

    let goals = db.get_goals().unwrap();
    assert_eq!(goals.len(), 3);
    assert_eq!(goals[0].name, "Emergency Fund");
    assert_eq!(goals[1].icon, GoalIcon::Vacation);

    assert!(!db.seed_sample_data(today()).unwrap());
    assert_eq!(db.get_transaction_count().unwrap(), 5);
}

#[test]
fn test_sample_data_not_reseeded_after_clearing() {
    let mut db = Database::open_in_memory().unwrap();
    db.seed_sample_data(today()).unwrap();
    db.replace_transactions(&[]).unwrap();
    assert!(!db.seed_sample_data(today()).unwrap());
    assert_eq!(db.get_transaction_count().unwrap(), 0);
}

#[test]
fn test_sample_data_skips_existing_log() {
    let mut db = Database::open_in_memory().unwrap();
    db.insert_transaction(&make_txn("Coffee", dec!(4), "2024-03-01"))
        .unwrap();
    assert!(db.seed_sample_data(today()).unwrap());
    // Only goals were seeded
    assert_eq!(db.get_transaction_count().unwrap(), 1);
    assert_eq!(db.get_goals().unwrap().len(), 3);
}

// ── Transactions ──────────────────────────────────────────────

#[test]
fn test_transaction_roundtrip() {
    let db = Database::open_in_memory().unwrap();
    let txn = make_txn("Pharmacy run", dec!(23.45), "2024-02-29");
    let id = db.insert_transaction(&txn).unwrap();

    let all = db.get_transactions().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, Some(id));
    assert_eq!(all[0].description, "Pharmacy run");
    assert_eq!(all[0].amount, dec!(23.45));
    assert_eq!(all[0].date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    assert_eq!(all[0].category, Category::Healthcare);
}

#[test]
fn test_transactions_newest_first_with_growing_ids() {
    let db = Database::open_in_memory().unwrap();
    let first = db
        .insert_transaction(&make_txn("Movie night", dec!(20), "2024-03-01"))
        .unwrap();
    let second = db
        .insert_transaction(&make_txn("Bus fare", dec!(3), "2024-01-01"))
        .unwrap();
    assert!(second > first);

    let all = db.get_transactions().unwrap();
    assert_eq!(all[0].id, Some(second));
    assert_eq!(all[1].id, Some(first));
}

#[test]
fn test_stored_category_is_not_recomputed() {
    let db = Database::open_in_memory().unwrap();
    let mut txn = make_txn("Water bill", dec!(60), "2024-03-01");
    // Assigned under some earlier rule table
    txn.category = Category::Other;
    db.insert_transaction(&txn).unwrap();
    assert_eq!(db.get_transactions().unwrap()[0].category, Category::Other);
}

#[test]
fn test_unreadable_rows_are_skipped() {
    let db = Database::open_in_memory().unwrap();
    db.insert_transaction(&make_txn("Coffee", dec!(4), "2024-03-01"))
        .unwrap();
    db.conn
        .execute(
            "INSERT INTO transactions (description, amount, date, category, created_at)
             VALUES ('broken', 'abc', '2024-03-02', 'Dining', '')",
            [],
        )
        .unwrap();
    db.conn
        .execute(
            "INSERT INTO transactions (description, amount, date, category, created_at)
             VALUES ('renamed', '5', '2024-03-02', 'Rent', '')",
            [],
        )
        .unwrap();

    db.conn
        .execute(
            "INSERT INTO transactions (description, amount, date, category, created_at)
             VALUES ('huge', '50000000000000000000000000000', '2024-03-02', 'Other', '')",
            [],
        )
        .unwrap();

    let all = db.get_transactions().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].description, "Coffee");
    assert_eq!(db.get_transaction_count().unwrap(), 4);
}

#[test]
fn test_replace_transactions() {
    let mut db = Database::open_in_memory().unwrap();
    db.insert_transaction(&make_txn("Old", dec!(1), "2024-01-01"))
        .unwrap();

    let replacement = vec![
        make_txn("Taxi", dec!(12), "2024-02-01"),
        make_txn("Shoes", dec!(80), "2024-02-02"),
    ];
    assert_eq!(db.replace_transactions(&replacement).unwrap(), 2);

    let all = db.get_transactions().unwrap();
    let descriptions: Vec<&str> = all.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descriptions, vec!["Shoes", "Taxi"]);
}

#[test]
fn test_replace_with_empty_log() {
    let mut db = Database::open_in_memory().unwrap();
    db.insert_transaction(&make_txn("Old", dec!(1), "2024-01-01"))
        .unwrap();
    db.replace_transactions(&[]).unwrap();
    assert!(db.get_transactions().unwrap().is_empty());
}

// ── Goals ─────────────────────────────────────────────────────

#[test]
fn test_goal_roundtrip() {
    let db = Database::open_in_memory().unwrap();
    let goal = Goal::new("House".into(), dec!(50000), dec!(60000), GoalIcon::House);
    let id = db.insert_goal(&goal).unwrap();

    let goals = db.get_goals().unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].id, Some(id));
    assert_eq!(goals[0].target_amount, dec!(50000));
    assert_eq!(goals[0].saved_amount, dec!(60000));
    assert_eq!(goals[0].icon, GoalIcon::House);
}

#[test]
fn test_goals_in_creation_order() {
    let db = Database::open_in_memory().unwrap();
    for name in ["A", "B", "C"] {
        db.insert_goal(&Goal::new(name.into(), dec!(1), dec!(0), GoalIcon::Other))
            .unwrap();
    }
    let names: Vec<String> = db.get_goals().unwrap().into_iter().map(|g| g.name).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn test_unreadable_goal_rows_are_skipped() {
    let db = Database::open_in_memory().unwrap();
    db.insert_goal(&Goal::new("Car".into(), dec!(8000), dec!(0), GoalIcon::Car))
        .unwrap();
    db.conn
        .execute(
            "INSERT INTO goals (name, target_amount, saved_amount, icon, created_at)
             VALUES ('Speck', '0.0000000000000000000000000001', '10000000000', 'other', '')",
            [],
        )
        .unwrap();

    let goals = db.get_goals().unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].name, "Car");
}

// ── Settings ──────────────────────────────────────────────────

#[test]
fn test_settings_upsert() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.get_setting("x").unwrap(), None);
    db.set_setting("x", "1").unwrap();
    db.set_setting("x", "2").unwrap();
    assert_eq!(db.get_setting("x").unwrap(), Some("2".to_string()));
}

#[test]
fn test_dark_mode_flag() {
    let db = Database::open_in_memory().unwrap();
    assert!(!db.dark_mode().unwrap());
    db.set_dark_mode(true).unwrap();
    assert!(db.dark_mode().unwrap());
    db.set_dark_mode(false).unwrap();
    assert!(!db.dark_mode().unwrap());
}

#[test]
fn test_budget_overrides() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.budget_limits().unwrap(), BudgetLimits::default());

    db.set_budget_override(Category::Shopping, dec!(123.45)).unwrap();
    db.set_budget_override(Category::Dining, dec!(99)).unwrap();
    assert_eq!(
        db.get_budget_overrides().unwrap(),
        vec![(Category::Dining, dec!(99)), (Category::Shopping, dec!(123.45))]
    );

    let limits = db.budget_limits().unwrap();
    assert_eq!(limits.get(Category::Shopping), Some(dec!(123.45)));
    assert_eq!(limits.get(Category::Groceries), Some(dec!(600)));
    let order: Vec<Category> = limits.iter().map(|(c, _)| c).collect();
    assert_eq!(order, Category::all().to_vec());

    assert_eq!(db.clear_budget_overrides().unwrap(), 2);
    assert_eq!(db.budget_limits().unwrap(), BudgetLimits::default());
}

#[test]
fn test_bad_budget_override_ignored() {
    let db = Database::open_in_memory().unwrap();
    db.set_setting("budget_limit.Rent", "100").unwrap();
    db.set_setting("budget_limit.Dining", "lots").unwrap();
    assert!(db.get_budget_overrides().unwrap().is_empty());
}

#[test]
fn test_open_file_database_seeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("finsmart.db");
    {
        let db = Database::open(&path, today()).unwrap();
        assert_eq!(db.get_transaction_count().unwrap(), 5);
        db.set_dark_mode(true).unwrap();
    }
    let db = Database::open(&path, today()).unwrap();
    assert_eq!(db.get_transaction_count().unwrap(), 5);
    assert!(db.dark_mode().unwrap());
}
