#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::metrics::FixedClock;

fn setup() -> (App, Database) {
    let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let db = Database::open_in_memory().unwrap();
    let mut app = App::new(Box::new(FixedClock(today)), false);
    app.refresh_all(&db).unwrap();
    (app, db)
}

fn run(input: &str, app: &mut App, db: &mut Database) {
    handle_command(input, app, db).unwrap();
}

// ── Registry ──────────────────────────────────────────────────

#[test]
fn test_unknown_command_suggests_closest() {
    let (mut app, mut db) = setup();
    run("dashbord", &mut app, &mut db);
    assert_eq!(
        app.status_message,
        "Unknown command: :dashbord. Did you mean :dashboard?"
    );
}

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("theme", "theme"), 0);
    assert_eq!(levenshtein("them", "theme"), 1);
    assert_eq!(levenshtein("", "goal"), 4);
}

#[test]
fn test_navigation_and_quit() {
    let (mut app, mut db) = setup();
    run("g", &mut app, &mut db);
    assert_eq!(app.screen, Screen::Goals);
    run("budgets", &mut app, &mut db);
    assert_eq!(app.screen, Screen::Budgets);
    run("help", &mut app, &mut db);
    assert!(app.show_help);
    run("q", &mut app, &mut db);
    assert!(!app.running);
}

// ── add-txn ───────────────────────────────────────────────────

#[test]
fn test_add_txn_categorizes_and_notifies() {
    let (mut app, mut db) = setup();
    run("add-txn 12.50 Lunch at cafe", &mut app, &mut db);

    assert_eq!(
        app.status_message,
        "Transaction added: Lunch at cafe categorized as Dining"
    );
    assert_eq!(app.transactions.len(), 1);
    let txn = &app.transactions[0];
    assert_eq!(txn.amount, dec!(12.50));
    assert_eq!(txn.category, Category::Dining);
    assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
}

#[test]
fn test_add_txn_with_date_and_alert() {
    let (mut app, mut db) = setup();
    run("a 310 Restaurant dinner --date 2024-03-02", &mut app, &mut db);

    assert_eq!(
        app.transactions[0].date,
        NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
    );
    assert!(app
        .status_message
        .ends_with("| Budget alert: Dining over by $10.00"));
    assert_eq!(app.visible_alerts().len(), 1);
}

#[test]
fn test_add_txn_rejects_bad_input() {
    let (mut app, mut db) = setup();
    run("add-txn lots Lunch", &mut app, &mut db);
    assert!(app.status_message.starts_with("Malformed record: amount"));

    run("add-txn 12", &mut app, &mut db);
    assert!(app.status_message.contains("description"));

    assert_eq!(db.get_transaction_count().unwrap(), 0);
}

// ── goal ──────────────────────────────────────────────────────

#[test]
fn test_goal_defaults() {
    let (mut app, mut db) = setup();
    run("goal 5000 Rainy day", &mut app, &mut db);

    assert_eq!(app.status_message, "Goal added: Rainy day");
    let goal = &app.goals[0];
    assert_eq!(goal.target_amount, dec!(5000));
    assert_eq!(goal.saved_amount, dec!(0));
    assert_eq!(goal.icon, crate::models::GoalIcon::Emergency);
}

#[test]
fn test_goal_with_flags() {
    let (mut app, mut db) = setup();
    run("goal 20000 New car --saved 2500 --icon car", &mut app, &mut db);
    let goal = &app.goals[0];
    assert_eq!(goal.name, "New car");
    assert_eq!(goal.saved_amount, dec!(2500));
    assert_eq!(goal.icon, crate::models::GoalIcon::Car);
    assert_eq!(app.summary.goals.count, 1);
}

#[test]
fn test_goal_zero_target_rejected() {
    let (mut app, mut db) = setup();
    run("goal 0 Nothing", &mut app, &mut db);
    assert!(app.status_message.starts_with("Invalid goal"));
    assert!(db.get_goals().unwrap().is_empty());
}

// ── dismiss ───────────────────────────────────────────────────

#[test]
fn test_dismiss_by_name_and_selection() {
    let (mut app, mut db) = setup();
    run("add-txn 310 Restaurant dinner", &mut app, &mut db);
    run("add-txn 450 Designer shoes", &mut app, &mut db);
    assert_eq!(app.visible_alerts().len(), 2);

    run("dismiss shopping", &mut app, &mut db);
    assert_eq!(app.status_message, "Budget alert for Shopping dismissed");
    assert_eq!(app.visible_alerts().len(), 1);

    run("dismiss", &mut app, &mut db);
    assert_eq!(app.status_message, "Budget alert for Dining dismissed");
    assert!(app.visible_alerts().is_empty());

    run("dismiss", &mut app, &mut db);
    assert_eq!(app.status_message, "No budget alert to dismiss");
}

#[test]
fn test_dismiss_unknown_or_inactive() {
    let (mut app, mut db) = setup();
    run("dismiss Rent", &mut app, &mut db);
    assert!(app.status_message.starts_with("Unknown category: Rent"));
    run("dismiss Healthcare", &mut app, &mut db);
    assert_eq!(
        app.status_message,
        "No active budget alert for Healthcare"
    );
}

// ── theme / budgets / window ──────────────────────────────────

#[test]
fn test_theme_persists() {
    let (mut app, mut db) = setup();
    run("theme", &mut app, &mut db);
    assert!(app.dark_mode);
    assert!(db.dark_mode().unwrap());
    run("theme light", &mut app, &mut db);
    assert!(!app.dark_mode);
    assert!(!db.dark_mode().unwrap());
    run("theme neon", &mut app, &mut db);
    assert!(app.status_message.starts_with("Unknown theme"));
}

#[test]
fn test_budget_override_and_reset() {
    let (mut app, mut db) = setup();
    run("budget dining 150", &mut app, &mut db);
    assert_eq!(app.status_message, "Budget for Dining set to $150.00");
    assert_eq!(app.limits.get(Category::Dining), Some(dec!(150)));

    run("add-txn 160 Restaurant", &mut app, &mut db);
    assert_eq!(app.alerts.len(), 1);

    run("reset-budgets", &mut app, &mut db);
    assert_eq!(
        app.status_message,
        "Default budget limits restored (1 override cleared)"
    );
    assert_eq!(app.limits.get(Category::Dining), Some(dec!(300)));
    assert!(app.alerts.is_empty());
}

#[test]
fn test_budget_rejects_bad_input() {
    let (mut app, mut db) = setup();
    run("budget Dining", &mut app, &mut db);
    assert!(app.status_message.starts_with("Usage: :budget"));
    run("budget Rent 100", &mut app, &mut db);
    assert!(app.status_message.starts_with("Unknown category: Rent"));
    run("budget Dining -5", &mut app, &mut db);
    assert!(app.status_message.starts_with("Malformed record: amount"));
    assert!(db.get_budget_overrides().unwrap().is_empty());
}

#[test]
fn test_window_toggle_status() {
    let (mut app, mut db) = setup();
    run("window", &mut app, &mut db);
    assert_eq!(app.status_message, "Month window: month 03 (any year)");
    run("window", &mut app, &mut db);
    assert_eq!(app.status_message, "Month window: 2024-03");
}

#[test]
fn test_categorize_preview() {
    let (mut app, mut db) = setup();
    run("categorize Uber to airport", &mut app, &mut db);
    assert_eq!(
        app.status_message,
        "'Uber to airport' would be categorized as Transportation"
    );
    assert_eq!(db.get_transaction_count().unwrap(), 0);
}

// ── import / export ───────────────────────────────────────────

#[test]
fn test_export_then_import() {
    let (mut app, mut db) = setup();
    run("add-txn 4 Coffee --date 2024-03-01", &mut app, &mut db);
    run("add-txn 60 Water bill --date 2024-03-02", &mut app, &mut db);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let path_str = path.to_str().unwrap();
    run(&format!("export {path_str}"), &mut app, &mut db);
    assert_eq!(
        app.status_message,
        format!("Exported 2 transactions to {path_str}")
    );

    let written = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "date,description,amount,category");
    assert_eq!(lines[1], "2024-03-01,Coffee,4,Dining");
    assert_eq!(lines[2], "2024-03-02,Water bill,60,Utilities");

    run(&format!("import {path_str} --replace"), &mut app, &mut db);
    assert_eq!(app.status_message, "Imported 2 transactions");
    assert_eq!(app.screen, Screen::Transactions);
    assert_eq!(app.transactions.len(), 2);
    assert_eq!(app.transactions[0].description, "Water bill");
}

#[test]
fn test_import_missing_file() {
    let (mut app, mut db) = setup();
    run("import /nonexistent/finsmart.csv", &mut app, &mut db);
    assert_eq!(
        app.status_message,
        "File not found: /nonexistent/finsmart.csv"
    );
}
