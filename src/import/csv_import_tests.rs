#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;
use std::io::Write;

fn make_csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
    data.iter()
        .map(|r| r.iter().map(|s| s.to_string()).collect())
        .collect()
}

// ── read ──────────────────────────────────────────────────────

#[test]
fn test_read_with_header() {
    let file = make_csv_file("Date,Description,Amount\n2024-01-15,Coffee,4.50\n");
    let (headers, rows) = CsvImporter::read(file.path()).unwrap();
    assert_eq!(headers, vec!["Date", "Description", "Amount"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1], "Coffee");
}

#[test]
fn test_read_without_header() {
    let file = make_csv_file("01/15/2024,Coffee,4.50\n01/16/2024,Taxi,12\n");
    let (headers, rows) = CsvImporter::read(file.path()).unwrap();
    assert_eq!(headers, vec!["Column 1", "Column 2", "Column 3"]);
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_read_empty_file() {
    let file = make_csv_file("");
    assert!(CsvImporter::read(file.path()).is_err());
}

#[test]
fn test_read_missing_file() {
    assert!(CsvImporter::read(Path::new("/nonexistent/file.csv")).is_err());
}

// ── CsvProfile ────────────────────────────────────────────────

#[test]
fn test_profile_from_headers() {
    let headers: Vec<String> = ["Amount", "Memo", "Posted Date", "Category"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let profile = CsvProfile::from_headers(&headers);
    assert_eq!(
        profile,
        CsvProfile {
            date_column: 2,
            description_column: 1,
            amount_column: 0,
            category_column: None,
        }
    );
}

#[test]
fn test_profile_trusts_category_only_from_export_header() {
    let export: Vec<String> = ["date", "description", "amount", "category"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(CsvProfile::from_headers(&export).category_column, Some(3));

    let bank: Vec<String> = ["Date", "Description", "Amount", "Category"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(CsvProfile::from_headers(&bank).category_column, None);
}

#[test]
fn test_profile_generic_headers_use_default() {
    let headers: Vec<String> = vec!["Column 1".into(), "Column 2".into(), "Column 3".into()];
    assert_eq!(CsvProfile::from_headers(&headers), CsvProfile::default());
}

// ── parse ─────────────────────────────────────────────────────

#[test]
fn test_parse_categorizes_rows() {
    let data = rows(&[
        &["2024-01-15", "Grocery run", "85.50"],
        &["01/16/2024", "Taxi to office", "$1,012.00"],
    ]);
    let outcome = CsvImporter::parse(
        &data,
        &CsvProfile::default(),
        &Categorizer::default(),
        today(),
    );
    assert!(outcome.rejected.is_empty());
    assert_eq!(outcome.transactions.len(), 2);
    assert_eq!(outcome.transactions[0].category, Category::Groceries);
    assert_eq!(outcome.transactions[1].category, Category::Transportation);
    assert_eq!(outcome.transactions[1].amount, dec!(1012.00));
}

#[test]
fn test_parse_rejects_bad_rows_individually() {
    let data = rows(&[
        &["2024-01-15", "Coffee", "4.50"],
        &["2024-01-16", "Lunch", "abc"],
        &["", "No date", "3"],
        &["2024-01-17", "", "3"],
        &["2024-01-18", "Movie", "-12"],
        &["2024-01-19", "Bus"],
        &["2024-01-20", "Netflix", "15.99"],
    ]);
    let outcome = CsvImporter::parse(
        &data,
        &CsvProfile::default(),
        &Categorizer::default(),
        today(),
    );
    let accepted: Vec<&str> = outcome
        .transactions
        .iter()
        .map(|t| t.description.as_str())
        .collect();
    assert_eq!(accepted, vec!["Coffee", "Netflix"]);
    let rejected_rows: Vec<usize> = outcome.rejected.iter().map(|(row, _)| *row).collect();
    assert_eq!(rejected_rows, vec![2, 3, 4, 5, 6]);
    assert!(outcome.rejected[0].1.contains("amount"));
    assert!(outcome.rejected[1].1.contains("date"));
}

#[test]
fn test_parse_skips_blank_rows() {
    let data = rows(&[&["", "", ""], &["2024-01-15", "Coffee", "4.50"]]);
    let outcome = CsvImporter::parse(
        &data,
        &CsvProfile::default(),
        &Categorizer::default(),
        today(),
    );
    assert_eq!(outcome.transactions.len(), 1);
    assert!(outcome.rejected.is_empty());
}

#[test]
fn test_parse_keeps_recorded_category() {
    let profile = CsvProfile {
        category_column: Some(3),
        ..CsvProfile::default()
    };
    let data = rows(&[
        &["2024-01-15", "Coffee beans", "14", "Groceries"],
        &["2024-01-16", "Coffee", "4", "not-a-category"],
    ]);
    let outcome = CsvImporter::parse(&data, &profile, &Categorizer::default(), today());
    assert_eq!(outcome.transactions[0].category, Category::Groceries);
    // Unknown label falls back to the categorizer
    assert_eq!(outcome.transactions[1].category, Category::Dining);
}

// ── export ────────────────────────────────────────────────────

#[test]
fn test_export_then_import_preserves_log() {
    let log = vec![
        TransactionDraft::new("Water bill", "60", "2024-02-01")
            .validate(&Categorizer::default(), today())
            .unwrap(),
        Transaction {
            id: Some(7),
            description: "Gift, wrapped".into(),
            amount: dec!(19.99),
            date: NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(),
            category: Category::Shopping,
        },
    ];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    assert_eq!(export_csv(&path, &log).unwrap(), 2);

    let (headers, data) = CsvImporter::read(&path).unwrap();
    let profile = CsvProfile::from_headers(&headers);
    let outcome = CsvImporter::parse(&data, &profile, &Categorizer::default(), today());
    assert!(outcome.rejected.is_empty());
    assert_eq!(outcome.transactions.len(), 2);
    assert_eq!(outcome.transactions[0].category, Category::Utilities);
    assert_eq!(outcome.transactions[1].description, "Gift, wrapped");
    assert_eq!(outcome.transactions[1].amount, dec!(19.99));
    assert_eq!(outcome.transactions[1].category, Category::Shopping);
}

// ── import_file ───────────────────────────────────────────────

#[test]
fn test_import_file_appends_good_rows() {
    let mut db = Database::open_in_memory().unwrap();
    let file = make_csv_file(
        "date,description,amount\n2024-03-01,Coffee,4.50\n2024-03-02,Lunch,oops\n2024-03-03,Uber home,18\n",
    );
    let outcome =
        import_file(&mut db, file.path(), &Categorizer::default(), today(), false).unwrap();
    assert_eq!(outcome.transactions.len(), 2);
    assert_eq!(outcome.rejected.len(), 1);

    let stored = db.get_transactions().unwrap();
    assert_eq!(stored.len(), 2);
    // Newest insert first
    assert_eq!(stored[0].description, "Uber home");
    assert_eq!(stored[0].category, Category::Transportation);
}

#[test]
fn test_import_file_recategorizes_foreign_labels() {
    let mut db = Database::open_in_memory().unwrap();
    let file = make_csv_file(
        "Date,Description,Amount,Category\n2024-03-01,Uber to work,15,Dining\n",
    );
    import_file(&mut db, file.path(), &Categorizer::default(), today(), false).unwrap();

    let stored = db.get_transactions().unwrap();
    assert_eq!(stored[0].category, Category::Transportation);
}

#[test]
fn test_import_file_replace_swaps_log() {
    let mut db = Database::open_in_memory().unwrap();
    let first = make_csv_file("2024-03-01,Coffee,4.50\n");
    import_file(&mut db, first.path(), &Categorizer::default(), today(), false).unwrap();

    let second = make_csv_file("2024-03-05,Doctor visit,80\n2024-03-06,Shoes,60\n");
    import_file(&mut db, second.path(), &Categorizer::default(), today(), true).unwrap();

    let descriptions: Vec<String> = db
        .get_transactions()
        .unwrap()
        .into_iter()
        .map(|t| t.description)
        .collect();
    assert_eq!(descriptions, vec!["Shoes", "Doctor visit"]);
}

#[test]
fn test_import_file_replace_refuses_empty_result() {
    let mut db = Database::open_in_memory().unwrap();
    let good = make_csv_file("2024-03-01,Coffee,4.50\n");
    import_file(&mut db, good.path(), &Categorizer::default(), today(), false).unwrap();

    let bad = make_csv_file("2024-03-01,Coffee,free\n");
    assert!(import_file(&mut db, bad.path(), &Categorizer::default(), today(), true).is_err());
    assert_eq!(db.get_transaction_count().unwrap(), 1);
}
