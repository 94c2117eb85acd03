use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::categorize::Categorizer;
use crate::db::Database;
use crate::error::CoreError;
use crate::models::{Category, Transaction, TransactionDraft};

/// Header row written by [`export_csv`].
const EXPORT_HEADERS: [&str; 4] = ["date", "description", "amount", "category"];

/// Column positions of a transaction CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CsvProfile {
    pub(crate) date_column: usize,
    pub(crate) description_column: usize,
    pub(crate) amount_column: usize,
    /// Set only for files written by [`export_csv`]. A readable label there
    /// is kept as-is instead of re-running the categorizer.
    pub(crate) category_column: Option<usize>,
}

impl Default for CsvProfile {
    fn default() -> Self {
        Self {
            date_column: 0,
            description_column: 1,
            amount_column: 2,
            category_column: None,
        }
    }
}

impl CsvProfile {
    /// Locate columns by header name, falling back to the default layout
    /// for anything not found. Categories from any other source are
    /// reassigned by the categorizer.
    pub(crate) fn from_headers(headers: &[String]) -> Self {
        let is_export = headers.len() == EXPORT_HEADERS.len()
            && headers.iter().zip(EXPORT_HEADERS).all(|(h, e)| h.trim() == e);

        let find = |names: &[&str]| {
            headers.iter().position(|h| {
                let lower = h.trim().to_lowercase();
                names.iter().any(|n| lower == *n)
            })
        };

        let default = Self::default();
        Self {
            date_column: find(&["date", "transaction date", "posted date"])
                .unwrap_or(default.date_column),
            description_column: find(&["description", "memo", "name", "payee"])
                .unwrap_or(default.description_column),
            amount_column: find(&["amount", "debit", "value"]).unwrap_or(default.amount_column),
            category_column: is_export.then_some(3),
        }
    }
}

/// Result of parsing a CSV: accepted records plus `(row number, reason)`
/// for each rejected row. Row numbers are 1-based data rows.
#[derive(Debug, Default)]
pub(crate) struct ImportOutcome {
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) rejected: Vec<(usize, String)>,
}

pub(crate) struct CsvImporter;

impl CsvImporter {
    /// Read the CSV and return headers + all rows as strings.
    pub(crate) fn read(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let mut all_rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result.context("Failed to read CSV record")?;
            all_rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if all_rows.is_empty() {
            anyhow::bail!("CSV file is empty");
        }

        // Headers don't parse as dates or numbers
        let first_row = &all_rows[0];
        let looks_like_header = first_row.iter().all(|field| {
            let trimmed = field.trim();
            Decimal::from_str(trimmed.replace(['$', ','], "").trim()).is_err()
                && NaiveDate::parse_from_str(trimmed, "%m/%d/%Y").is_err()
                && NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_err()
        });

        if looks_like_header {
            let headers = all_rows.remove(0);
            Ok((headers, all_rows))
        } else {
            let headers: Vec<String> = (0..first_row.len())
                .map(|i| format!("Column {}", i + 1))
                .collect();
            Ok((headers, all_rows))
        }
    }

    /// Validate each row on its own. A bad row is rejected without
    /// affecting the others.
    pub(crate) fn parse(
        rows: &[Vec<String>],
        profile: &CsvProfile,
        categorizer: &Categorizer,
        today: NaiveDate,
    ) -> ImportOutcome {
        let mut outcome = ImportOutcome::default();

        for (i, row) in rows.iter().enumerate() {
            if row.iter().all(|f| f.trim().is_empty()) {
                continue;
            }

            let field = |col: usize| row.get(col).map(|s| s.trim()).unwrap_or("");
            let date = field(profile.date_column);
            if date.is_empty() {
                // An empty date would silently become "today"
                let err = CoreError::malformed("date", "is required");
                outcome.rejected.push((i + 1, err.to_string()));
                continue;
            }

            let draft = TransactionDraft::new(
                field(profile.description_column),
                field(profile.amount_column),
                date,
            );

            match draft.validate(categorizer, today) {
                Ok(mut txn) => {
                    if let Some(category) = profile
                        .category_column
                        .and_then(|c| Category::parse(field(c)))
                    {
                        txn.category = category;
                    }
                    outcome.transactions.push(txn);
                }
                Err(e) => {
                    warn!(row = i + 1, error = %e, "rejected CSV row");
                    outcome.rejected.push((i + 1, e.to_string()));
                }
            }
        }

        debug!(
            accepted = outcome.transactions.len(),
            rejected = outcome.rejected.len(),
            "parsed CSV rows"
        );
        outcome
    }
}

/// Read, validate and store a CSV file. Accepted rows are appended, or swap
/// out the whole log when `replace` is set. A replace with nothing valid to
/// store is refused so a bad file cannot wipe the log.
pub(crate) fn import_file(
    db: &mut Database,
    path: &Path,
    categorizer: &Categorizer,
    today: NaiveDate,
    replace: bool,
) -> Result<ImportOutcome> {
    let (headers, rows) = CsvImporter::read(path)?;
    let profile = CsvProfile::from_headers(&headers);
    let outcome = CsvImporter::parse(&rows, &profile, categorizer, today);

    if replace {
        if outcome.transactions.is_empty() {
            anyhow::bail!(
                "No valid rows in {}; existing log left unchanged",
                path.display()
            );
        }
        db.replace_transactions(&outcome.transactions)?;
    } else {
        for txn in &outcome.transactions {
            db.insert_transaction(txn)?;
        }
    }

    info!(
        path = %path.display(),
        imported = outcome.transactions.len(),
        rejected = outcome.rejected.len(),
        replace,
        "import finished"
    );
    Ok(outcome)
}

/// Write `transactions` in the given order as `date,description,amount,category`.
pub(crate) fn export_csv(path: &Path, transactions: &[Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    wtr.write_record(EXPORT_HEADERS)?;
    for txn in transactions {
        wtr.write_record([
            txn.date.format("%Y-%m-%d").to_string(),
            txn.description.clone(),
            txn.amount.to_string(),
            txn.category.as_str().to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(transactions.len())
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
