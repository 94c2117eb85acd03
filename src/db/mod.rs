mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::categorize::Categorizer;
use crate::models::*;

const SAMPLE_SEEDED_KEY: &str = "sample_data_seeded";
const DARK_MODE_KEY: &str = "dark_mode";
const BUDGET_LIMIT_PREFIX: &str = "budget_limit.";

/// Local store for the transaction log, the goal log and display settings.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    /// Open (and migrate) the store at `path`. `today` is used only when
    /// seeding a fresh store.
    pub(crate) fn open(path: &Path, today: NaiveDate) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        db.seed_sample_data(today)?;
        debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    /// Populate an empty store with example records, once per database.
    /// Returns whether anything was written.
    pub(crate) fn seed_sample_data(&mut self, today: NaiveDate) -> Result<bool> {
        if self.get_setting(SAMPLE_SEEDED_KEY)?.is_some() {
            return Ok(false);
        }

        let categorizer = Categorizer::default();
        let txn_count = self.get_transaction_count()?;
        let goal_count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM goals", [], |row| row.get(0))?;

        let tx = self.conn.transaction()?;
        if txn_count == 0 {
            // Oldest first so the newest-first listing shows Jan 15 on top
            let samples = [
                ("Uber ride to airport", "45.20", "2024-01-11"),
                ("Lunch at Italian restaurant", "32.75", "2024-01-12"),
                ("Electric bill payment", "120.00", "2024-01-13"),
                ("Netflix subscription", "15.99", "2024-01-14"),
                ("Grocery shopping at Walmart", "85.50", "2024-01-15"),
            ];
            for (description, amount, date) in samples {
                let txn = TransactionDraft::new(description, amount, date)
                    .validate(&categorizer, today)?;
                insert_transaction_row(&tx, &txn)?;
            }
        }
        if goal_count == 0 {
            let samples = [
                ("Emergency Fund", "10000", "3500", "emergency"),
                ("Vacation to Europe", "5000", "1200", "vacation"),
                ("New Car Down Payment", "8000", "2800", "car"),
            ];
            for (name, target, saved, icon) in samples {
                let goal = GoalDraft {
                    name: name.into(),
                    target_amount: target.into(),
                    saved_amount: saved.into(),
                    icon: icon.into(),
                }
                .validate()?;
                insert_goal_row(&tx, &goal)?;
            }
        }
        tx.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, '1')",
            params![SAMPLE_SEEDED_KEY],
        )?;
        tx.commit()?;

        let seeded = txn_count == 0 || goal_count == 0;
        if seeded {
            info!("seeded sample transactions and goals");
        }
        Ok(seeded)
    }

    // ── Transactions ──────────────────────────────────────────

    /// Append one transaction. Ids are assigned by the store and only grow.
    pub(crate) fn insert_transaction(&self, txn: &Transaction) -> Result<i64> {
        insert_transaction_row(&self.conn, txn)?;
        let id = self.conn.last_insert_rowid();
        debug!(id, category = %txn.category, "transaction stored");
        Ok(id)
    }

    /// All transactions, most recently added first. Rows that no longer
    /// decode are skipped and logged.
    pub(crate) fn get_transactions(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, description, amount, date, category FROM transactions ORDER BY id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut transactions = Vec::new();
        for row in rows {
            let (id, description, amount, date, category) = row?;
            match decode_transaction(id, description, &amount, &date, &category) {
                Ok(txn) => transactions.push(txn),
                Err(reason) => warn!(id, %reason, "skipping unreadable transaction row"),
            }
        }
        Ok(transactions)
    }

    pub(crate) fn get_transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }

    /// Swap the whole transaction log for `txns` in one transaction.
    /// `txns` is given oldest first; stored records get fresh ids.
    pub(crate) fn replace_transactions(&mut self, txns: &[Transaction]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let removed = tx.execute("DELETE FROM transactions", [])?;
        for txn in txns {
            insert_transaction_row(&tx, txn)?;
        }
        tx.commit()?;
        info!(removed, inserted = txns.len(), "transaction log replaced");
        Ok(txns.len())
    }

    // ── Goals ─────────────────────────────────────────────────

    pub(crate) fn insert_goal(&self, goal: &Goal) -> Result<i64> {
        insert_goal_row(&self.conn, goal)?;
        let id = self.conn.last_insert_rowid();
        debug!(id, name = %goal.name, "goal stored");
        Ok(id)
    }

    /// All goals in creation order.
    pub(crate) fn get_goals(&self) -> Result<Vec<Goal>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, target_amount, saved_amount, icon FROM goals ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut goals = Vec::new();
        for row in rows {
            let (id, name, target, saved, icon) = row?;
            match (
                parse_money("targetAmount", &target),
                parse_money("savedAmount", &saved),
            ) {
                (Ok(target_amount), Ok(saved_amount)) => goals.push(Goal {
                    id: Some(id),
                    name,
                    target_amount,
                    saved_amount,
                    icon: GoalIcon::parse(&icon),
                }),
                _ => warn!(id, %target, %saved, "skipping unreadable goal row"),
            }
        }
        Ok(goals)
    }

    // ── Settings ──────────────────────────────────────────────

    pub(crate) fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub(crate) fn dark_mode(&self) -> Result<bool> {
        Ok(self
            .get_setting(DARK_MODE_KEY)?
            .is_some_and(|v| v == "true"))
    }

    pub(crate) fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        self.set_setting(DARK_MODE_KEY, if enabled { "true" } else { "false" })
    }

    // ── Budget limits ─────────────────────────────────────────

    pub(crate) fn set_budget_override(&self, category: Category, limit: Decimal) -> Result<()> {
        self.set_setting(
            &format!("{BUDGET_LIMIT_PREFIX}{}", category.as_str()),
            &limit.to_string(),
        )
    }

    pub(crate) fn clear_budget_overrides(&self) -> Result<usize> {
        Ok(self.conn.execute(
            "DELETE FROM settings WHERE key LIKE ?1",
            params![format!("{BUDGET_LIMIT_PREFIX}%")],
        )?)
    }

    /// Stored overrides in category order.
    pub(crate) fn get_budget_overrides(&self) -> Result<Vec<(Category, Decimal)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM settings WHERE key LIKE ?1")?;
        let rows = stmt.query_map(params![format!("{BUDGET_LIMIT_PREFIX}%")], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut overrides = Vec::new();
        for row in rows {
            let (key, value) = row?;
            let category = key
                .strip_prefix(BUDGET_LIMIT_PREFIX)
                .and_then(Category::parse);
            match (category, parse_amount(&value)) {
                (Some(c), Ok(limit)) => overrides.push((c, limit)),
                _ => warn!(%key, %value, "ignoring unreadable budget override"),
            }
        }
        overrides.sort_by_key(|(c, _)| *c);
        Ok(overrides)
    }

    /// Default limit table with any stored overrides applied.
    pub(crate) fn budget_limits(&self) -> Result<BudgetLimits> {
        Ok(BudgetLimits::default().with_overrides(&self.get_budget_overrides()?))
    }
}

fn insert_transaction_row(conn: &Connection, txn: &Transaction) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions (description, amount, date, category, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            txn.description,
            txn.amount.to_string(),
            txn.date.format("%Y-%m-%d").to_string(),
            txn.category.as_str(),
            chrono::Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

fn insert_goal_row(conn: &Connection, goal: &Goal) -> Result<()> {
    conn.execute(
        "INSERT INTO goals (name, target_amount, saved_amount, icon, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            goal.name,
            goal.target_amount.to_string(),
            goal.saved_amount.to_string(),
            goal.icon.as_str(),
            chrono::Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

fn decode_transaction(
    id: i64,
    description: String,
    amount: &str,
    date: &str,
    category: &str,
) -> std::result::Result<Transaction, String> {
    let amount = parse_amount(amount).map_err(|e| e.to_string())?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| format!("bad date '{date}'"))?;
    let category = Category::parse(category).ok_or_else(|| format!("unknown category '{category}'"))?;
    Ok(Transaction {
        id: Some(id),
        description,
        amount,
        date,
        category,
    })
}

#[cfg(test)]
mod tests;
