use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use tracing::info;

use super::app::{App, Screen};
use super::util::format_amount;
use crate::config::shellexpand;
use crate::db::Database;
use crate::import::{export_csv, import_file};
use crate::models::{parse_amount, Category};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit FinSmart", cmd_quit, r);
    register_command!("quit", "Quit FinSmart", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("g", "Go to Goals", cmd_goals, r);
    register_command!("goals", "Go to Goals", cmd_goals, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add-txn",
        "Add transaction (e.g. :add-txn 12.50 Lunch at cafe --date 2024-03-15)",
        cmd_add_txn,
        r
    );
    register_command!(
        "a",
        "Add transaction (e.g. :a 12.50 Lunch at cafe)",
        cmd_add_txn,
        r
    );
    register_command!(
        "goal",
        "Add savings goal (e.g. :goal 5000 New car --saved 500 --icon car)",
        cmd_goal,
        r
    );
    register_command!(
        "dismiss",
        "Dismiss budget alert (e.g. :dismiss Dining, or the selected one)",
        cmd_dismiss,
        r
    );
    register_command!("theme", "Toggle dark mode (or :theme dark|light)", cmd_theme, r);
    register_command!(
        "budget",
        "Set budget limit (e.g. :budget Dining 350)",
        cmd_budget,
        r
    );
    register_command!(
        "reset-budgets",
        "Restore the default budget limits",
        cmd_reset_budgets,
        r
    );
    register_command!(
        "window",
        "Toggle month window: this month / this month in any year",
        cmd_window,
        r
    );
    register_command!(
        "categorize",
        "Preview a category (e.g. :categorize Uber to airport)",
        cmd_categorize,
        r
    );
    register_command!(
        "import",
        "Import CSV (e.g. :import ~/bank.csv [--replace])",
        cmd_import,
        r
    );
    register_command!(
        "export",
        "Export transactions to CSV (e.g. :export ~/finsmart.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn category_names() -> String {
    Category::all()
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_all(db)
}

fn cmd_transactions(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    app.refresh_all(db)
}

fn cmd_goals(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Goals;
    app.refresh_all(db)
}

fn cmd_budgets(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    app.refresh_all(db)
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add_txn(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :add-txn <amount> <description> [--date YYYY-MM-DD]");
        return Ok(());
    }

    let words: Vec<&str> = args.split_whitespace().collect();
    let txn = match crate::run::transaction_draft(&words).validate(&app.categorizer, app.today) {
        Ok(txn) => txn,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };

    let id = db.insert_transaction(&txn)?;
    info!(id, category = %txn.category, "transaction added");
    app.log_changed(db)?;

    let added = format!(
        "Transaction added: {} categorized as {}",
        txn.description, txn.category
    );
    let msg = match app.alerts.iter().find(|a| a.category == txn.category) {
        Some(alert) => format!(
            "{added} | Budget alert: {} over by {}",
            alert.category,
            format_amount(alert.over_by)
        ),
        None => added,
    };
    app.set_status(msg);
    Ok(())
}

fn cmd_goal(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :goal <target> <name> [--saved N] [--icon emergency|vacation|house|car|other]");
        return Ok(());
    }

    let words: Vec<&str> = args.split_whitespace().collect();
    let goal = match crate::run::goal_draft(&words).validate() {
        Ok(goal) => goal,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };

    let id = db.insert_goal(&goal)?;
    info!(id, "goal added");
    app.refresh_all(db)?;
    app.goal_index = app.goals.len().saturating_sub(1);
    app.set_status(format!("Goal added: {}", goal.name));
    Ok(())
}

fn cmd_dismiss(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let category = if args.is_empty() {
        match app.selected_alert().map(|a| a.category) {
            Some(category) => category,
            None => {
                app.set_status("No budget alert to dismiss");
                return Ok(());
            }
        }
    } else {
        match Category::parse(args) {
            Some(category) => category,
            None => {
                app.set_status(format!(
                    "Unknown category: {args}. Categories: {}",
                    category_names()
                ));
                return Ok(());
            }
        }
    };

    if app.dismiss_alert(category) {
        app.set_status(format!("Budget alert for {category} dismissed"));
    } else {
        app.set_status(format!("No active budget alert for {category}"));
    }
    Ok(())
}

fn cmd_theme(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let dark = match args.to_lowercase().as_str() {
        "" => !app.dark_mode,
        "dark" | "on" => true,
        "light" | "off" => false,
        other => {
            app.set_status(format!("Unknown theme: {other}. Use dark or light"));
            return Ok(());
        }
    };

    db.set_dark_mode(dark)?;
    app.dark_mode = dark;
    app.set_status(if dark {
        "Dark mode on"
    } else {
        "Dark mode off"
    });
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let [name, amount] = parts.as_slice() else {
        app.set_status(format!(
            "Usage: :budget <category> <amount>. Categories: {}",
            category_names()
        ));
        return Ok(());
    };

    let Some(category) = Category::parse(name) else {
        app.set_status(format!(
            "Unknown category: {name}. Categories: {}",
            category_names()
        ));
        return Ok(());
    };

    let limit = match parse_amount(amount) {
        Ok(limit) => limit,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };

    db.set_budget_override(category, limit)?;
    app.refresh_all(db)?;
    app.set_status(format!(
        "Budget for {category} set to {}",
        format_amount(limit)
    ));
    Ok(())
}

fn cmd_reset_budgets(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let cleared = db.clear_budget_overrides()?;
    app.refresh_all(db)?;
    app.set_status(format!(
        "Default budget limits restored ({cleared} override{} cleared)",
        if cleared == 1 { "" } else { "s" }
    ));
    Ok(())
}

fn cmd_window(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.toggle_window();
    app.set_status(format!("Month window: {}", app.window));
    Ok(())
}

fn cmd_categorize(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :categorize <description>");
        return Ok(());
    }
    let category = app.categorizer.categorize(args);
    app.set_status(format!("'{args}' would be categorized as {category}"));
    Ok(())
}

fn cmd_import(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let words: Vec<&str> = args.split_whitespace().collect();
    let replace = words.contains(&"--replace");
    let Some(file) = words.iter().find(|w| !w.starts_with("--")) else {
        app.set_status("Usage: :import <file.csv> [--replace]");
        return Ok(());
    };

    let expanded = shellexpand(file);
    let path = Path::new(&expanded);
    if !path.exists() {
        app.set_status(format!("File not found: {expanded}"));
        return Ok(());
    }

    let outcome = match import_file(db, path, &app.categorizer, app.today, replace) {
        Ok(outcome) => outcome,
        Err(e) => {
            app.set_status(format!("Import failed: {e}"));
            return Ok(());
        }
    };
    app.log_changed(db)?;
    app.screen = Screen::Transactions;

    let mut msg = format!("Imported {} transactions", outcome.transactions.len());
    if let Some((row, reason)) = outcome.rejected.first() {
        msg = format!(
            "{msg} ({} rejected; row {row}: {reason})",
            outcome.rejected.len()
        );
    }
    app.set_status(msg);
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        crate::run::default_export_path(app.clock())
    } else {
        shellexpand(args)
    };

    let oldest_first: Vec<_> = app.transactions.iter().rev().cloned().collect();
    let count = export_csv(Path::new(&path), &oldest_first)?;
    info!(count, path = %path, "exported transactions");
    if count == 0 {
        app.set_status("No transactions to export");
    } else {
        app.set_status(format!("Exported {count} transactions to {path}"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
