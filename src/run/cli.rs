use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::categorize::Categorizer;
use crate::config::shellexpand;
use crate::db::Database;
use crate::import::{export_csv, import_file};
use crate::metrics::{
    aggregate_by_category, average_monthly, evaluate_budgets, goal_progress, goal_totals,
    project_next_months, Clock, DashboardSummary, MonthFilter, SystemClock, DEFAULT_MONTHS_AHEAD,
    MAX_MONTHS_AHEAD,
};
use crate::ui::util::{format_amount, format_percent};

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    run_command(args, db, &SystemClock)
}

pub(super) fn run_command(args: &[String], db: &mut Database, clock: &dyn Clock) -> Result<()> {
    let Some(command) = args.get(1) else {
        print_usage();
        return Ok(());
    };
    let rest: Vec<&str> = args
        .get(2..)
        .unwrap_or_default()
        .iter()
        .map(String::as_str)
        .collect();

    match command.as_str() {
        "add" | "a" => cli_add(&rest, db, clock),
        "goal" => cli_goal(&rest, db),
        "summary" | "s" => cli_summary(&rest, db, clock),
        "alerts" => cli_alerts(&rest, db, clock),
        "project" | "p" => cli_project(&rest, db, clock),
        "goals" => cli_goals(db),
        "categorize" | "cat" => cli_categorize(&rest),
        "import" => cli_import(&rest, db, clock),
        "export" => cli_export(&rest, db, clock),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("finsmart {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("FinSmart - local-only spending dashboard");
    println!();
    println!("Usage: finsmart [command]");
    println!();
    println!("Commands:");
    println!("  (none)                          Launch interactive TUI");
    println!("  add <amount> <description...>   Record a transaction");
    println!("    --date <YYYY-MM-DD>           Transaction date (default: today)");
    println!("  goal <target> <name...>         Create a savings goal");
    println!("    --saved <amount>              Amount already saved (default: 0)");
    println!("    --icon <icon>                 emergency, vacation, house, car, other");
    println!("  summary                         Print this month's dashboard summary");
    println!("  alerts                          List categories over budget this month");
    println!("    --any-year                    Match the month number in every year");
    println!("  project [months]                Project spending for the next months (default: 3, max: 120)");
    println!("  goals                           List savings goals and progress");
    println!("  categorize [description...]     Show the category a description maps to");
    println!("                                  (no description: list the rule table)");
    println!("  import <file.csv>               Import transactions from CSV");
    println!("    --replace                     Replace the whole log instead of appending");
    println!("  export [path]                   Export transactions to CSV");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
}

fn month_window(args: &[&str], clock: &dyn Clock) -> MonthFilter {
    if args.contains(&"--any-year") {
        MonthFilter::current_month_of_year(clock.today())
    } else {
        MonthFilter::current(clock.today())
    }
}

fn cli_add(args: &[&str], db: &mut Database, clock: &dyn Clock) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: finsmart add <amount> <description...> [--date YYYY-MM-DD]");
    }

    let categorizer = Categorizer::default();
    let txn = super::transaction_draft(args).validate(&categorizer, clock.today())?;
    let id = db.insert_transaction(&txn)?;
    info!(id, category = %txn.category, "transaction added");
    println!(
        "Added #{id}: {} {} on {} (categorized as {})",
        txn.description,
        format_amount(txn.amount),
        txn.date,
        txn.category
    );

    let transactions = db.get_transactions()?;
    let limits = db.budget_limits()?;
    let window = MonthFilter::current(clock.today());
    if let Some(alert) = evaluate_budgets(&transactions, &limits, window)
        .into_iter()
        .find(|a| a.category == txn.category)
    {
        println!(
            "Budget alert: {} is {} over its {} limit",
            alert.category,
            format_amount(alert.over_by),
            format_amount(alert.budget_limit)
        );
    }
    Ok(())
}

fn cli_goal(args: &[&str], db: &mut Database) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: finsmart goal <target> <name...> [--saved N] [--icon I]");
    }

    let goal = super::goal_draft(args).validate()?;
    let id = db.insert_goal(&goal)?;
    info!(id, "goal added");
    println!(
        "Goal added: {} {} ({} of {})",
        goal.icon.glyph(),
        goal.name,
        format_amount(goal.saved_amount),
        format_amount(goal.target_amount)
    );
    Ok(())
}

fn cli_summary(args: &[&str], db: &mut Database, clock: &dyn Clock) -> Result<()> {
    let window = month_window(args, clock);
    let transactions = db.get_transactions()?;
    let goals = db.get_goals()?;
    let limits = db.budget_limits()?;
    let summary = DashboardSummary::compute(&transactions, &goals, window);

    println!("FinSmart - {window}");
    println!("{}", "─".repeat(44));
    println!(
        "  Month spending:  {} ({} txns)",
        format_amount(summary.month_spending),
        summary.month_count
    );
    println!(
        "  Avg transaction: {}",
        format_amount(summary.average_transaction)
    );
    println!(
        "  Goals:           {} of {} ({}, {} active)",
        format_amount(summary.goals.total_saved),
        format_amount(summary.goals.total_target),
        format_percent(summary.goals.overall_progress),
        summary.goals.count
    );
    println!("  Total txns:      {}", transactions.len());

    let by_category = aggregate_by_category(&transactions, None);
    if !by_category.is_empty() {
        println!();
        println!(
            "Spending by category (all time, {}):",
            format_amount(by_category.total())
        );
        for (category, amount) in by_category.ranked() {
            println!("  {:<16} {}", category.as_str(), format_amount(amount));
        }
    }

    let alerts = evaluate_budgets(&transactions, &limits, window);
    if !alerts.is_empty() {
        println!();
        println!("Budget alerts:");
        for alert in &alerts {
            println!(
                "  {:<16} over by {}",
                alert.category.as_str(),
                format_amount(alert.over_by)
            );
        }
    }
    Ok(())
}

fn cli_alerts(args: &[&str], db: &mut Database, clock: &dyn Clock) -> Result<()> {
    let window = month_window(args, clock);
    let transactions = db.get_transactions()?;
    let limits = db.budget_limits()?;
    let alerts = evaluate_budgets(&transactions, &limits, window);

    if alerts.is_empty() {
        println!("No budget alerts for {window}");
        return Ok(());
    }

    println!(
        "{:<16} {:>12} {:>12} {:>12}",
        "Category", "Limit", "Spent", "Over by"
    );
    println!("{}", "─".repeat(55));
    for alert in &alerts {
        println!(
            "{:<16} {:>12} {:>12} {:>12}",
            alert.category.as_str(),
            format_amount(alert.budget_limit),
            format_amount(alert.current_spending),
            format_amount(alert.over_by)
        );
    }
    Ok(())
}

fn cli_project(args: &[&str], db: &mut Database, clock: &dyn Clock) -> Result<()> {
    let months = match args.first() {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("Invalid month count: {raw}"))?,
        None => DEFAULT_MONTHS_AHEAD,
    };
    if !(1..=MAX_MONTHS_AHEAD).contains(&months) {
        anyhow::bail!("Month count must be between 1 and {MAX_MONTHS_AHEAD} (got {months})");
    }

    let transactions = db.get_transactions()?;
    println!(
        "Average monthly spending: {}",
        format_amount(average_monthly(&transactions))
    );
    for month in project_next_months(&transactions, clock.today(), months) {
        println!(
            "  {} {}  {:>12}",
            month.label,
            month.year,
            format_amount(month.amount)
        );
    }
    Ok(())
}

fn cli_goals(db: &mut Database) -> Result<()> {
    let goals = db.get_goals()?;
    if goals.is_empty() {
        println!("No goals");
        return Ok(());
    }

    println!(
        "{:<4} {:<24} {:>12} {:>12} {:>9}",
        "", "Goal", "Saved", "Target", "Progress"
    );
    println!("{}", "─".repeat(65));
    for goal in &goals {
        let progress = match goal_progress(goal) {
            Ok(p) => format_percent(p),
            Err(_) => "n/a".to_string(),
        };
        println!(
            "{:<4} {:<24} {:>12} {:>12} {:>9}",
            goal.icon.glyph(),
            goal.name,
            format_amount(goal.saved_amount),
            format_amount(goal.target_amount),
            progress
        );
    }

    let totals = goal_totals(&goals);
    println!("{}", "─".repeat(65));
    println!(
        "{:<4} {:<24} {:>12} {:>12} {:>9}",
        "",
        "Total",
        format_amount(totals.total_saved),
        format_amount(totals.total_target),
        format_percent(totals.overall_progress)
    );
    Ok(())
}

fn cli_categorize(args: &[&str]) -> Result<()> {
    let categorizer = Categorizer::default();
    if args.is_empty() {
        println!("Rules, first match wins:");
        for rule in categorizer.rules() {
            println!(
                "  {}. {:<16} {}",
                categorizer.rank(rule.category) + 1,
                rule.category.as_str(),
                rule.keywords.join(", ")
            );
        }
        return Ok(());
    }
    let description = args.join(" ");
    println!("{}", categorizer.categorize(&description));
    Ok(())
}

fn cli_import(args: &[&str], db: &mut Database, clock: &dyn Clock) -> Result<()> {
    let replace = args.contains(&"--replace");
    let Some(file) = args.iter().find(|a| !a.starts_with("--")) else {
        anyhow::bail!("Usage: finsmart import <file.csv> [--replace]");
    };

    let expanded = shellexpand(file);
    let path = Path::new(&expanded);
    if !path.exists() {
        anyhow::bail!("File not found: {expanded}");
    }

    let outcome = import_file(db, path, &Categorizer::default(), clock.today(), replace)?;
    for (row, reason) in &outcome.rejected {
        eprintln!("  row {row}: {reason}");
    }

    println!(
        "{} {} transactions ({} rows rejected)",
        if replace { "Replaced log with" } else { "Imported" },
        outcome.transactions.len(),
        outcome.rejected.len()
    );
    Ok(())
}

fn cli_export(args: &[&str], db: &mut Database, clock: &dyn Clock) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| default_export_path(clock));

    let mut transactions = db.get_transactions()?;
    transactions.reverse();
    let count = export_csv(Path::new(&output_path), &transactions)?;
    info!(count, path = %output_path, "exported transactions");

    if count == 0 {
        println!("No transactions to export");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}

pub(crate) fn default_export_path(clock: &dyn Clock) -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    format!("{home}/finsmart-export-{}.csv", clock.today().format("%Y-%m-%d"))
}
