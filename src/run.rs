mod cli;
mod tui;

pub(crate) use cli::{as_cli, default_export_path};
pub(crate) use tui::as_tui;

use crate::models::{GoalDraft, TransactionDraft};

const TRANSACTION_FLAGS: &[&str] = &["--date"];
const GOAL_FLAGS: &[&str] = &["--saved", "--icon"];

/// Value following `flag`, if any.
pub(crate) fn flag_value<'a>(args: &[&'a str], flag: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1])
}

/// Arguments that are neither one of `flags` nor the value after one.
pub(crate) fn positionals<'a>(args: &[&'a str], flags: &[&str]) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if flags.contains(arg) {
            skip_next = true;
            continue;
        }
        out.push(*arg);
    }
    out
}

/// `<amount> <description...> [--date D]`. Missing pieces stay empty so
/// validation reports which field is wrong.
pub(crate) fn transaction_draft(args: &[&str]) -> TransactionDraft {
    let words = positionals(args, TRANSACTION_FLAGS);
    let amount = words.first().copied().unwrap_or("");
    let description = words.get(1..).unwrap_or_default().join(" ");
    let date = flag_value(args, "--date").unwrap_or("");
    TransactionDraft::new(&description, amount, date)
}

/// `<target> <name...> [--saved N] [--icon I]`.
pub(crate) fn goal_draft(args: &[&str]) -> GoalDraft {
    let words = positionals(args, GOAL_FLAGS);
    GoalDraft {
        name: words.get(1..).unwrap_or_default().join(" "),
        target_amount: words.first().copied().unwrap_or("").to_string(),
        saved_amount: flag_value(args, "--saved").unwrap_or("").to_string(),
        icon: flag_value(args, "--icon").unwrap_or("").to_string(),
    }
}
