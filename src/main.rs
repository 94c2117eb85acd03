mod categorize;
mod config;
mod db;
mod error;
mod import;
mod metrics;
mod models;
mod run;
mod ui;

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use metrics::{Clock, SystemClock};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::load()?;
    let tui_mode = args.len() == 1;
    init_logging(&config, tui_mode)?;

    tracing::debug!(db = %config.db_path.display(), "opening database");
    let mut db = db::Database::open(&config.db_path, SystemClock.today())?;

    if tui_mode {
        run::as_tui(&mut db)
    } else {
        run::as_cli(&args, &mut db)
    }
}

fn init_logging(config: &Config, tui_mode: bool) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    if tui_mode {
        let path = config.log_path();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact(),
            )
            .init();
    }
    Ok(())
}
