use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub(crate) const DB_ENV: &str = "FINSMART_DB";
pub(crate) const LOG_ENV: &str = "FINSMART_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Runtime settings resolved from the environment and the platform data dir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) db_path: PathBuf,
    pub(crate) log_filter: String,
}

impl Config {
    pub(crate) fn load() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "finsmart", "FinSmart")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        Ok(Self::resolve(
            data_dir,
            std::env::var(DB_ENV).ok(),
            std::env::var(LOG_ENV).ok(),
        ))
    }

    /// Blank overrides count as unset.
    pub(crate) fn resolve(
        data_dir: &Path,
        db_override: Option<String>,
        log_override: Option<String>,
    ) -> Self {
        let db_path = db_override
            .filter(|p| !p.trim().is_empty())
            .map(|p| PathBuf::from(shellexpand(p.trim())))
            .unwrap_or_else(|| data_dir.join("finsmart.db"));
        let log_filter = log_override
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            data_dir: data_dir.to_path_buf(),
            db_path,
            log_filter,
        }
    }

    /// Where TUI mode writes its log, since stderr belongs to the terminal UI.
    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join("finsmart.log")
    }
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
