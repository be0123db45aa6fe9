//! Runtime settings read from the environment (after `.env` is loaded).

use anyhow::{Context, Result};

use crate::analyzers::aggregate::DEFAULT_ROLLING_WINDOW;

pub const DEFAULT_DATASET: &str = "data/tn-jobcards.json";
pub const DEFAULT_SNAPSHOT: &str = "data/tn-jobcards-2025.json";
pub const DEFAULT_DISTRICTS: &str = "data/tn-districts.json";
pub const DEFAULT_LOG_FILE: &str = "logs/mgnrega_insights.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Full 2005-2025 series, file path or URL.
    pub dataset: String,
    /// Standalone 2025 snapshot, file path or URL.
    pub snapshot: String,
    /// District reference table.
    pub districts: String,
    pub rolling_window: usize,
    pub log_file_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset: DEFAULT_DATASET.to_string(),
            snapshot: DEFAULT_SNAPSHOT.to_string(),
            districts: DEFAULT_DISTRICTS.to_string(),
            rolling_window: DEFAULT_ROLLING_WINDOW,
            log_file_path: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let rolling_window = match lookup("MGNREGA_ROLLING_WINDOW") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("MGNREGA_ROLLING_WINDOW must be a whole number, got '{raw}'"))?,
            None => defaults.rolling_window,
        };

        Ok(Self {
            dataset: lookup("MGNREGA_DATASET").unwrap_or(defaults.dataset),
            snapshot: lookup("MGNREGA_SNAPSHOT").unwrap_or(defaults.snapshot),
            districts: lookup("MGNREGA_DISTRICTS").unwrap_or(defaults.districts),
            rolling_window,
            log_file_path: lookup("LOG_FILE_PATH").unwrap_or(defaults.log_file_path),
        })
    }
}
