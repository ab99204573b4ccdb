//! User settings for spendlog
//!
//! Holds the user profile (display name, currency symbol, date format) and
//! reporting preferences. Every field has a serde default so older or
//! hand-edited files keep loading.

use std::io::ErrorKind;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::SpendPaths;
use crate::error::SpendError;
use crate::models::Granularity;

/// Persisted in `config.json`; absent fields take their defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name shown in report headers
    pub display_name: String,
    pub currency_symbol: String,
    /// strftime pattern for dates in listings
    pub date_format: String,
    /// Granularity used by `stats` when `--period` is omitted
    pub default_granularity: Granularity,
    /// How many categories the top-category ranking keeps
    pub top_categories: usize,
}

const ISO_DATE: &str = "%Y-%m-%d";

fn is_valid_date_format(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_name: "User".into(),
            currency_symbol: "$".into(),
            date_format: ISO_DATE.into(),
            default_granularity: Granularity::default(),
            top_categories: 5,
        }
    }
}

impl Settings {
    /// Render a date with the preferred format, or `YYYY-MM-DD` if the
    /// pattern does not parse
    pub fn format_date(&self, date: NaiveDate) -> String {
        if !is_valid_date_format(&self.date_format) {
            return date.format(ISO_DATE).to_string();
        }
        date.format(&self.date_format).to_string()
    }

    /// Replace the date format, rejecting patterns chrono cannot render
    pub fn set_date_format(&mut self, pattern: &str) -> Result<(), SpendError> {
        if !is_valid_date_format(pattern) {
            return Err(SpendError::Validation(format!(
                "'{}' is not a usable date format",
                pattern
            )));
        }
        self.date_format = pattern.to_string();
        Ok(())
    }

    /// Read `config.json`; a missing file yields defaults without writing one
    pub fn load_or_create(paths: &SpendPaths) -> Result<Self, SpendError> {
        let path = paths.settings_file();
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(SpendError::io(format!("Failed to read {}", path.display()), e)),
        };

        serde_json::from_str(&contents).map_err(|e| {
            SpendError::Config(format!("{} is not valid settings JSON: {}", path.display(), e))
        })
    }

    pub fn save(&self, paths: &SpendPaths) -> Result<(), SpendError> {
        paths.ensure_directories()?;
        let path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .map_err(|e| SpendError::io(format!("Failed to write {}", path.display()), e))
    }
}
