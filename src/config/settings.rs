//! User settings for Tally
//!
//! Display preferences and the date format used by bank statements.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::TallyPaths;
use crate::error::TallyError;

/// User settings for Tally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Label appended to amounts on display (no conversion is performed)
    #[serde(default = "default_currency_label")]
    pub currency_label: String,

    /// strftime format of the `Date` column in statements
    #[serde(default = "default_statement_date_format")]
    pub statement_date_format: String,

    /// strftime format used when printing dates
    #[serde(default = "default_display_date_format")]
    pub display_date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency_label() -> String {
    "CZK".to_string()
}

fn default_statement_date_format() -> String {
    "%d %b %Y".to_string()
}

fn default_display_date_format() -> String {
    "%d/%m/%y".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_label: default_currency_label(),
            statement_date_format: default_statement_date_format(),
            display_date_format: default_display_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &TallyPaths) -> Result<Self, TallyError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TallyError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| TallyError::Config(format!("Failed to parse settings file: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject date formats chrono cannot use
    pub fn validate(&self) -> Result<(), TallyError> {
        for (field, format, valid) in [
            (
                "statement_date_format",
                &self.statement_date_format,
                is_valid_date_format(&self.statement_date_format),
            ),
            (
                "display_date_format",
                &self.display_date_format,
                format_date(sample_date(), &self.display_date_format).is_some(),
            ),
        ] {
            if !valid {
                return Err(TallyError::Config(format!(
                    "Invalid {} '{}' in settings file",
                    field, format
                )));
            }
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TallyPaths) -> Result<(), TallyError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.settings_file(), contents)?;
        Ok(())
    }
}

/// True when every strftime specifier in `format` is recognized
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Format a date, or `None` when `format` cannot render a plain date
/// (unknown specifiers, or time and offset fields a date does not have)
pub fn format_date(date: NaiveDate, format: &str) -> Option<String> {
    if !is_valid_date_format(format) {
        return None;
    }
    let mut out = String::new();
    write!(out, "{}", date.format(format)).ok()?;
    Some(out)
}

fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or(NaiveDate::MIN)
}
