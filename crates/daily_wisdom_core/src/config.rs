//! Reader configuration sourced from the host environment.
//!
//! # Responsibility
//! - Resolve start date, developer mode and content path once at startup.
//! - Keep environment access at the edge; core logic receives plain values.
//!
//! # Invariants
//! - Unset variables fall back to defaults; set-but-invalid values are errors.
//! - Blank values are treated as unset.

use crate::navigation::navigator::NavigatorConfig;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_START_DATE: &str = "DAILY_WISDOM_START_DATE";
pub const ENV_DEV_MODE: &str = "DAILY_WISDOM_DEV_MODE";
pub const ENV_ARTICLES_PATH: &str = "DAILY_WISDOM_ARTICLES_PATH";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_START_DATE: (i32, u32, u32) = (2024, 1, 1);

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidStartDate(String),
    InvalidDeveloperMode(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStartDate(value) => write!(
                f,
                "{ENV_START_DATE} must be a YYYY-MM-DD date, got `{value}`"
            ),
            Self::InvalidDeveloperMode(value) => write!(
                f,
                "{ENV_DEV_MODE} must be one of 1|0|true|false|yes|no|on|off, got `{value}`"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Resolved reader configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Date on which slot 0 unlocks (or the weekday after, if a weekend).
    pub start_date: NaiveDate,
    /// Bypass the unlock schedule.
    pub developer_mode: bool,
    /// Catalog document path; `None` uses the embedded catalog.
    pub articles_path: Option<PathBuf>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
            developer_mode: false,
            articles_path: None,
        }
    }
}

impl ReaderConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let start_date = match value(ENV_START_DATE) {
            Some(raw) => parse_date(&raw)?,
            None => default_start_date(),
        };
        let developer_mode = match value(ENV_DEV_MODE) {
            Some(raw) => parse_flag(&raw)?,
            None => false,
        };

        Ok(Self {
            start_date,
            developer_mode,
            articles_path: value(ENV_ARTICLES_PATH).map(PathBuf::from),
        })
    }

    pub fn navigator_config(&self) -> NavigatorConfig {
        NavigatorConfig {
            developer_mode: self.developer_mode,
        }
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ConfigError::InvalidStartDate(raw.to_string()))
}

fn parse_flag(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidDeveloperMode(raw.to_string())),
    }
}

fn default_start_date() -> NaiveDate {
    let (year, month, day) = DEFAULT_START_DATE;
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
