//! Configuration for the replay driver.
//!
//! Layers, later ones win:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`--config`)
//! 3. environment variables:
//!    - `MATCHING_POLICY`        (`fifo` | `size-priority`)
//!    - `MATCHING_TRADE_PRICE`   (`resting` | `aggressor`)
//!    - `MATCHING_FORMAT`        (`text` | `json`)
//!    - `MATCHING_BOOK_VIEW`     (`orders` | `levels`)
//!    - `MATCHING_STEP_DELAY_MS` (milliseconds)
//! 4. command-line flags (applied by `main`)

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use matching_core::{PolicyKind, TradePrice};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value `{value}` for {key}: {reason}")]
    Env {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// How reports are rendered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format `{other}`")),
        }
    }
}

/// What a text book print lists.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookView {
    /// One line per resting order.
    #[default]
    Orders,
    /// One line per price level with aggregate quantity.
    Levels,
}

impl FromStr for BookView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orders" => Ok(BookView::Orders),
            "levels" => Ok(BookView::Levels),
            other => Err(format!("unknown book view `{other}`")),
        }
    }
}

/// Replay configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplayConfig {
    /// Allocation policy inside a price level.
    pub policy: PolicyKind,

    /// Which limit price fills execute at.
    pub trade_price: TradePrice,

    pub format: OutputFormat,

    pub book_view: BookView,

    /// Pause after every book print, in milliseconds.
    pub step_delay_ms: u64,
}

impl ReplayConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.policy = read_env_or(&lookup, "MATCHING_POLICY", self.policy)?;
        self.trade_price = read_env_or(&lookup, "MATCHING_TRADE_PRICE", self.trade_price)?;
        self.format = read_env_or(&lookup, "MATCHING_FORMAT", self.format)?;
        self.book_view = read_env_or(&lookup, "MATCHING_BOOK_VIEW", self.book_view)?;
        self.step_delay_ms = read_env_or(&lookup, "MATCHING_STEP_DELAY_MS", self.step_delay_ms)?;
        Ok(())
    }
}

fn read_env_or<T, F>(lookup: &F, key: &'static str, current: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value.parse::<T>().map_err(|e| ConfigError::Env {
            key,
            reason: e.to_string(),
            value,
        }),
        None => Ok(current),
    }
}
