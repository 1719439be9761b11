//! Engine-level settings shared with configuration layers.
//!
//! The policy itself is a type parameter of the engine; [`PolicyKind`] is
//! how a caller names it in a config file before picking the type.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which allocation policy to run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// Price-time priority.
    #[default]
    Fifo,
    /// Largest resting order first.
    SizePriority,
}

/// Which limit price a fill executes at.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TradePrice {
    /// The resting (maker) order's price. The aggressor never gets price
    /// improvement.
    #[default]
    Resting,
    /// The incoming order's limit price, for every level it sweeps. The
    /// demo scenario's fill averages are computed under this rule: a sell
    /// of 90 @ 5 against bids from 7 down to 5 trades entirely at 5.
    Aggressor,
}

/// A config value that names no known variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognised value `{0}`")]
pub struct ParseKindError(String);

impl FromStr for PolicyKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" | "price-time" => Ok(PolicyKind::Fifo),
            "size-priority" | "pro-rata" => Ok(PolicyKind::SizePriority),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

impl FromStr for TradePrice {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resting" | "maker" => Ok(TradePrice::Resting),
            "aggressor" | "taker" => Ok(TradePrice::Aggressor),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}
