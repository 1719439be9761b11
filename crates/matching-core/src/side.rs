//! Side (Buy / Sell) of an order or of a book.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::order::Price;

/// Order side: Buy or Sell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an order of this side trades against.
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Returns `true` if a resting level at `level_price` can trade with an
    /// incoming order of this side limited at `limit_price`.
    ///
    /// Equal prices are marketable.
    pub fn is_marketable(self, limit_price: Price, level_price: Price) -> bool {
        match self {
            Side::Buy => level_price <= limit_price,
            Side::Sell => level_price >= limit_price,
        }
    }

    /// Single-char representation (`'B'` / `'S'`), used by script files.
    pub fn as_char(self) -> char {
        match self {
            Side::Buy => 'B',
            Side::Sell => 'S',
        }
    }

    /// Try to parse from a char (`'B'` / `'S'`, case-sensitive).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'B' => Some(Side::Buy),
            'S' => Some(Side::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}
