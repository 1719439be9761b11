//! Error types for the matching core.
//!
//! Only caller mistakes are represented here. Broken internal invariants
//! (fill bounds, empty levels left in a book) panic instead: they mean the
//! book is corrupt and there is nothing sensible to recover.

use std::fmt;

use thiserror::Error;

/// The order attribute that failed validation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrderField {
    Price,
    Quantity,
    Side,
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderField::Price => f.write_str("price"),
            OrderField::Quantity => f.write_str("quantity"),
            OrderField::Side => f.write_str("side"),
        }
    }
}

/// Errors returned by the engine and the order book.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The order was rejected before touching any book state.
    #[error("invalid order {field}: {reason}")]
    InvalidOrder {
        field: OrderField,
        reason: &'static str,
    },
}

impl EngineError {
    pub(crate) fn invalid(field: OrderField, reason: &'static str) -> Self {
        EngineError::InvalidOrder { field, reason }
    }

    /// The offending field, for callers that branch on it.
    pub fn field(&self) -> OrderField {
        match self {
            EngineError::InvalidOrder { field, .. } => *field,
        }
    }
}
