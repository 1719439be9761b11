//! Internal order representation and fill accounting.
//!
//! An [`Order`] is created by the engine when a submission passes
//! validation and lives in the [`OrderStore`](crate::order_store::OrderStore)
//! for the rest of the engine's lifetime. Books and price levels only ever
//! hold its [`OrderId`].

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::side::Side;

/// Limit prices and fill prices.
///
/// Decimal keeps prices like `6.7` exact and gives the total ordering the
/// books need for their keys.
pub type Price = Decimal;

/// Process-unique, monotonically increasing order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    pub fn new(raw: u64) -> Self {
        OrderId(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse fill state of an order. Only ever moves forward.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Resting,
    PartiallyFilled,
    Filled,
}

/// A single limit order and its fill progress.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: OrderId,
    side: Side,
    limit_price: Price,
    quantity: u32,
    filled_quantity: u32,
    filled_notional: Decimal,
}

impl Order {
    /// Build an unfilled order. Validation happens in the engine before
    /// an id is ever handed out.
    pub(crate) fn new(id: OrderId, side: Side, limit_price: Price, quantity: u32) -> Self {
        Order {
            id,
            side,
            limit_price,
            quantity,
            filled_quantity: 0,
            filled_notional: Decimal::ZERO,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn limit_price(&self) -> Price {
        self.limit_price
    }

    /// Original quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn filled_quantity(&self) -> u32 {
        self.filled_quantity
    }

    pub fn remaining_quantity(&self) -> u32 {
        self.quantity - self.filled_quantity
    }

    /// Sum of `price * quantity` over every fill so far.
    pub fn filled_notional(&self) -> Decimal {
        self.filled_notional
    }

    /// Returns `true` once nothing is left to fill.
    pub fn is_complete(&self) -> bool {
        self.remaining_quantity() == 0
    }

    /// Average execution price, defined once anything has filled.
    pub fn average_fill_price(&self) -> Option<Price> {
        if self.filled_quantity == 0 {
            None
        } else {
            Some(self.filled_notional / Decimal::from(self.filled_quantity))
        }
    }

    pub fn status(&self) -> OrderStatus {
        if self.filled_quantity == 0 {
            OrderStatus::Resting
        } else if self.is_complete() {
            OrderStatus::Filled
        } else {
            OrderStatus::PartiallyFilled
        }
    }

    /// Record a fill of `fill_quantity` units at `fill_price`.
    ///
    /// Returns `true` if this call completed the order.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < fill_quantity <= remaining_quantity()`. The
    /// matching walk never computes such a fill, so hitting this means the
    /// book is corrupt.
    ///
    /// Also panics if the accumulated notional leaves `Decimal`'s range.
    /// Both checks run before any field changes.
    pub fn apply_fill(&mut self, fill_price: Price, fill_quantity: u32) -> bool {
        assert!(
            fill_quantity > 0 && fill_quantity <= self.remaining_quantity(),
            "fill of {} exceeds remaining {} on order {}",
            fill_quantity,
            self.remaining_quantity(),
            self.id
        );

        let notional = fill_price
            .checked_mul(Decimal::from(fill_quantity))
            .and_then(|value| self.filled_notional.checked_add(value));
        let Some(notional) = notional else {
            panic!(
                "notional overflow filling {} @ {} on order {}",
                fill_quantity, fill_price, self.id
            );
        };

        self.filled_quantity += fill_quantity;
        self.filled_notional = notional;

        self.is_complete()
    }
}
