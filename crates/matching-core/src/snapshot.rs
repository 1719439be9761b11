//! Read-only views of book state for reporting layers.

use serde::Serialize;

use crate::order::Price;

/// Aggregate state of one price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelSnapshot {
    pub price: Price,
    /// Sum of remaining quantity over the level's orders.
    pub total_quantity: u64,
    pub order_count: usize,
}

/// Best price and the quantity resting there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub price: Price,
    pub quantity: u64,
}

/// Best bid and best ask; `None` when that side is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TopOfBook {
    pub bid: Option<Quote>,
    pub ask: Option<Quote>,
}

impl TopOfBook {
    /// Returns `true` if there is *no* bid and *no* ask.
    pub fn is_empty(&self) -> bool {
        self.bid.is_none() && self.ask.is_none()
    }

    /// Returns `true` if the best bid trades through the best ask. A
    /// correctly maintained book never reports this.
    pub fn is_crossed(&self) -> bool {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => bid.price >= ask.price,
            _ => false,
        }
    }

    /// Best ask minus best bid, when both sides are present.
    pub fn spread(&self) -> Option<Price> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => Some(ask.price - bid.price),
            _ => None,
        }
    }
}
