//! Events emitted by the matching engine.
//!
//! These are the only way the core tells the outside world what happened.
//! They are plain data: a reporting layer renders them, the core never does
//! any I/O itself.

use serde::Serialize;

use crate::order::{OrderId, Price};
use crate::side::Side;

/// A single notification produced while matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    /// Some quantity of an order traded. Emitted for every fill, including
    /// the one that completes the order.
    PartialFill(Fill),

    /// The order has nothing left to fill.
    Completed(Completion),
}

/// One fill applied to one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fill {
    pub order_id: OrderId,
    pub side: Side,
    pub quantity: u32,
    pub price: Price,
}

/// Final state of a fully filled order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub order_id: OrderId,
    pub side: Side,
    pub total_quantity: u32,
    pub limit_price: Price,
    pub average_price: Price,
}

/// Outcome of one `submit` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    /// Id assigned to the submitted order.
    pub order_id: OrderId,
    /// `true` if the order completed without resting.
    pub filled_immediately: bool,
    /// Events in the order they happened.
    pub events: Vec<MatchEvent>,
}

impl Submission {
    /// Fills applied to the submitted order itself.
    pub fn aggressor_fills(&self) -> impl Iterator<Item = &Fill> + '_ {
        let id = self.order_id;
        self.events.iter().filter_map(move |e| match e {
            MatchEvent::PartialFill(fill) if fill.order_id == id => Some(fill),
            _ => None,
        })
    }

    /// Total quantity the submitted order traded on arrival.
    pub fn filled_quantity(&self) -> u32 {
        self.aggressor_fills().map(|f| f.quantity).sum()
    }
}

impl MatchEvent {
    /// Convenience constructor for a fill event.
    pub fn fill(order_id: OrderId, side: Side, quantity: u32, price: Price) -> Self {
        MatchEvent::PartialFill(Fill {
            order_id,
            side,
            quantity,
            price,
        })
    }

    /// Convenience constructor for a completion event.
    pub fn completed(
        order_id: OrderId,
        side: Side,
        total_quantity: u32,
        limit_price: Price,
        average_price: Price,
    ) -> Self {
        MatchEvent::Completed(Completion {
            order_id,
            side,
            total_quantity,
            limit_price,
            average_price,
        })
    }

    pub fn order_id(&self) -> OrderId {
        match self {
            MatchEvent::PartialFill(f) => f.order_id,
            MatchEvent::Completed(c) => c.order_id,
        }
    }
}
