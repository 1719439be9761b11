//! One side of the book: price levels sorted from best to worst.
//!
//! - Bids: best = highest price.
//! - Asks: best = lowest price.
//!
//! Levels live in a `BTreeMap` keyed by price, so "best first" does not
//! depend on insertion order. Empty levels are never kept: the engine calls
//! [`OrderBook::remove_if_empty`] after every level it drains.

use std::collections::BTreeMap;

use tracing::trace;

use crate::error::{EngineError, OrderField};
use crate::order::{Order, OrderId, Price};
use crate::policy::AllocationPolicy;
use crate::price_level::PriceLevel;
use crate::side::Side;
use crate::snapshot::LevelSnapshot;

#[derive(Debug)]
pub struct OrderBook<P: AllocationPolicy> {
    side: Side,
    /// Sorted ascending; bids are read from the back.
    levels: BTreeMap<Price, PriceLevel<P>>,
}

impl<P: AllocationPolicy> OrderBook<P> {
    pub fn new(side: Side) -> Self {
        OrderBook {
            side,
            levels: BTreeMap::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Live levels from best price to worst.
    ///
    /// Recomputed from the current state on every call.
    pub fn best_to_worst(&self) -> Box<dyn Iterator<Item = &PriceLevel<P>> + '_> {
        match self.side {
            Side::Buy => Box::new(self.levels.values().rev()),
            Side::Sell => Box::new(self.levels.values()),
        }
    }

    pub fn best_price(&self) -> Option<Price> {
        match self.side {
            Side::Buy => self.levels.keys().next_back().copied(),
            Side::Sell => self.levels.keys().next().copied(),
        }
    }

    pub fn level(&self, price: Price) -> Option<&PriceLevel<P>> {
        self.levels.get(&price)
    }

    pub(crate) fn level_mut(&mut self, price: Price) -> Option<&mut PriceLevel<P>> {
        self.levels.get_mut(&price)
    }

    /// Insert a resting order at its limit price, creating the level on
    /// first use.
    pub fn rest(&mut self, policy: &P, order: &Order) -> Result<(), EngineError> {
        if order.limit_price() <= Price::ZERO {
            return Err(EngineError::invalid(OrderField::Price, "must be greater than zero"));
        }
        if order.remaining_quantity() == 0 {
            return Err(EngineError::invalid(OrderField::Quantity, "nothing left to rest"));
        }
        if order.side() != self.side {
            return Err(EngineError::invalid(OrderField::Side, "order belongs to the other book"));
        }

        self.place(policy, order);
        Ok(())
    }

    /// Insert an order the caller has already validated.
    pub(crate) fn place(&mut self, policy: &P, order: &Order) {
        debug_assert!(order.side() == self.side && order.remaining_quantity() > 0);

        let price = order.limit_price();
        let level = self
            .levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price));
        level.insert(policy, order);

        trace!(
            side = %self.side,
            %price,
            order_id = %order.id(),
            remaining = order.remaining_quantity(),
            "rested order"
        );
    }

    /// Drop the level at `price` if it no longer holds any order.
    ///
    /// Returns `true` if a level was removed. Calling it again is a no-op.
    pub fn remove_if_empty(&mut self, policy: &P, price: Price) -> bool {
        let empty = self
            .levels
            .get(&price)
            .map(|level| level.is_empty(policy))
            .unwrap_or(false);

        if empty {
            self.levels.remove(&price);
        }
        empty
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Total number of resting orders across all levels.
    pub fn order_count(&self, policy: &P) -> usize {
        self.levels.values().map(|l| l.order_count(policy)).sum()
    }

    /// Per-level aggregates, best to worst.
    pub fn snapshot(&self, policy: &P) -> Vec<LevelSnapshot> {
        self.best_to_worst()
            .map(|level| LevelSnapshot {
                price: level.price(),
                total_quantity: level.total_quantity(),
                order_count: level.order_count(policy),
            })
            .collect()
    }

    /// Every resting order id, best level first, then in service order.
    pub fn order_ids(&self, policy: &P) -> Vec<OrderId> {
        self.best_to_worst()
            .flat_map(|level| level.order_ids(policy))
            .collect()
    }
}
