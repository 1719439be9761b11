//! Single-instrument matching engine.
//!
//! - Owns every order (through the [`OrderStore`]) and both books.
//! - Walks the opposing book from best price outward, stopping at the
//!   first level the incoming order cannot trade with.
//! - Inside a level, the allocation policy `P` decides who fills next.
//! - Whatever is left of the incoming order rests in its own book.
//!
//! The engine is the only thing that mutates orders or books. Every
//! `submit` runs to completion before returning; callers that share an
//! engine across threads must put the whole call behind one lock.

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::config::TradePrice;
use crate::error::{EngineError, OrderField};
use crate::events::{MatchEvent, Submission};
use crate::order::{Order, OrderId, Price};
use crate::order_book::OrderBook;
use crate::order_store::OrderStore;
use crate::policy::{AllocationPolicy, PriceTime, SizePriority};
use crate::side::Side;
use crate::snapshot::{LevelSnapshot, Quote, TopOfBook};

/// Engine with price-time priority inside each level.
pub type FifoEngine = MatchingEngine<PriceTime>;

/// Engine that serves the largest resting order at a level first.
pub type SizePriorityEngine = MatchingEngine<SizePriority>;

#[derive(Debug)]
pub struct MatchingEngine<P: AllocationPolicy> {
    policy: P,
    trade_price: TradePrice,
    orders: OrderStore,
    bids: OrderBook<P>,
    asks: OrderBook<P>,
}

impl<P: AllocationPolicy> Default for MatchingEngine<P> {
    fn default() -> Self {
        MatchingEngine::new()
    }
}

impl<P: AllocationPolicy> MatchingEngine<P> {
    /// Create an empty engine with the policy's default instance.
    pub fn new() -> Self {
        MatchingEngine::with_policy(P::default())
    }

    pub fn with_policy(policy: P) -> Self {
        MatchingEngine {
            policy,
            trade_price: TradePrice::default(),
            orders: OrderStore::new(),
            bids: OrderBook::new(Side::Buy),
            asks: OrderBook::new(Side::Sell),
        }
    }

    /// Choose which limit price fills execute at.
    pub fn with_trade_price(mut self, trade_price: TradePrice) -> Self {
        self.trade_price = trade_price;
        self
    }

    /// Submit a limit order.
    ///
    /// The order first trades against the opposing book, best price first.
    /// Any remainder rests at `price`. Invalid input is rejected before any
    /// state changes, including id allocation.
    pub fn submit(&mut self, side: Side, price: Price, quantity: u32) -> Result<Submission, EngineError> {
        if price <= Price::ZERO {
            return Err(EngineError::invalid(OrderField::Price, "must be greater than zero"));
        }
        if quantity == 0 {
            return Err(EngineError::invalid(OrderField::Quantity, "must be greater than zero"));
        }
        if price.checked_mul(Decimal::from(quantity)).is_none() {
            return Err(EngineError::invalid(OrderField::Price, "notional out of range"));
        }

        let order_id = self.orders.create(side, price, quantity);
        debug!(
            policy = self.policy.name(),
            %order_id,
            %side,
            %price,
            quantity,
            "order accepted"
        );

        let mut events = Vec::new();
        let filled_immediately = self.cross(order_id, &mut events);

        if !filled_immediately {
            let book = match side {
                Side::Buy => &mut self.bids,
                Side::Sell => &mut self.asks,
            };
            // Already validated above; what is left is positive and on this side.
            let order = &self.orders[order_id];
            book.place(&self.policy, order);
            debug!(
                %order_id,
                remaining = order.remaining_quantity(),
                "order resting"
            );
        }

        Ok(Submission {
            order_id,
            filled_immediately,
            events,
        })
    }

    // -------------------------------------------------------------------------
    // Matching
    // -------------------------------------------------------------------------

    /// Trade the incoming order against the opposing book.
    ///
    /// Returns `true` if the order completed.
    fn cross(&mut self, order_id: OrderId, events: &mut Vec<MatchEvent>) -> bool {
        let (side, limit_price) = {
            let order = &self.orders[order_id];
            (order.side(), order.limit_price())
        };

        let policy = &self.policy;
        let trade_price = self.trade_price;
        let orders = &mut self.orders;
        let opposing = match side {
            Side::Buy => &mut self.asks,
            Side::Sell => &mut self.bids,
        };

        let marketable: Vec<Price> = opposing
            .best_to_worst()
            .map(|level| level.price())
            .take_while(|&level_price| side.is_marketable(limit_price, level_price))
            .collect();

        for level_price in marketable {
            let fill_price = match trade_price {
                TradePrice::Resting => level_price,
                TradePrice::Aggressor => limit_price,
            };

            if let Some(level) = opposing.level_mut(level_price) {
                while orders[order_id].remaining_quantity() > 0 {
                    let Some(resting_id) = level.select_next(policy) else {
                        break;
                    };

                    let fill_quantity = orders[resting_id]
                        .remaining_quantity()
                        .min(orders[order_id].remaining_quantity());

                    fill_and_report(&mut orders[resting_id], fill_price, fill_quantity, events);
                    level.record_fill(policy, &orders[resting_id], fill_quantity);
                    fill_and_report(&mut orders[order_id], fill_price, fill_quantity, events);
                }
            }

            opposing.remove_if_empty(policy, level_price);

            if orders[order_id].is_complete() {
                return true;
            }
        }

        false
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn trade_price(&self) -> TradePrice {
        self.trade_price
    }

    /// Read-only access to one side of the book.
    pub fn book(&self, side: Side) -> &OrderBook<P> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    /// Per-level aggregates for one side, best price first.
    pub fn snapshot(&self, side: Side) -> Vec<LevelSnapshot> {
        self.book(side).snapshot(&self.policy)
    }

    pub fn top_of_book(&self) -> TopOfBook {
        TopOfBook {
            bid: self.best_quote(Side::Buy),
            ask: self.best_quote(Side::Sell),
        }
    }

    /// State of any order this engine has accepted, resting or not.
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(id)
    }

    /// Resting orders of one side: best level first, then in the order the
    /// policy would fill them.
    pub fn resting_orders(&self, side: Side) -> Vec<&Order> {
        self.book(side)
            .order_ids(&self.policy)
            .into_iter()
            .map(|id| &self.orders[id])
            .collect()
    }

    /// Number of orders accepted since construction.
    pub fn orders_accepted(&self) -> usize {
        self.orders.len()
    }

    fn best_quote(&self, side: Side) -> Option<Quote> {
        self.book(side).best_to_worst().next().map(|level| Quote {
            price: level.price(),
            quantity: level.total_quantity(),
        })
    }
}

/// Apply one fill to `order` and record the resulting events.
fn fill_and_report(order: &mut Order, fill_price: Price, fill_quantity: u32, events: &mut Vec<MatchEvent>) {
    let completed = order.apply_fill(fill_price, fill_quantity);

    trace!(
        order_id = %order.id(),
        side = %order.side(),
        quantity = fill_quantity,
        price = %fill_price,
        completed,
        "fill"
    );

    events.push(MatchEvent::fill(order.id(), order.side(), fill_quantity, fill_price));

    if completed {
        events.push(MatchEvent::completed(
            order.id(),
            order.side(),
            order.filled_quantity(),
            order.limit_price(),
            order.average_fill_price().unwrap_or(fill_price),
        ));
    }
}
