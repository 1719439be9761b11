//! A single price level: every resting order at one price.
//!
//! The level owns the policy's queue of order ids plus a running total of
//! remaining quantity. It never touches the orders themselves; the engine
//! passes them in after mutating them through the order store.

use crate::order::{Order, OrderId, Price};
use crate::policy::AllocationPolicy;

#[derive(Debug)]
pub struct PriceLevel<P: AllocationPolicy> {
    price: Price,
    queue: P::Queue,
    /// Sum of remaining quantity over the queued orders.
    total_quantity: u64,
}

impl<P: AllocationPolicy> PriceLevel<P> {
    pub fn new(price: Price) -> Self {
        PriceLevel {
            price,
            queue: P::Queue::default(),
            total_quantity: 0,
        }
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    pub fn order_count(&self, policy: &P) -> usize {
        policy.len(&self.queue)
    }

    pub fn is_empty(&self, policy: &P) -> bool {
        policy.len(&self.queue) == 0
    }

    /// Queue a resting order. The order's price must match the level.
    pub fn insert(&mut self, policy: &P, order: &Order) {
        assert_eq!(order.limit_price(), self.price, "order {} queued at wrong level", order.id());
        policy.on_insert(&mut self.queue, order);
        self.total_quantity += u64::from(order.remaining_quantity());
    }

    /// Next order to fill according to the policy.
    pub fn select_next(&self, policy: &P) -> Option<OrderId> {
        policy.select_next(&self.queue)
    }

    /// Account for `filled` units just taken from `order`, dequeuing or
    /// re-keying it as the policy requires.
    pub fn record_fill(&mut self, policy: &P, order: &Order, filled: u32) {
        self.total_quantity -= u64::from(filled);
        policy.on_fill(&mut self.queue, order);
    }

    /// Queued ids in service order.
    pub fn order_ids(&self, policy: &P) -> Vec<OrderId> {
        policy.priority_order(&self.queue)
    }
}
