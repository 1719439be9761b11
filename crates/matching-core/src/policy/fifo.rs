//! Price-time priority: first in, first filled.

use std::collections::VecDeque;

use super::AllocationPolicy;
use crate::order::{Order, OrderId};

/// FIFO within a level. Partial fills keep their place in the queue.
#[derive(Debug, Default, Clone, Copy)]
pub struct PriceTime;

impl AllocationPolicy for PriceTime {
    type Queue = VecDeque<OrderId>;

    fn name(&self) -> &'static str {
        "fifo"
    }

    fn on_insert(&self, queue: &mut Self::Queue, order: &Order) {
        queue.push_back(order.id());
    }

    fn select_next(&self, queue: &Self::Queue) -> Option<OrderId> {
        queue.front().copied()
    }

    fn on_fill(&self, queue: &mut Self::Queue, order: &Order) {
        if !order.is_complete() {
            return;
        }

        // The order being filled is almost always the head.
        if queue.front() == Some(&order.id()) {
            queue.pop_front();
        } else if let Some(pos) = queue.iter().position(|id| *id == order.id()) {
            queue.remove(pos);
        }
    }

    fn len(&self, queue: &Self::Queue) -> usize {
        queue.len()
    }

    fn priority_order(&self, queue: &Self::Queue) -> Vec<OrderId> {
        queue.iter().copied().collect()
    }
}
