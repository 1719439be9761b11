//! Size priority: the largest resting order at a level is served first.
//!
//! This is sometimes called "pro-rata", but it is not proportional
//! allocation. One incoming order is never split across resting orders by
//! size ratio; it simply fills the biggest one first, then the next.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

use super::AllocationPolicy;
use crate::order::{Order, OrderId};

/// Largest remaining quantity first, earlier order id breaks ties.
#[derive(Debug, Default, Clone, Copy)]
pub struct SizePriority;

/// Ranked queue for [`SizePriority`].
///
/// `keys` remembers the quantity each order is currently ranked under, so a
/// partial fill can remove the stale entry before reinserting.
#[derive(Debug, Default)]
pub struct SizeQueue {
    ranked: BTreeSet<(Reverse<u32>, OrderId)>,
    keys: HashMap<OrderId, u32>,
}

impl SizeQueue {
    fn insert(&mut self, id: OrderId, remaining: u32) {
        self.ranked.insert((Reverse(remaining), id));
        self.keys.insert(id, remaining);
    }

    fn remove(&mut self, id: OrderId) -> bool {
        match self.keys.remove(&id) {
            Some(remaining) => self.ranked.remove(&(Reverse(remaining), id)),
            None => false,
        }
    }
}

impl AllocationPolicy for SizePriority {
    type Queue = SizeQueue;

    fn name(&self) -> &'static str {
        "size-priority"
    }

    fn on_insert(&self, queue: &mut Self::Queue, order: &Order) {
        queue.insert(order.id(), order.remaining_quantity());
    }

    fn select_next(&self, queue: &Self::Queue) -> Option<OrderId> {
        queue.ranked.first().map(|(_, id)| *id)
    }

    fn on_fill(&self, queue: &mut Self::Queue, order: &Order) {
        // Remove, then reinsert under the new key if anything is left.
        queue.remove(order.id());
        if !order.is_complete() {
            queue.insert(order.id(), order.remaining_quantity());
        }
    }

    fn len(&self, queue: &Self::Queue) -> usize {
        queue.ranked.len()
    }

    fn priority_order(&self, queue: &Self::Queue) -> Vec<OrderId> {
        queue.ranked.iter().map(|(_, id)| *id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order_store::OrderStore;
    use crate::side::Side;
    use rust_decimal::Decimal;

    fn setup(quantities: &[u32]) -> (OrderStore, SizeQueue, Vec<OrderId>) {
        let mut store = OrderStore::new();
        let mut queue = SizeQueue::default();
        let mut ids = Vec::new();
        for &qty in quantities {
            let id = store.create(Side::Buy, Decimal::TEN, qty);
            SizePriority.on_insert(&mut queue, store.get(id).unwrap());
            ids.push(id);
        }
        (store, queue, ids)
    }

    #[test]
    fn largest_first_ties_by_arrival() {
        let (_, queue, ids) = setup(&[3, 10, 10, 7]);

        assert_eq!(SizePriority.select_next(&queue), Some(ids[1]));
        assert_eq!(
            SizePriority.priority_order(&queue),
            vec![ids[1], ids[2], ids[3], ids[0]]
        );
    }

    #[test]
    fn partial_fill_rekeys() {
        let (mut store, mut queue, ids) = setup(&[10, 8]);

        // 10 -> 5, now the 8 is the largest.
        store.get_mut(ids[0]).unwrap().apply_fill(Decimal::TEN, 5);
        SizePriority.on_fill(&mut queue, store.get(ids[0]).unwrap());

        assert_eq!(SizePriority.select_next(&queue), Some(ids[1]));
        assert_eq!(SizePriority.len(&queue), 2);
    }

    #[test]
    fn completion_dequeues() {
        let (mut store, mut queue, ids) = setup(&[4, 2]);

        store.get_mut(ids[0]).unwrap().apply_fill(Decimal::TEN, 4);
        SizePriority.on_fill(&mut queue, store.get(ids[0]).unwrap());

        assert_eq!(SizePriority.priority_order(&queue), vec![ids[1]]);
        assert!(!queue.keys.contains_key(&ids[0]));
    }
}
