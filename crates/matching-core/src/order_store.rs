//! Owning arena for every order the engine has accepted.
//!
//! Ids are handed out densely starting at 1, so an order's slot is simply
//! `id - 1`. Filled orders stay in the arena so callers can still look up
//! their final state.

use std::ops::{Index, IndexMut};

use crate::order::{Order, OrderId, Price};
use crate::side::Side;

#[derive(Debug, Default)]
pub struct OrderStore {
    orders: Vec<Order>,
    /// Last id handed out; zero until the first order is created.
    last_id: u64,
}

impl OrderStore {
    pub fn new() -> Self {
        OrderStore {
            orders: Vec::new(),
            last_id: 0,
        }
    }

    /// Allocate a fresh order and return its id.
    pub fn create(&mut self, side: Side, limit_price: Price, quantity: u32) -> OrderId {
        self.last_id += 1;
        let id = OrderId::new(self.last_id);
        self.orders.push(Order::new(id, side, limit_price, quantity));
        id
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(Self::slot(id)?)
    }

    pub fn get_mut(&mut self, id: OrderId) -> Option<&mut Order> {
        let slot = Self::slot(id)?;
        self.orders.get_mut(slot)
    }

    /// Number of orders ever accepted.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn slot(id: OrderId) -> Option<usize> {
        id.get().checked_sub(1).map(|s| s as usize)
    }
}

// Orders referenced from a book must exist; a missing one means corruption.
impl Index<OrderId> for OrderStore {
    type Output = Order;

    fn index(&self, id: OrderId) -> &Order {
        match self.get(id) {
            Some(order) => order,
            None => panic!("order {id} is referenced but not in the store"),
        }
    }
}

impl IndexMut<OrderId> for OrderStore {
    fn index_mut(&mut self, id: OrderId) -> &mut Order {
        match self.get_mut(id) {
            Some(order) => order,
            None => panic!("order {id} is referenced but not in the store"),
        }
    }
}
