//! Allocation policies: who gets filled next inside one price level.
//!
//! Price priority across levels is handled by the engine's walk; a policy
//! only decides the order of service within a level. The engine is generic
//! over [`AllocationPolicy`], so the same walk serves both disciplines.

pub mod fifo;
pub mod size_priority;

pub use fifo::PriceTime;
pub use size_priority::SizePriority;

use std::fmt;

use crate::order::{Order, OrderId};

/// Priority discipline applied within a single price level.
///
/// Each policy brings its own per-level queue type. The queue only stores
/// order ids; the policy receives the order itself whenever it needs to
/// look at quantities.
pub trait AllocationPolicy: fmt::Debug + Default {
    /// Per-level priority structure.
    type Queue: fmt::Debug + Default;

    /// Short, stable name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Place a newly resting order in the level's queue.
    fn on_insert(&self, queue: &mut Self::Queue, order: &Order);

    /// The resting order to fill next, if any.
    fn select_next(&self, queue: &Self::Queue) -> Option<OrderId>;

    /// Called after `order` (which is in `queue`) received a fill.
    ///
    /// Completed orders must be dequeued; partially filled ones stay and
    /// are re-prioritised if the policy keys on quantity.
    fn on_fill(&self, queue: &mut Self::Queue, order: &Order);

    /// Number of orders in the queue.
    fn len(&self, queue: &Self::Queue) -> usize;

    /// Order ids in the sequence they would be served.
    fn priority_order(&self, queue: &Self::Queue) -> Vec<OrderId>;
}
