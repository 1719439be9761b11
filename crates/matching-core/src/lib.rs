//! matching-core
//!
//! Pure limit-order matching logic:
//! - orders and the arena that owns them
//! - price levels and per-side order books
//! - allocation policies (price-time, size priority)
//! - the matching engine and the events it emits
//!
//! No I/O happens here. Callers submit orders and consume
//! [`MatchEvent`]s and snapshots.

pub mod side;
pub mod order;
pub mod order_store;
pub mod price_level;
pub mod order_book;
pub mod policy;
pub mod matching_engine;
pub mod events;
pub mod snapshot;
pub mod config;
pub mod error;

pub use side::Side;

pub use order::{Order, OrderId, OrderStatus, Price};
pub use order_book::OrderBook;
pub use price_level::PriceLevel;

pub use policy::{AllocationPolicy, PriceTime, SizePriority};

pub use events::{Completion, Fill, MatchEvent, Submission};
pub use snapshot::{LevelSnapshot, Quote, TopOfBook};

pub use matching_engine::{FifoEngine, MatchingEngine, SizePriorityEngine};
pub use config::{PolicyKind, TradePrice};
pub use error::{EngineError, OrderField};

pub use rust_decimal::Decimal;
