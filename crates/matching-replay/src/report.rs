// crates/matching-replay/src/report.rs

//! Rendering of engine output.
//!
//! Text format:
//!
//! - Fill:       `Partially Filled <id> <BUY|SELL> <qty> @ <price>`
//! - Completion: `Completed <id> <BUY|SELL> <qty> @ <limit> w/ Avg. Price <avg>`
//! - Rejection:  `Rejected <BUY|SELL> <qty> @ <price>: <reason>`
//! - Book print, asks then bids, each side best price first:
//!
//! ```text
//! =============
//! SELL Orders
//! <price>, <remaining>
//! BUY Orders
//! <price>, <remaining>
//! =============
//! ```
//!
//! JSON format: one object per line, tagged with `"type"`.

use matching_core::{
    AllocationPolicy, Decimal, EngineError, LevelSnapshot, MatchEvent, MatchingEngine, Price, Side,
};
use serde::Serialize;

use crate::config::BookView;

const RULE: &str = "=============";

/// Decimal places shown for average prices.
const AVERAGE_PRICE_DP: u32 = 6;

/// Format a single engine event as a text line.
pub fn format_event(event: &MatchEvent) -> String {
    match event {
        MatchEvent::PartialFill(f) => format!(
            "Partially Filled {} {} {} @ {}",
            f.order_id,
            f.side,
            f.quantity,
            display_price(f.price)
        ),
        MatchEvent::Completed(c) => format!(
            "Completed {} {} {} @ {} w/ Avg. Price {}",
            c.order_id,
            c.side,
            c.total_quantity,
            display_price(c.limit_price),
            display_price(c.average_price.round_dp(AVERAGE_PRICE_DP))
        ),
    }
}

pub fn format_rejection(side: Side, price: Price, quantity: u32, err: &EngineError) -> String {
    format!("Rejected {} {} @ {}: {}", side, quantity, display_price(price), err)
}

/// Text lines for a full book print.
pub fn format_book<P: AllocationPolicy>(engine: &MatchingEngine<P>, view: BookView) -> Vec<String> {
    let mut lines = vec![RULE.to_string()];

    for (side, title) in [(Side::Sell, "SELL Orders"), (Side::Buy, "BUY Orders")] {
        lines.push(title.to_string());
        match view {
            BookView::Orders => {
                for order in engine.resting_orders(side) {
                    lines.push(format!(
                        "{}, {}",
                        display_price(order.limit_price()),
                        order.remaining_quantity()
                    ));
                }
            }
            BookView::Levels => {
                for level in engine.snapshot(side) {
                    lines.push(format!(
                        "{}, {} ({} orders)",
                        display_price(level.price),
                        level.total_quantity,
                        level.order_count
                    ));
                }
            }
        }
    }

    lines.push(RULE.to_string());
    lines
}

/// Non-event JSON lines.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ReportLine<'a> {
    Book {
        asks: Vec<LevelSnapshot>,
        bids: Vec<LevelSnapshot>,
    },
    Rejected {
        side: Side,
        price: Price,
        quantity: u32,
        reason: &'a str,
    },
}

pub fn json_event(event: &MatchEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(event)
}

pub fn json_rejection(side: Side, price: Price, quantity: u32, err: &EngineError) -> Result<String, serde_json::Error> {
    let reason = err.to_string();
    serde_json::to_string(&ReportLine::Rejected {
        side,
        price,
        quantity,
        reason: &reason,
    })
}

pub fn json_book<P: AllocationPolicy>(engine: &MatchingEngine<P>) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ReportLine::Book {
        asks: engine.snapshot(Side::Sell),
        bids: engine.snapshot(Side::Buy),
    })
}

fn display_price(price: Decimal) -> Decimal {
    price.normalize()
}
