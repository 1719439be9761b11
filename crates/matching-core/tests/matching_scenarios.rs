// crates/matching-core/tests/matching_scenarios.rs
use matching_core::{
    Decimal, FifoEngine, LevelSnapshot, MatchEvent, OrderStatus, Price, Side, SizePriorityEngine,
    TradePrice,
};

fn d(s: &str) -> Price {
    s.parse::<Decimal>().unwrap()
}

fn level(price: &str, total_quantity: u64, order_count: usize) -> LevelSnapshot {
    LevelSnapshot {
        price: d(price),
        total_quantity,
        order_count,
    }
}

/// The five resting buys of the demo scenario: (price, quantity).
const DEMO_BUYS: [(&str, u32); 5] = [("5", 20), ("5", 15), ("6", 20), ("7", 10), ("6.7", 15)];

fn seed_demo_buys(engine: &mut FifoEngine) {
    for (price, qty) in DEMO_BUYS {
        let sub = engine.submit(Side::Buy, d(price), qty).unwrap();
        assert!(!sub.filled_immediately);
        assert!(sub.events.is_empty());
    }
}

#[test]
fn demo_scenario_fifo() {
    let mut engine = FifoEngine::new();
    seed_demo_buys(&mut engine);

    assert_eq!(
        engine.snapshot(Side::Buy),
        vec![
            level("7", 10, 1),
            level("6.7", 15, 1),
            level("6", 20, 1),
            level("5", 35, 2),
        ]
    );
    assert!(engine.snapshot(Side::Sell).is_empty());

    // Sell 90 @ 5 sweeps every bid level, best price first.
    let sell = engine.submit(Side::Sell, d("5"), 90).unwrap();
    assert_eq!(sell.order_id.get(), 6);
    assert!(!sell.filled_immediately);

    let fills: Vec<(u64, u32, Price)> = sell
        .events
        .iter()
        .filter_map(|e| match e {
            MatchEvent::PartialFill(f) if f.side == Side::Buy => Some((f.order_id.get(), f.quantity, f.price)),
            _ => None,
        })
        .collect();
    assert_eq!(
        fills,
        vec![
            (4, 10, d("7")),
            (5, 15, d("6.7")),
            (3, 20, d("6")),
            (1, 20, d("5")),
            (2, 15, d("5")),
        ]
    );
    let completed: Vec<u64> = sell
        .events
        .iter()
        .filter_map(|e| match e {
            MatchEvent::Completed(c) => Some(c.order_id.get()),
            _ => None,
        })
        .collect();
    assert_eq!(completed, vec![4, 5, 3, 1, 2]);
    assert_eq!(sell.filled_quantity(), 80);

    assert!(engine.snapshot(Side::Buy).is_empty());
    assert_eq!(engine.snapshot(Side::Sell), vec![level("5", 10, 1)]);

    // Buy 20 @ 7 takes the 10 left at 5 and rests the rest.
    let buy = engine.submit(Side::Buy, d("7"), 20).unwrap();
    assert!(!buy.filled_immediately);
    assert_eq!(buy.events.len(), 3);
    assert_eq!(buy.events[0], MatchEvent::fill(sell.order_id, Side::Sell, 10, d("5")));
    match &buy.events[1] {
        MatchEvent::Completed(c) => {
            assert_eq!(c.order_id, sell.order_id);
            assert_eq!(c.total_quantity, 90);
            assert_eq!(c.limit_price, d("5"));
            // 515.5 / 90
            assert_eq!(c.average_price.round_dp(4), d("5.7278"));
        }
        other => panic!("expected completion, got {other:?}"),
    }
    assert_eq!(buy.events[2], MatchEvent::fill(buy.order_id, Side::Buy, 10, d("5")));

    assert!(engine.snapshot(Side::Sell).is_empty());
    assert_eq!(engine.snapshot(Side::Buy), vec![level("7", 10, 1)]);
    assert_eq!(
        engine.order(buy.order_id).unwrap().status(),
        OrderStatus::PartiallyFilled
    );
}

#[test]
fn demo_scenario_with_aggressor_pricing() {
    let mut engine = FifoEngine::new().with_trade_price(TradePrice::Aggressor);
    seed_demo_buys(&mut engine);

    let sell = engine.submit(Side::Sell, d("5"), 90).unwrap();
    assert!(sell.aggressor_fills().all(|f| f.price == d("5")));

    let maker = engine.order(matching_core::OrderId::new(4)).unwrap();
    assert_eq!(maker.average_fill_price(), Some(d("5")));
}

#[test]
fn fifo_fills_earlier_order_completely_first() {
    let mut engine = FifoEngine::new();
    let a = engine.submit(Side::Sell, d("10"), 5).unwrap().order_id;
    let b = engine.submit(Side::Sell, d("10"), 5).unwrap().order_id;

    let sub = engine.submit(Side::Buy, d("10"), 7).unwrap();
    assert!(sub.filled_immediately);

    assert_eq!(
        sub.events,
        vec![
            MatchEvent::fill(a, Side::Sell, 5, d("10")),
            MatchEvent::completed(a, Side::Sell, 5, d("10"), d("10")),
            MatchEvent::fill(sub.order_id, Side::Buy, 5, d("10")),
            MatchEvent::fill(b, Side::Sell, 2, d("10")),
            MatchEvent::fill(sub.order_id, Side::Buy, 2, d("10")),
            MatchEvent::completed(sub.order_id, Side::Buy, 7, d("10"), d("10")),
        ]
    );
    assert_eq!(engine.order(b).unwrap().remaining_quantity(), 3);
}

#[test]
fn size_priority_serves_largest_first() {
    let mut engine = SizePriorityEngine::new();
    let small = engine.submit(Side::Sell, d("10"), 3).unwrap().order_id;
    let big = engine.submit(Side::Sell, d("10"), 10).unwrap().order_id;

    let sub = engine.submit(Side::Buy, d("10"), 5).unwrap();
    assert!(sub.filled_immediately);

    assert_eq!(engine.order(big).unwrap().remaining_quantity(), 5);
    assert_eq!(engine.order(small).unwrap().remaining_quantity(), 3);
    assert_eq!(engine.snapshot(Side::Sell), vec![level("10", 8, 2)]);
}

#[test]
fn size_priority_rekeys_after_partial_fill() {
    let mut engine = SizePriorityEngine::new();
    let ten = engine.submit(Side::Buy, d("20"), 10).unwrap().order_id;
    let eight = engine.submit(Side::Buy, d("20"), 8).unwrap().order_id;

    engine.submit(Side::Sell, d("20"), 5).unwrap();
    assert_eq!(engine.order(ten).unwrap().remaining_quantity(), 5);

    // The 10 is now a 5, so the 8 is the largest.
    engine.submit(Side::Sell, d("20"), 4).unwrap();
    assert_eq!(engine.order(eight).unwrap().remaining_quantity(), 4);
    assert_eq!(engine.order(ten).unwrap().remaining_quantity(), 5);

    let ids: Vec<u64> = engine
        .resting_orders(Side::Buy)
        .iter()
        .map(|o| o.id().get())
        .collect();
    assert_eq!(ids, vec![ten.get(), eight.get()]);
}

#[test]
fn size_priority_ties_break_by_arrival() {
    let mut engine = SizePriorityEngine::new();
    let first = engine.submit(Side::Sell, d("1.5"), 6).unwrap().order_id;
    let second = engine.submit(Side::Sell, d("1.5"), 6).unwrap().order_id;

    engine.submit(Side::Buy, d("1.5"), 6).unwrap();
    assert!(engine.order(first).unwrap().is_complete());
    assert_eq!(engine.order(second).unwrap().remaining_quantity(), 6);
}

#[test]
fn buy_walks_asks_best_price_first_and_stops_at_limit() {
    let mut engine = FifoEngine::new();
    engine.submit(Side::Sell, d("101"), 4).unwrap();
    engine.submit(Side::Sell, d("100"), 4).unwrap();
    engine.submit(Side::Sell, d("103"), 4).unwrap();
    engine.submit(Side::Sell, d("102"), 4).unwrap();

    let sub = engine.submit(Side::Buy, d("102"), 20).unwrap();
    let prices: Vec<Price> = sub.aggressor_fills().map(|f| f.price).collect();
    assert_eq!(prices, vec![d("100"), d("101"), d("102")]);
    assert!(!sub.filled_immediately);

    let tob = engine.top_of_book();
    assert_eq!(tob.bid.unwrap().price, d("102"));
    assert_eq!(tob.bid.unwrap().quantity, 8);
    assert_eq!(tob.ask.unwrap().price, d("103"));
    assert!(!tob.is_crossed());
}

#[test]
fn sell_walks_bids_from_highest_down() {
    let mut engine = SizePriorityEngine::new();
    engine.submit(Side::Buy, d("9"), 1).unwrap();
    engine.submit(Side::Buy, d("11"), 1).unwrap();
    engine.submit(Side::Buy, d("10"), 1).unwrap();

    let sub = engine.submit(Side::Sell, d("10"), 5).unwrap();
    let prices: Vec<Price> = sub.aggressor_fills().map(|f| f.price).collect();
    assert_eq!(prices, vec![d("11"), d("10")]);

    assert_eq!(engine.snapshot(Side::Buy), vec![level("9", 1, 1)]);
    assert_eq!(engine.snapshot(Side::Sell), vec![level("10", 3, 1)]);
}

#[test]
fn marketable_order_gets_no_price_improvement() {
    let mut engine = FifoEngine::new();
    engine.submit(Side::Buy, d("50"), 10).unwrap();

    let sub = engine.submit(Side::Sell, d("1"), 10).unwrap();
    assert!(sub.filled_immediately);
    match sub.events.last() {
        Some(MatchEvent::Completed(c)) => {
            assert_eq!(c.limit_price, d("1"));
            assert_eq!(c.average_price, d("50"));
        }
        other => panic!("expected completion, got {other:?}"),
    }
}

#[test]
fn rejected_submission_changes_nothing() {
    let mut engine = FifoEngine::new();
    engine.submit(Side::Buy, d("5"), 5).unwrap();
    let before = engine.snapshot(Side::Buy);

    assert!(engine.submit(Side::Sell, d("0"), 5).is_err());
    assert!(engine.submit(Side::Sell, d("5"), 0).is_err());

    assert_eq!(engine.snapshot(Side::Buy), before);
    assert_eq!(engine.orders_accepted(), 1);
}
