use matching_core::{PriceTime, SizePriority, TradePrice};
use matching_replay::{parse_script, OutputFormat, Replay, ReplayConfig, DEMO_SCRIPT};

async fn replay_text<P: matching_core::AllocationPolicy>(config: ReplayConfig, script: &str) -> String {
    let commands = parse_script(script).expect("script should parse");
    let mut replay = Replay::<P, Vec<u8>>::new(config, Vec::new());
    replay.run(&commands).await.expect("replay should succeed");
    String::from_utf8(replay.into_output()).expect("output should be utf-8")
}

fn lines(s: &str) -> Vec<&str> {
    s.lines().map(str::trim_end).filter(|l| !l.is_empty()).collect()
}

#[tokio::test]
async fn demo_replay_matches_expected_output() {
    let actual = replay_text::<PriceTime>(ReplayConfig::default(), DEMO_SCRIPT).await;
    let expected = include_str!("data/demo_fifo.txt");

    assert_eq!(lines(&actual), lines(expected));
}

#[tokio::test]
async fn demo_replay_with_aggressor_pricing() {
    let config = ReplayConfig {
        trade_price: TradePrice::Aggressor,
        ..ReplayConfig::default()
    };
    let actual = replay_text::<PriceTime>(config, DEMO_SCRIPT).await;
    let out = lines(&actual);

    // Every fill of the sweeping sell executes at the sell's own limit.
    assert!(out.contains(&"Partially Filled 4 BUY 10 @ 5"));
    assert!(out.contains(&"Completed 4 BUY 10 @ 7 w/ Avg. Price 5"));
    assert!(out.contains(&"Completed 6 SELL 90 @ 5 w/ Avg. Price 5.222222"));
    assert!(out.contains(&"Partially Filled 7 BUY 10 @ 7"));
}

#[tokio::test]
async fn size_priority_demo_serves_largest_first() {
    let actual = replay_text::<SizePriority>(ReplayConfig::default(), DEMO_SCRIPT).await;
    let out = lines(&actual);

    // At price 5 order 1 (20) is larger than order 2 (15), same as arrival.
    let first = out.iter().position(|l| *l == "Partially Filled 1 BUY 20 @ 5").unwrap();
    let second = out.iter().position(|l| *l == "Partially Filled 2 BUY 15 @ 5").unwrap();
    assert!(first < second);

    let script = "N, S, 10, 3\nN, S, 10, 10\nN, S, 10, 7\nN, B, 10, 12\nP\n";
    let actual = replay_text::<SizePriority>(ReplayConfig::default(), script).await;
    let out = lines(&actual);

    // 10 fills first, then 7 takes the last 2, leaving 5 then 3 at the level.
    assert_eq!(out[0], "Partially Filled 2 SELL 10 @ 10");
    assert_eq!(out[1], "Completed 2 SELL 10 @ 10 w/ Avg. Price 10");
    assert_eq!(out[3], "Partially Filled 3 SELL 2 @ 10");
    assert_eq!(
        out[out.len() - 5..].to_vec(),
        vec!["SELL Orders", "10, 5", "10, 3", "BUY Orders", "============="]
    );
}

#[tokio::test]
async fn json_replay_ends_with_book_state() {
    let config = ReplayConfig {
        format: OutputFormat::Json,
        ..ReplayConfig::default()
    };
    let actual = replay_text::<PriceTime>(config, DEMO_SCRIPT).await;

    let last: serde_json::Value =
        serde_json::from_str(actual.lines().last().expect("output should not be empty")).unwrap();
    assert_eq!(last["type"], "book");
    assert!(last["asks"].as_array().unwrap().is_empty());

    let bids = last["bids"].as_array().unwrap();
    assert_eq!(bids.len(), 1);
    assert_eq!(bids[0]["total_quantity"], 10);
    assert_eq!(bids[0]["order_count"], 1);
}
