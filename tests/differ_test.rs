//! Behavioral tests for the snapshot differ.

mod common;

use common::snapshot;
use ratewatch::differ::{Direction, RollingHistory, diff};
use rust_decimal_macros::dec;

#[test]
fn first_poll_seeds_history_without_comparison() {
    let curr = snapshot(&[("BTC", "100"), ("ETH", "10")]);
    let outcome = diff(None, &curr, &RollingHistory::new(), 20);

    assert!(outcome.direction.is_empty());
    assert!(outcome.top_gainer.is_none());
    assert_eq!(outcome.history.len(), 2);
    assert_eq!(
        outcome.history.series("BTC").unwrap().iter().copied().collect::<Vec<_>>(),
        vec![dec!(100)]
    );
    assert_eq!(
        outcome.history.series("ETH").unwrap().iter().copied().collect::<Vec<_>>(),
        vec![dec!(10)]
    );
}

#[test]
fn direction_covers_every_current_ticker() {
    let prev = snapshot(&[("BTC", "100"), ("ETH", "10"), ("ADA", "1")]);
    let curr = snapshot(&[("BTC", "110"), ("ETH", "9"), ("ADA", "1"), ("SOL", "50")]);
    let outcome = diff(Some(&prev), &curr, &RollingHistory::new(), 20);

    assert_eq!(outcome.direction.len(), 4);
    assert_eq!(outcome.direction["BTC"], Direction::Up);
    assert_eq!(outcome.direction["ETH"], Direction::Down);
    assert_eq!(outcome.direction["ADA"], Direction::Same);
    // First appearance compares against zero.
    assert_eq!(outcome.direction["SOL"], Direction::Up);
}

#[test]
fn concrete_two_ticker_scenario() {
    let prev = snapshot(&[("BTC", "100"), ("ETH", "10")]);
    let curr = snapshot(&[("BTC", "110"), ("ETH", "9")]);
    let outcome = diff(Some(&prev), &curr, &RollingHistory::new(), 20);

    assert_eq!(outcome.direction["BTC"], Direction::Up);
    assert_eq!(outcome.direction["ETH"], Direction::Down);

    let gainer = outcome.top_gainer.expect("BTC rose");
    assert_eq!(gainer.ticker, "BTC");
    assert_eq!(gainer.change, dec!(10));
    assert_eq!(gainer.percent, dec!(10));
}

#[test]
fn history_is_bounded_fifo() {
    let window = 3;
    let mut history = RollingHistory::new();
    let mut prev = None;

    for price in ["1", "2", "3", "4"] {
        let curr = snapshot(&[("BTC", price)]);
        let outcome = diff(prev.as_ref(), &curr, &history, window);
        history = outcome.history;
        prev = Some(curr);
    }

    let series: Vec<_> = history.series("BTC").unwrap().iter().copied().collect();
    assert_eq!(series, vec![dec!(2), dec!(3), dec!(4)]);
}

#[test]
fn top_gainer_has_maximal_percent_change() {
    let prev = snapshot(&[("BTC", "100"), ("ETH", "10"), ("ADA", "1")]);
    // BTC +10%, ETH +50%, ADA +20%
    let curr = snapshot(&[("BTC", "110"), ("ETH", "15"), ("ADA", "1.2")]);
    let outcome = diff(Some(&prev), &curr, &RollingHistory::new(), 20);

    let gainer = outcome.top_gainer.expect("several tickers rose");
    assert_eq!(gainer.ticker, "ETH");
    assert_eq!(gainer.percent, dec!(50));
    assert_eq!(gainer.change, dec!(5));
}

#[test]
fn dust_prices_cannot_win_top_gainer() {
    let prev = snapshot(&[("SHIB", "0.001"), ("PEPE", "0.004")]);
    // Both double, but neither clears the 0.01 threshold.
    let curr = snapshot(&[("SHIB", "0.002"), ("PEPE", "0.008")]);
    let outcome = diff(Some(&prev), &curr, &RollingHistory::new(), 20);

    assert!(outcome.top_gainer.is_none());
    assert_eq!(outcome.direction["SHIB"], Direction::Up);
}

#[test]
fn zero_previous_price_is_excluded_from_ranking() {
    let prev = snapshot(&[("BTC", "100"), ("NEW", "0")]);
    // NEW jumps from zero; BTC gains a modest 1%.
    let curr = snapshot(&[("BTC", "101"), ("NEW", "500")]);
    let outcome = diff(Some(&prev), &curr, &RollingHistory::new(), 20);

    let gainer = outcome.top_gainer.expect("BTC rose");
    assert_eq!(gainer.ticker, "BTC");

    // When only the zero-previous ticker rose there is no gainer at all.
    let prev = snapshot(&[("BTC", "100"), ("NEW", "0")]);
    let curr = snapshot(&[("BTC", "100"), ("NEW", "500")]);
    let outcome = diff(Some(&prev), &curr, &RollingHistory::new(), 20);
    assert!(outcome.top_gainer.is_none());
}

#[test]
fn falling_market_has_no_top_gainer() {
    let prev = snapshot(&[("BTC", "100"), ("ETH", "10")]);
    let curr = snapshot(&[("BTC", "90"), ("ETH", "10")]);
    let outcome = diff(Some(&prev), &curr, &RollingHistory::new(), 20);

    assert!(outcome.top_gainer.is_none());
}

#[test]
fn tie_returns_one_of_the_maxima() {
    let prev = snapshot(&[("AAA", "10"), ("BBB", "20")]);
    // Both +10%.
    let curr = snapshot(&[("AAA", "11"), ("BBB", "22")]);
    let outcome = diff(Some(&prev), &curr, &RollingHistory::new(), 20);

    let gainer = outcome.top_gainer.expect("both rose");
    assert_eq!(gainer.percent, dec!(10));
    assert!(gainer.ticker == "AAA" || gainer.ticker == "BBB");
}

#[test]
fn diff_is_pure() {
    let prev = snapshot(&[("BTC", "100"), ("ETH", "10")]);
    let curr = snapshot(&[("BTC", "110"), ("ETH", "9")]);
    let mut history = RollingHistory::new();
    history = diff(None, &prev, &history, 20).history;

    let prev_before = prev.clone();
    let curr_before = curr.clone();
    let history_before = history.clone();

    let first = diff(Some(&prev), &curr, &history, 20);
    let second = diff(Some(&prev), &curr, &history, 20);

    assert_eq!(first, second);
    assert_eq!(prev, prev_before);
    assert_eq!(curr, curr_before);
    assert_eq!(history, history_before);
}

#[test]
fn empty_current_snapshot_changes_nothing() {
    let prev = snapshot(&[("BTC", "100")]);
    let seeded = diff(None, &prev, &RollingHistory::new(), 20).history;

    let curr = snapshot(&[]);
    let outcome = diff(Some(&prev), &curr, &seeded, 20);

    assert!(outcome.direction.is_empty());
    assert!(outcome.top_gainer.is_none());
    assert_eq!(outcome.history, seeded);
}

#[test]
fn disappeared_ticker_keeps_its_history() {
    let first = snapshot(&[("BTC", "100"), ("ETH", "10")]);
    let mut history = diff(None, &first, &RollingHistory::new(), 20).history;

    let second = snapshot(&[("BTC", "105")]);
    history = diff(Some(&first), &second, &history, 20).history;

    assert_eq!(
        history.series("ETH").unwrap().iter().copied().collect::<Vec<_>>(),
        vec![dec!(10)]
    );
    assert_eq!(history.series("BTC").unwrap().len(), 2);
}
