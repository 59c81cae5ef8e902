//! Persistence tests for the favorites/holdings store.

use ratewatch::store::Store;
use rust_decimal_macros::dec;

#[test]
fn favorites_round_trip_across_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = Store::open(dir.path());
    assert!(!store.is_favorite("BTC"));
    assert!(store.toggle_favorite("BTC").unwrap());
    assert!(store.toggle_favorite("ETH").unwrap());
    assert!(!store.toggle_favorite("ETH").unwrap());

    let reopened = Store::open(dir.path());
    assert!(reopened.is_favorite("BTC"));
    assert!(!reopened.is_favorite("ETH"));
    assert_eq!(reopened.favorites().len(), 1);
}

#[test]
fn holdings_round_trip_across_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = Store::open(dir.path());
    store.set_holding("BTC", dec!(0.5)).unwrap();
    store.set_holding("ETH", dec!(12)).unwrap();
    store.set_holding("BTC", dec!(0.75)).unwrap();

    let reopened = Store::open(dir.path());
    assert_eq!(reopened.holding("BTC"), Some(dec!(0.75)));
    assert_eq!(reopened.holding("ETH"), Some(dec!(12)));
}

#[test]
fn zero_quantity_removes_the_holding() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = Store::open(dir.path());
    store.set_holding("DOGE", dec!(1000)).unwrap();
    store.set_holding("DOGE", dec!(0)).unwrap();
    assert_eq!(store.holding("DOGE"), None);

    let reopened = Store::open(dir.path());
    assert_eq!(reopened.holding("DOGE"), None);
    assert!(reopened.holdings().is_empty());
}

#[test]
fn corrupt_files_degrade_to_empty_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("favorites.json"), "not json{{").unwrap();
    std::fs::write(dir.path().join("holdings.json"), "[1, 2, 3]").unwrap();

    let store = Store::open(dir.path());
    assert!(store.favorites().is_empty());
    assert!(store.holdings().is_empty());
}

#[test]
fn missing_directory_is_not_fatal_to_reads() {
    let store = Store::open("/definitely/not/a/real/dir");
    assert!(store.favorites().is_empty());
    assert!(store.holdings().is_empty());
}
