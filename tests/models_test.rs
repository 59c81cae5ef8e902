//! Deserialization and snapshot-parsing tests for the wire models.

use ratewatch::RatewatchError;
use ratewatch::models::{ExchangeRatesResponse, RateSnapshot};
use rust_decimal_macros::dec;

const RATES_JSON: &str = include_str!("fixtures/exchange_rates.json");
const MALFORMED_JSON: &str = include_str!("fixtures/exchange_rates_malformed.json");

#[test]
fn deserialize_exchange_rates_response() {
    let response: ExchangeRatesResponse =
        serde_json::from_str(RATES_JSON).expect("failed to deserialize rates response");

    assert_eq!(response.data.currency, "EUR");
    assert_eq!(response.data.rates.len(), 5);
    assert_eq!(response.data.rates["BTC"], "58432.11");
}

#[test]
fn snapshot_parses_every_price() {
    let response: ExchangeRatesResponse = serde_json::from_str(RATES_JSON).unwrap();
    let snapshot = RateSnapshot::parse(response.data).expect("prices should parse");

    assert_eq!(snapshot.currency(), "EUR");
    assert_eq!(snapshot.len(), 5);
    assert_eq!(snapshot.get("BTC"), Some(dec!(58432.11)));
    assert_eq!(snapshot.get("SHIB"), Some(dec!(0.000021)));
    assert_eq!(snapshot.get("XRP"), None);
}

#[test]
fn snapshot_iterates_in_sorted_ticker_order() {
    let response: ExchangeRatesResponse = serde_json::from_str(RATES_JSON).unwrap();
    let snapshot = RateSnapshot::parse(response.data).unwrap();

    let tickers: Vec<_> = snapshot.tickers().collect();
    assert_eq!(tickers, vec!["ADA", "BTC", "DOGE", "ETH", "SHIB"]);
}

#[test]
fn malformed_price_names_the_offending_ticker() {
    let response: ExchangeRatesResponse = serde_json::from_str(MALFORMED_JSON).unwrap();
    let err = RateSnapshot::parse(response.data).unwrap_err();

    match err {
        RatewatchError::Parse { ticker, value } => {
            assert_eq!(ticker, "ETH");
            assert_eq!(value, "n/a");
        }
        other => panic!("expected parse error, got {other}"),
    }
}

#[test]
fn empty_rates_map_parses_to_empty_snapshot() {
    let response: ExchangeRatesResponse =
        serde_json::from_str(r#"{"data": {"currency": "EUR", "rates": {}}}"#).unwrap();
    let snapshot = RateSnapshot::parse(response.data).unwrap();

    assert!(snapshot.is_empty());
    assert_eq!(snapshot.len(), 0);
}

#[test]
fn prices_tolerate_surrounding_whitespace() {
    let response: ExchangeRatesResponse =
        serde_json::from_str(r#"{"data": {"currency": "EUR", "rates": {"BTC": " 100.5 "}}}"#)
            .unwrap();
    let snapshot = RateSnapshot::parse(response.data).unwrap();

    assert_eq!(snapshot.get("BTC"), Some(dec!(100.5)));
}
