//! Shared test utilities.

use std::collections::BTreeMap;

use ratewatch::models::{RateSnapshot, RatesDocument};

/// Builds a parsed snapshot from ticker/price string pairs.
pub fn snapshot(pairs: &[(&str, &str)]) -> RateSnapshot {
    let rates: BTreeMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    RateSnapshot::parse(RatesDocument {
        currency: "EUR".to_string(),
        rates,
    })
    .expect("test snapshot must parse")
}
