//! Shared models for the exchange-rates API.
//!
//! Contains the wire-format response types and the parsed
//! [`RateSnapshot`] the rest of the crate operates on.

pub mod rates;

pub use rates::{ExchangeRatesResponse, RateSnapshot, RatesDocument};
