//! Exchange-rate response models and the parsed snapshot.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Envelope of the `GET /v2/exchange-rates` response.
#[derive(Debug, Deserialize)]
pub struct ExchangeRatesResponse {
    pub data: RatesDocument,
}

/// Payload of one poll: the reference currency and a ticker → price map.
///
/// Prices arrive as strings and are only parsed when the document is
/// promoted to a [`RateSnapshot`].
#[derive(Debug, Deserialize)]
pub struct RatesDocument {
    pub currency: String,
    pub rates: BTreeMap<String, String>,
}

/// One complete poll result with prices parsed to [`Decimal`].
///
/// Immutable once built. Tickers iterate in sorted order, which makes
/// downstream tie-breaks deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RateSnapshot {
    currency: String,
    rates: BTreeMap<String, Decimal>,
}

impl RateSnapshot {
    /// Parses a wire document into a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RatewatchError::Parse`](crate::RatewatchError::Parse)
    /// naming the offending ticker if any price string is not a valid
    /// decimal. A malformed payload fails whole; no partial snapshot is
    /// produced.
    pub fn parse(document: RatesDocument) -> crate::Result<Self> {
        let mut rates = BTreeMap::new();
        for (ticker, raw) in document.rates {
            let price = Decimal::from_str(raw.trim()).map_err(|_| {
                crate::RatewatchError::Parse {
                    ticker: ticker.clone(),
                    value: raw.clone(),
                }
            })?;
            rates.insert(ticker, price);
        }
        Ok(Self {
            currency: document.currency,
            rates,
        })
    }

    /// The reference currency the prices are quoted in.
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Price for a ticker, if present in this snapshot.
    pub fn get(&self, ticker: &str) -> Option<Decimal> {
        self.rates.get(ticker).copied()
    }

    /// Iterates tickers and prices in sorted ticker order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.rates.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Tickers in sorted order.
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
