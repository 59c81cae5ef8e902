//! Thin fetch wrapper over the public exchange-rates endpoint.
//!
//! One GET per poll; no retries here. Scheduling, backoff, and recovery
//! live in the [`poller`](crate::poller).

use std::time::Duration;

use tracing::debug;

use crate::config::ApiConfig;
use crate::models::{ExchangeRatesResponse, RatesDocument};

/// HTTP client bound to one endpoint and reference currency.
#[derive(Debug, Clone)]
pub struct RatesClient {
    http: reqwest::Client,
    endpoint: String,
    currency: String,
}

impl RatesClient {
    /// Builds a client with the configured per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RatewatchError::Http`](crate::RatewatchError::Http) if the
    /// underlying TLS/connector setup fails.
    pub fn new(config: &ApiConfig) -> crate::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            currency: config.currency.clone(),
        })
    }

    /// Fetches the current rates document.
    ///
    /// # Errors
    ///
    /// Returns [`RatewatchError::Http`](crate::RatewatchError::Http) on
    /// connect/timeout failures and non-2xx responses, or
    /// [`RatewatchError::Json`](crate::RatewatchError::Json) if the body
    /// does not match the documented shape.
    pub async fn fetch(&self) -> crate::Result<RatesDocument> {
        let url = format!("{}/v2/exchange-rates", self.endpoint);
        let response = self
            .http
            .get(&url)
            .query(&[("currency", self.currency.as_str())])
            .send()
            .await?;

        let response = response.error_for_status()?;
        let body: ExchangeRatesResponse = response.json().await?;
        debug!(
            currency = %body.data.currency,
            tickers = body.data.rates.len(),
            "fetched exchange rates"
        );
        Ok(body.data)
    }
}
