//! Application configuration loaded from environment variables.
//!
//! Everything has a sensible default; the variables below override it:
//! - `RATEWATCH_ENDPOINT` — base URL of the exchange-rates API
//! - `RATEWATCH_CURRENCY` — reference currency the rates are quoted in
//! - `RATEWATCH_POLL_INTERVAL_SECS` — seconds between polls
//! - `RATEWATCH_FETCH_TIMEOUT_SECS` — per-request HTTP timeout
//! - `RATEWATCH_HISTORY_WINDOW` — points of price history kept per ticker
//! - `RATEWATCH_LOCALE` — display language (`en`, `de`, `es`)
//! - `RATEWATCH_DATA_DIR` — directory holding favorites/holdings files

use std::path::PathBuf;
use std::time::Duration;

/// Default public exchange-rates endpoint.
const DEFAULT_ENDPOINT: &str = "https://api.coinbase.com";

/// Default reference currency.
const DEFAULT_CURRENCY: &str = "EUR";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 6;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_HISTORY_WINDOW: usize = 20;
const DEFAULT_LOCALE: &str = "en";

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub poll: PollConfig,
    /// Display language for the UI.
    pub locale: String,
    /// Directory holding the favorites and holdings files.
    pub data_dir: PathBuf,
}

/// Exchange-rates API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub endpoint: String,
    pub currency: String,
    pub timeout: Duration,
}

/// Polling-loop configuration.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Base delay between polls.
    pub interval: Duration,
    /// Maximum number of history points kept per ticker.
    pub history_window: usize,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`RatewatchError::Config`](crate::RatewatchError::Config) if a
/// numeric variable does not parse or is zero.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let endpoint = non_empty_var("RATEWATCH_ENDPOINT")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let currency = non_empty_var("RATEWATCH_CURRENCY")
        .map(|c| c.to_uppercase())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    let interval_secs = positive_u64_var("RATEWATCH_POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?;
    let timeout_secs = positive_u64_var("RATEWATCH_FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS)?;
    let history_window = positive_u64_var("RATEWATCH_HISTORY_WINDOW", DEFAULT_HISTORY_WINDOW as u64)? as usize;

    let locale = non_empty_var("RATEWATCH_LOCALE").unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    let data_dir = non_empty_var("RATEWATCH_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(AppConfig {
        api: ApiConfig {
            endpoint,
            currency,
            timeout: Duration::from_secs(timeout_secs),
        },
        poll: PollConfig {
            interval: Duration::from_secs(interval_secs),
            history_window,
        },
        locale,
        data_dir,
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Parses a numeric environment variable, rejecting zero and garbage.
fn positive_u64_var(name: &str, default: u64) -> crate::Result<u64> {
    let Some(raw) = non_empty_var(name) else {
        return Ok(default);
    };
    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        Ok(_) => Err(crate::RatewatchError::Config(format!(
            "{name} must be greater than zero"
        ))),
        Err(_) => Err(crate::RatewatchError::Config(format!(
            "{name} is not a valid integer: {raw:?}"
        ))),
    }
}
