//! Crate-level error types.
//!
//! [`RatewatchError`] unifies every failure source (configuration, HTTP,
//! JSON, price parsing, persistence) behind a single enum so callers can
//! match on the variant they care about while still using the `?` operator
//! for easy propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RatewatchError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum RatewatchError {
    /// An environment variable held an invalid or inconsistent value.
    #[error("configuration error: {0}")]
    Config(String),

    /// An HTTP request failed (connect, timeout, or non-2xx status).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A rate value in the upstream payload was not a valid decimal.
    ///
    /// Callers treat this like a failed fetch: skip the cycle and keep
    /// the previous snapshot.
    #[error("unparseable rate for {ticker}: {value:?}")]
    Parse { ticker: String, value: String },

    /// Reading or writing the favorites/holdings files failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Terminal setup or teardown failed.
    #[error("io error: {0}")]
    Io(String),
}
