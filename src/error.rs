//! Crate-level error types.
//!
//! [`TradedeckError`] unifies every error source (configuration, action
//! decoding) behind a single enum so callers can match on the variant
//! they care about while still using the `?` operator for propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TradedeckError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum TradedeckError {
    /// A configuration value could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading from a file or stream failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
