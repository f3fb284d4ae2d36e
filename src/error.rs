//! Crate-level error types.
//!
//! [`TrackerError`] unifies every error source (configuration, HTTP, JSON,
//! terminal) behind a single enum so callers can match on the variant they
//! care about while still using the `?` operator for easy propagation.
//!
//! Remote failures inside the directory and the sync engine never reach the
//! caller as `Err`; they are logged and replaced with fallback data. The
//! variants below surface only from the raw client, configuration, and the
//! session's selection checks.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// An environment variable or CLI value was missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// An HTTP request failed or returned a non-success status.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The remote service answered with a payload of the wrong shape.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A terminal or file I/O operation failed.
    #[error("io error: {0}")]
    Io(String),

    /// The selected exhibitor is not part of the current directory.
    #[error("unknown exhibitor: {0}")]
    UnknownExhibitor(String),
}
