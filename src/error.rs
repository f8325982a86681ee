//! Error types for mac-audit.
//!
//! Per-record problems (a single token that fails to normalize) are recovered
//! locally by the builders in `store` and `reconciler`, which skip and count
//! the offending record. The variants here cover everything that must abort
//! an operation and propagate to the caller.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MacAuditError {
    #[error("Malformed MAC address '{token}': {reason}")]
    Malformed { token: String, reason: &'static str },

    #[error("Duplicate snapshot date in aggregation input: {date}")]
    InconsistentSequence { date: chrono::NaiveDate },

    #[error("Failed to read {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex compilation error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Collector error: {0}")]
    Collector(String),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MacAuditError>;
