//! Error types for the sync pipeline.
//!
//! The taxonomy mirrors the failure modes of the pipeline stages:
//! - [`SyncError::Network`] — transport or HTTP-status failure. Fatal at the
//!   feed stage, recoverable (per-item fallback) at the article stage.
//! - [`SyncError::Format`] — the feed document does not have the expected
//!   channel/item structure. Always fatal.
//! - [`SyncError::ContentNotFound`] — no candidate selector matched an
//!   article page. Recoverable; the item degrades to feed-description data.
//!
//! Counter extraction has no error variant on purpose: each counter
//! independently defaults to 0 when its UI node is missing or unparsable.

use thiserror::Error;

/// Errors produced by the sync pipeline.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected feed structure: {0}")]
    Format(String),

    #[error("no article content found at {0}")]
    ContentNotFound(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
