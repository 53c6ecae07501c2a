//! Error types for the inventory pipeline.
//!
//! Only [`InventoryError`] ever reaches the caller. [`ScanError`] and
//! [`ProbeError`] describe per-extension failures that are absorbed into
//! the affected record.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration errors. Raised before any extension is processed.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Extensions path not found under {profile:?} (tried Extensions and Default/Extensions)")]
    ExtensionsRootNotFound { profile: PathBuf },

    #[error("Failed to read extensions directory {path:?}")]
    ReadExtensionsRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure while resolving one extension's on-disk data.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A probe that produced no conclusive answer.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("store request timed out")]
    Timeout,

    #[error("store request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected store response status {0}")]
    UnexpectedStatus(u16),

    #[error("store redirected to a non-listing location: {0:?}")]
    RedirectMismatch(Option<String>),

    #[error("availability check skipped")]
    Skipped,
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout
        } else {
            ProbeError::Transport(err)
        }
    }
}
