//! Error types for the registry compiler.
//!
//! Malformed registry lines and absent fields are never errors (the
//! parser skips or records absence); only genuinely fatal conditions
//! surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the registry and ISO 639-3 pipelines
#[derive(Debug, Error)]
pub enum RegistryError {
    /// I/O failure reading or writing a source document or output file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Source document download failure, surfaced unmodified
    #[error("failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// Offline mode was requested but no cached copy of the document exists
    #[error("offline mode and no cached copy at {0}")]
    CacheMiss(PathBuf),

    /// A preferred-value record classified to a type outside the five
    /// recognized construction kinds. This means the upstream registry
    /// format changed in a way the classification rules do not
    /// anticipate; it must abort the pipeline rather than be defaulted.
    #[error("unknown preferred-value construction type `{kind}` for `{value}`")]
    UnknownConstructionKind { kind: String, value: String },

    /// Catch-all for context-specific failures
    #[error("{0}")]
    Other(String),
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, RegistryError>;
