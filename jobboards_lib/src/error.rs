//! Error types for the library layer.

use std::path::PathBuf;

/// Errors produced by the library layer.
///
/// Extraction never produces one of these: selector misses fall back to
/// empty strings. Errors only come from configuration, unusable targets, and
/// detail pages that could not be fetched.
#[derive(thiserror::Error, Debug)]
pub enum JobsError {
    /// A settings or input file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A settings or input file is not the expected JSON object.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The domain does not produce a usable base URL.
    #[error("invalid target domain: {0}")]
    InvalidTarget(String),
    /// A job detail page could not be fetched or parsed.
    #[error("detail page {url} unavailable (status {status})")]
    DetailUnavailable { url: String, status: u16 },
}
