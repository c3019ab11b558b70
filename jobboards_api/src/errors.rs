//! Error types for the fetch layer.

/// Errors raised while setting up a [`crate::Fetcher`].
///
/// Fetching itself never fails; transport problems end up as sentinel
/// status codes on the returned page instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
    /// A proxy entry in the request configuration is not a usable URL.
    #[error("invalid proxy for {scheme}: {url}")]
    InvalidProxy { scheme: String, url: String },
    /// A cookie name or value cannot be sent as a header.
    #[error("invalid cookie header: {0}")]
    InvalidCookie(String),
}
