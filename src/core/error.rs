//! Failure modes of the price loader.

use thiserror::Error;

/// Raised when the price list cannot be obtained. The converter stays
/// unusable until a later load succeeds.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The request never produced a response (DNS, connect, body read).
    #[error("Request error: {source} for URL: {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP error: {status} for URL: {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The body was not a JSON array of quotes.
    #[error("Failed to parse price list from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
