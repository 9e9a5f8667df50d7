//! Firecrawl client error types.

use thiserror::Error;

/// Errors raised while talking to the Firecrawl API.
///
/// A response that parses but reports `success: false` is not an error at
/// this level; it is returned as a result record and judged by the tools.
#[derive(Debug, Error)]
pub enum FirecrawlError {
    /// The HTTP client could not be built.
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request never produced a response (connect, timeout, body read).
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with an error status and no JSON body.
    #[error("Firecrawl returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body exceeded the size limit.
    #[error("Response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// The body was not the JSON object we expected.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl FirecrawlError {
    /// Create an "invalid response" error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}
