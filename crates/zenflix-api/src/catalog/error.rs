//! Catalog client error types.

use thiserror::Error;

/// Errors surfaced by catalog operations.
///
/// `Display` yields the human-readable message shown to the user: the API's
/// `status_message` when the error body carried one, else the transport text.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum CatalogError {
    /// Client configuration is incomplete.
    #[error("{0}")]
    Config(&'static str),

    /// A request URL could not be built.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// Network unreachable, relay failure, or body read failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// `status_message` from the error body, or a generic status line.
        message: String,
    },

    /// A 2xx body that does not match the expected schema.
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        /// Endpoint path that produced the body.
        endpoint: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Error returned when parsing a query parameter value from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value:?} (expected one of: {expected})")]
pub struct ParseParamError {
    /// Parameter kind (e.g. "media type").
    pub kind: &'static str,
    /// Rejected input.
    pub value: String,
    /// Accepted spellings.
    pub expected: &'static str,
}
