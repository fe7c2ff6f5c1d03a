use thiserror::Error;

/// Errors returned by a single postcode lookup.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("postcode not found: {postcode}")]
    NotFound { postcode: String },

    #[error("unexpected HTTP status {status} looking up {postcode}")]
    UnexpectedStatus { status: u16, postcode: String },

    /// The body's own `status` field reported a failure.
    #[error("lookup service returned status {status} for {postcode}")]
    ApiStatus { status: u16, postcode: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed payload for {postcode}: {reason}")]
    InvalidPayload { postcode: String, reason: String },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Coordinate resolution failed. The cause is logged, not carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("postcode could not be resolved to coordinates")]
pub struct LookupFailure;
