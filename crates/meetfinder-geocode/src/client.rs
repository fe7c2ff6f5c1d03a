//! HTTP client for the postcodes.io lookup endpoint.
//!
//! One `GET {base}/postcodes/{postcode}` per call, single attempt, bounded
//! timeout. Every non-success outcome is surfaced as a typed
//! [`GeocodeError`]; callers that only care about success collapse it.

use std::time::Duration;

use meetfinder_core::{AppConfig, Coordinate};
use reqwest::{Client, StatusCode, Url};

use crate::error::GeocodeError;
use crate::lookup::PostcodeLookup;
use crate::types::PostcodeEnvelope;

const DEFAULT_BASE_URL: &str = "https://api.postcodes.io/";

/// Client for a postcodes.io-compatible lookup service.
///
/// Use [`PostcodesClient::new`] for the public service or
/// [`PostcodesClient::with_base_url`] to point at a mock server in tests.
pub struct PostcodesClient {
    client: Client,
    base_url: Url,
}

impl PostcodesClient {
    /// Creates a client pointed at the public postcodes.io API.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, GeocodeError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent)
    }

    /// Creates a client from the application config.
    ///
    /// # Errors
    ///
    /// Same as [`PostcodesClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, GeocodeError> {
        Self::with_base_url(
            &config.postcodes_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` does not parse as a hierarchical URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(GeocodeError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Builds `{base}/postcodes/{postcode}` with the postcode percent-encoded
    /// as a single path segment.
    fn postcode_url(&self, postcode: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("postcodes").push(postcode);
        }
        url
    }

    /// Looks up one postcode and returns its coordinate.
    ///
    /// `postcode` is sent as given; normalization is the resolver's job.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::NotFound`] on HTTP 404.
    /// - [`GeocodeError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`GeocodeError::Http`] on network failure or timeout.
    /// - [`GeocodeError::Deserialize`] if the body is not the expected JSON.
    /// - [`GeocodeError::ApiStatus`] if the body's `status` is not 200.
    /// - [`GeocodeError::InvalidPayload`] if the result or its coordinates
    ///   are missing, null, or out of range.
    pub async fn fetch_coordinate(&self, postcode: &str) -> Result<Coordinate, GeocodeError> {
        let url = self.postcode_url(postcode);
        tracing::debug!(%url, "looking up postcode");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(GeocodeError::NotFound {
                postcode: postcode.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
                postcode: postcode.to_owned(),
            });
        }

        let body = response.text().await?;
        let envelope: PostcodeEnvelope =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("postcode lookup({postcode})"),
                source: e,
            })?;

        if envelope.status != 200 {
            return Err(GeocodeError::ApiStatus {
                status: envelope.status,
                postcode: postcode.to_owned(),
            });
        }

        let invalid = |reason: &str| GeocodeError::InvalidPayload {
            postcode: postcode.to_owned(),
            reason: reason.to_owned(),
        };

        let result = envelope.result.ok_or_else(|| invalid("result is null"))?;
        let (Some(latitude), Some(longitude)) = (result.latitude, result.longitude) else {
            return Err(invalid("latitude or longitude missing"));
        };

        Coordinate::new(latitude, longitude).ok_or_else(|| invalid("coordinates out of range"))
    }
}

impl PostcodeLookup for PostcodesClient {
    async fn lookup(&self, postcode: &str) -> Result<Coordinate, GeocodeError> {
        self.fetch_coordinate(postcode).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> PostcodesClient {
        PostcodesClient::with_base_url(base_url, 5, "meetfinder-test/0.1")
            .expect("client construction should not fail")
    }

    #[test]
    fn postcode_url_appends_segments() {
        let client = test_client("https://api.postcodes.io");
        assert_eq!(
            client.postcode_url("SW1A1AA").as_str(),
            "https://api.postcodes.io/postcodes/SW1A1AA"
        );
    }

    #[test]
    fn postcode_url_keeps_base_path_and_strips_trailing_slash() {
        let client = test_client("http://localhost:8080/geo/");
        assert_eq!(
            client.postcode_url("M11AE").as_str(),
            "http://localhost:8080/geo/postcodes/M11AE"
        );
    }

    #[test]
    fn postcode_url_encodes_path_separators() {
        let client = test_client("https://api.postcodes.io");
        let url = client.postcode_url("AB/1?");
        assert_eq!(url.path(), "/postcodes/AB%2F1%3F");
        assert!(url.query().is_none());
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = PostcodesClient::with_base_url("not a url", 5, "ua");
        assert!(matches!(result, Err(GeocodeError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn rejects_cannot_be_a_base_url() {
        let result = PostcodesClient::with_base_url("mailto:someone@example.com", 5, "ua");
        assert!(matches!(result, Err(GeocodeError::InvalidBaseUrl { .. })));
    }
}
