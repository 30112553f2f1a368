//! HTTP client for the food-waste REST API.
//!
//! Wraps `reqwest` with bearer-token authentication, an explicit request
//! timeout, and typed errors for transport failures and non-2xx statuses.
//!
//! Every request, successful or not, consumes one unit of the upstream daily
//! quota (10,000 requests, reset at UTC midnight), so nothing here retries.
//! The API also caps responses at 20 stores; that cap is not re-checked.

use std::time::Duration;

use foodwaste_core::{AppConfig, SearchQuery, SearchRequest, Store};
use reqwest::{Client, StatusCode, Url};

use crate::error::ApiError;
use crate::normalize::normalize_payload;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Client for the food-waste API.
///
/// Use [`FoodWasteClient::from_config`] in the binary or
/// [`FoodWasteClient::with_base_url`] to point at a mock server in tests.
pub struct FoodWasteClient {
    client: Client,
    api_token: String,
    base_url: Url,
}

impl FoodWasteClient {
    /// Creates a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// See [`FoodWasteClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::with_base_url(
            &config.api_token,
            config.request_timeout_secs,
            &config.user_agent,
            &config.api_base_url,
        )
    }

    /// Creates a client against an explicit base URL.
    ///
    /// # Errors
    ///
    /// - [`ApiError::EmptyToken`] if `api_token` is blank.
    /// - [`ApiError::InvalidBaseUrl`] if `base_url` is not an absolute
    ///   http(s) URL.
    /// - [`ApiError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn with_base_url(
        api_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ApiError> {
        if api_token.trim().is_empty() {
            return Err(ApiError::EmptyToken);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS.min(timeout_secs)))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so store IDs land below the base path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "expected an absolute http(s) URL".to_string(),
            });
        }

        Ok(Self {
            client,
            api_token: api_token.trim().to_owned(),
            base_url: parsed,
        })
    }

    /// Runs a search and returns the normalized stores in API order.
    ///
    /// # Errors
    ///
    /// Propagates [`FoodWasteClient::fetch_raw`] errors and
    /// [`ApiError::Payload`] from normalization.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<Store>, ApiError> {
        let payload = self.fetch_raw(request).await?;
        normalize_payload(payload)
    }

    /// Sends the single GET request for `request` and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or timeout.
    /// - [`ApiError::RateLimited`] on HTTP 429.
    /// - [`ApiError::Status`] on any other non-2xx status.
    /// - [`ApiError::Deserialize`] if the body is not valid JSON.
    pub async fn fetch_raw(&self, request: &SearchRequest) -> Result<serde_json::Value, ApiError> {
        let url = self.build_url(&request.to_query());
        tracing::info!(mode = request.mode(), path = url.path(), "querying food-waste API");

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.api_token)
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok());
            return Err(ApiError::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body: truncate(body.trim(), MAX_ERROR_BODY_CHARS),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Builds the request URL: the base URL, plus the store ID as a path
    /// segment, plus percent-encoded query parameters.
    pub(crate) fn build_url(&self, query: &SearchQuery) -> Url {
        let mut url = self.base_url.clone();
        if let Some(segment) = &query.path_segment {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().push(segment);
            }
        }
        if !query.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in &query.params {
                pairs.append_pair(k, v);
            }
        }
        url
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> FoodWasteClient {
        FoodWasteClient::with_base_url("test-token", 30, "foodwaste-test", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_for_zip() {
        let client = test_client("https://api.sallinggroup.com/v1/food-waste");
        let request = SearchRequest::zip("8000").unwrap();
        let url = client.build_url(&request.to_query());
        assert_eq!(
            url.as_str(),
            "https://api.sallinggroup.com/v1/food-waste/?zip=8000"
        );
    }

    #[test]
    fn build_url_for_coordinates_encodes_comma() {
        let client = test_client("https://api.sallinggroup.com/v1/food-waste/");
        let request = SearchRequest::coordinates(56.15, 10.2, None).unwrap();
        let url = client.build_url(&request.to_query());
        assert_eq!(
            url.as_str(),
            "https://api.sallinggroup.com/v1/food-waste/?geo=56.15%2C10.2&radius=5"
        );
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("geo".to_string(), "56.15,10.2".to_string()),
                ("radius".to_string(), "5".to_string())
            ]
        );
    }

    #[test]
    fn build_url_for_store_id_has_no_query() {
        let client = test_client("https://api.sallinggroup.com/v1/food-waste/");
        let request = SearchRequest::store_id("efba0457-090e-4132-81ba-c5b8ecb6cb98").unwrap();
        let url = client.build_url(&request.to_query());
        assert_eq!(
            url.as_str(),
            "https://api.sallinggroup.com/v1/food-waste/efba0457-090e-4132-81ba-c5b8ecb6cb98"
        );
        assert!(url.query().is_none());
    }

    #[test]
    fn empty_token_is_rejected() {
        let result = FoodWasteClient::with_base_url("  ", 30, "ua", "https://example.com");
        assert!(matches!(result, Err(ApiError::EmptyToken)));
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let result = FoodWasteClient::with_base_url("t", 30, "ua", "/v1/food-waste");
        assert!(matches!(result, Err(ApiError::InvalidBaseUrl { .. })));
        let result = FoodWasteClient::with_base_url("t", 30, "ua", "ftp://example.com/x");
        assert!(matches!(result, Err(ApiError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn truncate_limits_characters() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("æøåæø", 3), "æøå…");
    }
}
