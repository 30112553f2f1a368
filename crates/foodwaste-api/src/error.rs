use thiserror::Error;

/// Errors returned by the food-waste API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("could not reach the food-waste API: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered 429, usually spike protection or an exhausted daily quota.
    #[error("rate limited by the food-waste API{}", retry_hint(.retry_after_secs))]
    RateLimited { retry_after_secs: Option<u64> },

    /// Any other non-2xx status.
    #[error("food-waste API returned HTTP {status} for {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// The response body is not JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response is JSON but not a store object or a list of them.
    #[error("unexpected payload shape: {0}")]
    Payload(String),

    #[error("API token must not be empty")]
    EmptyToken,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

fn retry_hint(retry_after_secs: &Option<u64>) -> String {
    match retry_after_secs {
        Some(secs) => format!(" (retry after {secs}s)"),
        None => String::new(),
    }
}
