use thiserror::Error;

/// Errors returned by the upstream provider clients.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    /// URLs are stripped before the error is stored so API keys carried in
    /// query strings never reach logs.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Every attempt got a non-200 status.
    #[error("{provider} returned no usable response after {attempts} attempts")]
    Exhausted {
        provider: &'static str,
        attempts: u32,
    },

    /// No API key is configured for the provider, so no request was sent.
    #[error("{0} API key is not configured")]
    MissingApiKey(&'static str),

    /// The provider answered 200 but reported a failure in the body.
    #[error("{provider} API error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    /// A field the normalizer cannot default was absent.
    #[error("{provider} response is missing {field}")]
    MissingField {
        provider: &'static str,
        field: &'static str,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
