//! Outbound GET with an attempt budget and escalating timeouts.
//!
//! [`HttpFetcher::fetch_json`] is the single primitive every provider client
//! goes through. The attempt schedule with the default [`RetryPolicy`]:
//!
//! | Attempt | Timeout | On 429          | On other non-200 | On transport error / bad JSON |
//! |---------|---------|-----------------|------------------|-------------------------------|
//! | 1       | 8 s     | sleep 1 s, retry | retry           | sleep 500 ms, retry           |
//! | 2       | 15 s    | sleep 1 s, retry | retry           | sleep 500 ms, retry           |
//! | 3       | 15 s    | give up         | give up          | return the error              |
//!
//! Running out of attempts on status codes alone is `Ok(None)`, not an error.

use std::time::Duration;

use reqwest::{header::HeaderMap, Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::UpstreamError;

/// Timeout and backoff settings for [`HttpFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub first_timeout: Duration,
    pub retry_timeout: Duration,
    /// Sleep after an HTTP 429.
    pub rate_limit_backoff: Duration,
    /// Sleep after a timeout, connection error or unparseable body.
    pub transport_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            first_timeout: Duration::from_secs(8),
            retry_timeout: Duration::from_secs(15),
            rate_limit_backoff: Duration::from_secs(1),
            transport_backoff: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Builds the policy from application config, keeping the default backoffs.
    #[must_use]
    pub fn from_config(config: &saportal_core::AppConfig) -> Self {
        Self {
            max_retries: config.upstream_max_retries,
            first_timeout: Duration::from_secs(config.upstream_first_timeout_secs),
            retry_timeout: Duration::from_secs(config.upstream_retry_timeout_secs),
            ..Self::default()
        }
    }

    /// Total attempts including the first.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Per-attempt timeout; `attempt` is zero-based.
    #[must_use]
    pub fn timeout_for(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            self.first_timeout
        } else {
            self.retry_timeout
        }
    }
}

/// Shared HTTP client plus the retry policy applied to every request.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    policy: RetryPolicy,
}

impl HttpFetcher {
    /// Creates a fetcher with the given `User-Agent` and policy.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(user_agent: &str, policy: RetryPolicy) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, policy })
    }

    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// GETs `url` and parses a 200 body as JSON, retrying per the policy.
    ///
    /// Returns `Ok(None)` when every attempt ended in a non-200 status.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Http`] if the final attempt failed at the transport
    ///   level (timeout, connection refused, body read failure).
    /// - [`UpstreamError::Deserialize`] if the final attempt returned 200 with
    ///   a body that is not JSON.
    pub async fn fetch_json(
        &self,
        url: &Url,
        headers: &HeaderMap,
    ) -> Result<Option<serde_json::Value>, UpstreamError> {
        let attempts = self.policy.attempts();
        let endpoint = redacted(url);

        for attempt in 0..attempts {
            let is_last = attempt + 1 == attempts;
            let timeout = self.policy.timeout_for(attempt);

            let failure = match self.attempt(url, headers, timeout).await {
                Attempt::Body(value) => return Ok(Some(value)),
                Attempt::Status(status) if status == StatusCode::TOO_MANY_REQUESTS => {
                    tracing::warn!(%endpoint, attempt, "upstream rate limited");
                    if !is_last {
                        tokio::time::sleep(self.policy.rate_limit_backoff).await;
                    }
                    continue;
                }
                Attempt::Status(status) => {
                    tracing::error!(%endpoint, attempt, status = status.as_u16(), "upstream API error");
                    continue;
                }
                Attempt::Failed(err) => err,
            };

            if is_last {
                return Err(failure);
            }
            tracing::warn!(
                %endpoint,
                attempt,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                error = %failure,
                "upstream request failed; retrying after backoff"
            );
            tokio::time::sleep(self.policy.transport_backoff).await;
        }

        tracing::warn!(%endpoint, attempts, "upstream attempts exhausted without a 200");
        Ok(None)
    }

    /// [`fetch_json`](Self::fetch_json) followed by deserialization into `T`.
    /// Exhaustion becomes [`UpstreamError::Exhausted`].
    ///
    /// # Errors
    ///
    /// Everything `fetch_json` returns, plus [`UpstreamError::Exhausted`] and
    /// [`UpstreamError::Deserialize`] when the JSON does not match `T`.
    pub async fn fetch_as<T: DeserializeOwned>(
        &self,
        provider: &'static str,
        url: &Url,
        headers: &HeaderMap,
    ) -> Result<T, UpstreamError> {
        let body = self
            .fetch_json(url, headers)
            .await?
            .ok_or(UpstreamError::Exhausted {
                provider,
                attempts: self.policy.attempts(),
            })?;
        serde_json::from_value(body).map_err(|e| UpstreamError::Deserialize {
            context: format!("{provider} {}", url.path()),
            source: e,
        })
    }

    async fn attempt(&self, url: &Url, headers: &HeaderMap, timeout: Duration) -> Attempt {
        let response = match self
            .client
            .get(url.clone())
            .headers(headers.clone())
            .timeout(timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Attempt::Failed(e.without_url().into()),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return Attempt::Status(status);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return Attempt::Failed(e.without_url().into()),
        };
        match serde_json::from_str(&body) {
            Ok(value) => Attempt::Body(value),
            Err(e) => Attempt::Failed(UpstreamError::Deserialize {
                context: redacted(url),
                source: e,
            }),
        }
    }
}

enum Attempt {
    Body(serde_json::Value),
    Status(StatusCode),
    Failed(UpstreamError),
}

/// Host and path only; query strings carry API keys.
fn redacted(url: &Url) -> String {
    format!("{}{}", url.host_str().unwrap_or_default(), url.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_allows_three_attempts() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.attempts(), 3);
    }

    #[test]
    fn timeout_escalates_after_first_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.timeout_for(0), Duration::from_secs(8));
        assert_eq!(policy.timeout_for(1), Duration::from_secs(15));
        assert_eq!(policy.timeout_for(2), Duration::from_secs(15));
    }

    #[test]
    fn default_backoffs_are_fixed() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.rate_limit_backoff, Duration::from_secs(1));
        assert_eq!(policy.transport_backoff, Duration::from_millis(500));
    }

    #[test]
    fn config_keeps_default_backoffs() {
        let config = saportal_core::AppConfig {
            env: saportal_core::Environment::Test,
            bind_addr: "127.0.0.1:0".parse().expect("socket addr"),
            log_level: "info".to_string(),
            openweather_api_key: None,
            google_maps_api_key: None,
            football_data_api_key: None,
            weather_base_url: "http://127.0.0.1/".to_string(),
            geocode_base_url: "http://127.0.0.1/".to_string(),
            football_base_url: "http://127.0.0.1/".to_string(),
            upstream_max_retries: 4,
            upstream_first_timeout_secs: 3,
            upstream_retry_timeout_secs: 6,
            user_agent: "saportal-test".to_string(),
        };
        let policy = RetryPolicy::from_config(&config);
        assert_eq!(policy.attempts(), 5);
        assert_eq!(policy.timeout_for(0), Duration::from_secs(3));
        assert_eq!(policy.timeout_for(1), Duration::from_secs(6));
        assert_eq!(policy.rate_limit_backoff, Duration::from_secs(1));
        assert_eq!(policy.transport_backoff, Duration::from_millis(500));
    }

    #[test]
    fn attempts_saturate_instead_of_overflowing() {
        let policy = RetryPolicy {
            max_retries: u32::MAX,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.attempts(), u32::MAX);
    }

    #[test]
    fn redacted_drops_query_string() {
        let url = Url::parse("https://api.example.com/data/2.5/weather?appid=secret&lat=1")
            .expect("valid url");
        assert_eq!(redacted(&url), "api.example.com/data/2.5/weather");
    }
}
