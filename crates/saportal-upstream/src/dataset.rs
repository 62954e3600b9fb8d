//! Cache-aside fetching and the degrade-to-default combinator shared by every
//! dataset.

use std::future::Future;
use std::time::Duration;

use saportal_core::{CurrentWeather, ForecastDay, HourlyForecast, Match, ResponseCache, StandingRow};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::UpstreamError;

/// A dataset plus whether it was served from the cache.
///
/// The flag is never stored: entries are written without it and only cache
/// hits report `cached: true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cached<T> {
    #[serde(flatten)]
    pub data: T,
    pub cached: bool,
}

impl<T> Cached<T> {
    #[must_use]
    pub fn fresh(data: T) -> Self {
        Self {
            data,
            cached: false,
        }
    }

    #[must_use]
    pub fn hit(data: T) -> Self {
        Self { data, cached: true }
    }
}

/// Returns the cached `T` under `key` if younger than `ttl`; otherwise runs
/// `fetch` and stores its result.
///
/// Failures are never cached. A value that cannot be serialized is still
/// returned, just not stored.
///
/// # Errors
///
/// Whatever `fetch` returns.
pub async fn cached_fetch<T, F, Fut>(
    cache: &ResponseCache,
    key: &str,
    ttl: Duration,
    fetch: F,
) -> Result<Cached<T>, UpstreamError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, UpstreamError>>,
{
    if let Some(hit) = cache.get_as::<T>(key, ttl) {
        tracing::debug!(key, "cache hit");
        return Ok(Cached::hit(hit));
    }

    let data = fetch().await?;
    if let Err(e) = cache.set_as(key, &data) {
        tracing::warn!(key, error = %e, "failed to cache dataset");
    }
    Ok(Cached::fresh(data))
}

/// Collapses a failed fetch into a well-formed default.
///
/// Read paths that must never surface an upstream failure route their result
/// through here; the error is logged and `fallback` supplies the payload.
pub fn degrade<T>(
    dataset: &'static str,
    result: Result<Cached<T>, UpstreamError>,
    fallback: impl FnOnce() -> T,
) -> Cached<T> {
    match result {
        Ok(data) => data,
        Err(e) => {
            tracing::error!(dataset, error = %e, "upstream unavailable; serving default");
            Cached::fresh(fallback())
        }
    }
}

/// A list of matches. Exactly one of `source`, `date` or `date_range` is set
/// depending on the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchListing {
    pub success: bool,
    pub matches: Vec<Match>,
    pub total: usize,
    pub last_updated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
}

impl MatchListing {
    #[must_use]
    pub fn new(matches: Vec<Match>, last_updated: String) -> Self {
        Self {
            success: true,
            total: matches.len(),
            matches,
            last_updated,
            source: None,
            date: None,
            date_range: None,
        }
    }

    /// An empty but successful listing.
    #[must_use]
    pub fn empty(last_updated: String) -> Self {
        Self::new(Vec::new(), last_updated)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsTable {
    pub success: bool,
    pub standings: Vec<StandingRow>,
    pub competition: String,
    /// Current matchday. Absent on the degraded table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<i64>,
    pub last_updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub success: bool,
    pub current: CurrentWeather,
    pub hourly: Vec<HourlyForecast>,
    pub forecast: Vec<ForecastDay>,
    pub last_updated: String,
}
