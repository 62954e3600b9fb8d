//! Google reverse geocoding with a day-long cache.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Url;
use saportal_core::{LocationResult, ResponseCache};

use crate::dataset::{cached_fetch, degrade};
use crate::endpoint::{build_url, parse_base_url, round_coordinate};
use crate::error::UpstreamError;
use crate::location::normalize_location;
use crate::retry::HttpFetcher;
use crate::types::GeocodeResponse;

pub const PROVIDER: &str = "Google Geocoding";
const TTL: Duration = Duration::from_secs(86_400);
const COORDINATE_PLACES: i32 = 4;
const RESULT_TYPES: &str = "street_address|route|locality|sublocality|neighborhood";

#[derive(Debug, Clone)]
pub struct GeocodeService {
    fetcher: HttpFetcher,
    base_url: Url,
    api_key: Option<String>,
}

impl GeocodeService {
    /// # Errors
    ///
    /// Returns [`UpstreamError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(
        fetcher: HttpFetcher,
        base_url: &str,
        api_key: Option<String>,
    ) -> Result<Self, UpstreamError> {
        Ok(Self {
            fetcher,
            base_url: parse_base_url(base_url)?,
            api_key,
        })
    }

    /// Names the coordinates, rounded to four decimals.
    ///
    /// Never fails: when the lookup is unavailable the result is the
    /// coordinate fallback with `success: false`, which is not cached.
    pub async fn reverse(
        &self,
        cache: &ResponseCache,
        latitude: f64,
        longitude: f64,
    ) -> LocationResult {
        let lat = round_coordinate(latitude, COORDINATE_PLACES);
        let lon = round_coordinate(longitude, COORDINATE_PLACES);
        let key = format!("reverse_{lat:.4}_{lon:.4}");

        let result = cached_fetch(cache, &key, TTL, move || self.lookup(lat, lon)).await;
        degrade("reverse_geocode", result, || LocationResult::from_coordinates(lat, lon)).data
    }

    async fn lookup(&self, lat: f64, lon: f64) -> Result<LocationResult, UpstreamError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingApiKey(PROVIDER))?;
        let latlng = format!("{lat:.4},{lon:.4}");
        let url = build_url(
            &self.base_url,
            "json",
            &[
                ("latlng", latlng.as_str()),
                ("key", api_key),
                ("region", "za"),
                ("language", "en"),
                ("result_type", RESULT_TYPES),
            ],
        )?;

        let response: GeocodeResponse = self
            .fetcher
            .fetch_as(PROVIDER, &url, &HeaderMap::new())
            .await?;
        normalize_location(&response, lat, lon)
    }
}
