//! OpenWeatherMap current conditions plus the 5-day/3-hour forecast.
//!
//! Unlike the football datasets there is no degraded weather report: when
//! either call fails the error reaches the caller.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Url;
use saportal_core::{clock, ResponseCache};

use crate::dataset::{cached_fetch, Cached, WeatherReport};
use crate::endpoint::{build_url, parse_base_url, round_coordinate};
use crate::error::UpstreamError;
use crate::forecast::{normalize_current, normalize_daily, normalize_hourly};
use crate::retry::HttpFetcher;
use crate::types::{CurrentWeatherResponse, ForecastResponse};

pub const PROVIDER: &str = "OpenWeatherMap";
const TTL: Duration = Duration::from_secs(300);
const COORDINATE_PLACES: i32 = 2;
const FORECAST_SAMPLES: &str = "40";

#[derive(Debug, Clone)]
pub struct WeatherService {
    fetcher: HttpFetcher,
    base_url: Url,
    api_key: Option<String>,
}

impl WeatherService {
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

    /// Current weather, 8 hourly samples and up to 5 forecast days for the
    /// coordinates rounded to two decimals. Cached for 5 minutes per rounded
    /// coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns the first failure from either upstream call, or
    /// [`UpstreamError::MissingApiKey`] without sending a request.
    pub async fn report(
        &self,
        cache: &ResponseCache,
        latitude: f64,
        longitude: f64,
    ) -> Result<Cached<WeatherReport>, UpstreamError> {
        let lat = round_coordinate(latitude, COORDINATE_PLACES);
        let lon = round_coordinate(longitude, COORDINATE_PLACES);
        let key = format!("weather_forecast_{lat:.2}_{lon:.2}");

        cached_fetch(cache, &key, TTL, move || self.fetch_report(lat, lon)).await
    }

    async fn fetch_report(&self, lat: f64, lon: f64) -> Result<WeatherReport, UpstreamError> {
        let appid = self
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingApiKey(PROVIDER))?;
        let (lat, lon) = (format!("{lat:.2}"), format!("{lon:.2}"));
        let common = [
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("appid", appid),
            ("units", "metric"),
            ("lang", "en"),
        ];
        let current_url = build_url(&self.base_url, "weather", &common)?;
        let mut forecast_params = common.to_vec();
        forecast_params.push(("cnt", FORECAST_SAMPLES));
        let forecast_url = build_url(&self.base_url, "forecast", &forecast_params)?;

        let headers = HeaderMap::new();
        let (current, forecast) = tokio::try_join!(
            self.fetcher
                .fetch_as::<CurrentWeatherResponse>(PROVIDER, &current_url, &headers),
            self.fetcher
                .fetch_as::<ForecastResponse>(PROVIDER, &forecast_url, &headers),
        )?;

        let now = clock::sast_now();
        Ok(WeatherReport {
            success: true,
            current: normalize_current(&current, now)?,
            hourly: normalize_hourly(&forecast)?,
            forecast: normalize_daily(&forecast, now.date_naive())?,
            last_updated: now.to_rfc3339(),
        })
    }
}
