use axum::{
    extract::{Query, State},
    Extension, Json,
};
use saportal_core::{AccuracyTier, CurrentWeather, ForecastDay, HourlyForecast};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{now_iso, ApiError, AppState};

/// Name searches resolve to central Johannesburg.
const SEARCH_DEFAULT: (f64, f64) = (-26.2041, 28.0473);
const UNAVAILABLE: &str = "Weather service temporarily unavailable";

#[derive(Debug, Deserialize)]
pub(super) struct WeatherQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub(super) struct Coordinates {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Serialize)]
pub(super) struct WeatherResponse {
    success: bool,
    location: String,
    location_accuracy: AccuracyTier,
    coordinates: Coordinates,
    current: CurrentWeather,
    hourly: Vec<HourlyForecast>,
    forecast: Vec<ForecastDay>,
    last_updated: String,
    timestamp: String,
    cached: bool,
}

/// Parses one coordinate, accepting only finite values within `±limit`.
fn parse_coordinate(raw: &str, limit: f64) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= limit)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, PartialEq)]
enum Target<'a> {
    Point { lat: f64, lon: f64 },
    Search(&'a str),
}

fn resolve_target(query: &WeatherQuery) -> Result<Target<'_>, &'static str> {
    let lat = non_blank(query.lat.as_deref());
    let lon = non_blank(query.lon.as_deref());
    if let (Some(lat), Some(lon)) = (lat, lon) {
        return match (parse_coordinate(lat, 90.0), parse_coordinate(lon, 180.0)) {
            (Some(lat), Some(lon)) => Ok(Target::Point { lat, lon }),
            _ => Err("Invalid coordinates"),
        };
    }
    non_blank(query.location.as_deref())
        .map(Target::Search)
        .ok_or("Location required")
}

pub(super) async fn get_weather(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let target =
        resolve_target(&query).map_err(|message| ApiError::bad_request(req_id.0.clone(), message))?;

    let (lat, lon, location, location_accuracy) = match target {
        Target::Point { lat, lon } => {
            let place = state.geocode.reverse(&state.cache, lat, lon).await;
            (lat, lon, place.name, place.accuracy_tier)
        }
        Target::Search(name) => (
            SEARCH_DEFAULT.0,
            SEARCH_DEFAULT.1,
            name.to_string(),
            AccuracyTier::Search,
        ),
    };

    let report = state
        .weather
        .report(&state.cache, lat, lon)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, lat, lon, "weather lookup failed");
            ApiError::unavailable(req_id.0.clone(), UNAVAILABLE)
        })?;

    Ok(Json(WeatherResponse {
        success: report.data.success,
        location,
        location_accuracy,
        coordinates: Coordinates { lat, lon },
        current: report.data.current,
        hourly: report.data.hourly,
        forecast: report.data.forecast,
        last_updated: report.data.last_updated,
        timestamp: now_iso(),
        cached: report.cached,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(lat: Option<&str>, lon: Option<&str>, location: Option<&str>) -> WeatherQuery {
        WeatherQuery {
            lat: lat.map(str::to_string),
            lon: lon.map(str::to_string),
            location: location.map(str::to_string),
        }
    }

    #[test]
    fn valid_coordinates_resolve_to_point() {
        assert_eq!(
            resolve_target(&query(Some("-33.92"), Some(" 18.42 "), None)),
            Ok(Target::Point { lat: -33.92, lon: 18.42 })
        );
    }

    #[test]
    fn bad_coordinates_are_rejected() {
        for (lat, lon) in [
            ("abc", "28.0"),
            ("-26.2", "east"),
            ("91", "28.0"),
            ("-26.2", "-180.5"),
            ("NaN", "28.0"),
            ("inf", "28.0"),
        ] {
            assert_eq!(
                resolve_target(&query(Some(lat), Some(lon), None)),
                Err("Invalid coordinates"),
                "{lat},{lon}"
            );
        }
    }

    #[test]
    fn boundary_coordinates_are_accepted() {
        assert!(matches!(
            resolve_target(&query(Some("-90"), Some("180"), None)),
            Ok(Target::Point { .. })
        ));
    }

    #[test]
    fn location_name_is_used_without_coordinates() {
        assert_eq!(
            resolve_target(&query(None, Some("28.0"), Some("  Soweto "))),
            Ok(Target::Search("Soweto"))
        );
    }

    #[test]
    fn nothing_supplied_requires_location() {
        assert_eq!(
            resolve_target(&query(None, None, Some("   "))),
            Err("Location required")
        );
        assert_eq!(resolve_target(&query(Some(""), Some(""), None)), Err("Location required"));
    }
}
