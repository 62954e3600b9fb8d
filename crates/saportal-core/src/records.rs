//! Normalized records served by the portal.
//!
//! Every record is an immutable value built fresh from an upstream payload.
//! Field names on the wire follow the JSON the portal's front-end reads, which
//! is why a few Rust names carry a `#[serde(rename)]`.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a football match as shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchStatus {
    Live,
    Completed,
    Upcoming,
}

impl MatchStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Live => "LIVE",
            MatchStatus::Completed => "COMPLETED",
            MatchStatus::Upcoming => "UPCOMING",
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: Option<i64>,
    pub home_team: String,
    pub away_team: String,
    /// `"2-1"`, `"vs"` for upcoming fixtures, or `"0-0"` when a started match
    /// has no reported score.
    #[serde(rename = "score")]
    pub score_display: String,
    pub status: MatchStatus,
    pub is_live: bool,
    /// Provider match minute, or `"LIVE"` when the provider does not report one.
    /// Only set for live matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<String>,
    /// Kick-off date in SAST, `YYYY-MM-DD`.
    pub date: String,
    /// Kick-off time in SAST, `HH:MM`, or `"TBC"`.
    pub time: String,
    pub venue: String,
    pub competition: String,
    pub competition_code: Option<String>,
    pub matchday: i64,
}

/// One row of a league table, in the order the provider ranked it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub position: i64,
    pub team: String,
    pub played: i64,
    pub won: i64,
    pub drawn: i64,
    pub lost: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    pub goal_difference: i64,
    pub points: i64,
    pub form: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temp: i64,
    pub feels_like: i64,
    pub humidity: i64,
    pub pressure: i64,
    /// km/h, one decimal place.
    pub wind_speed: f64,
    pub wind_deg: i64,
    pub description: String,
    pub icon: String,
    /// Kilometres.
    pub visibility: f64,
    pub clouds: i64,
    pub sunrise: String,
    pub sunset: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    /// 12-hour clock label such as `"3 PM"`.
    pub time: String,
    pub temp: i64,
    pub feels_like: i64,
    pub description: String,
    pub icon: String,
    pub humidity: i64,
    pub wind_speed: f64,
    /// Probability of precipitation, percent.
    pub pop: i64,
    pub clouds: i64,
}

/// A day of forecast aggregated from 3-hourly samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    #[serde(rename = "day")]
    pub day_name: String,
    pub month_day: String,
    #[serde(rename = "temp")]
    pub temp_avg: i64,
    pub temp_min: i64,
    pub temp_max: i64,
    #[serde(rename = "icon")]
    pub dominant_icon: String,
    #[serde(rename = "description")]
    pub dominant_description: String,
}

/// How precisely a location name pins down the requested coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyTier {
    StreetAddress,
    Route,
    Neighborhood,
    Sublocality,
    Locality,
    Municipality,
    General,
    Coordinates,
    /// The caller supplied a place name instead of coordinates.
    Search,
}

impl AccuracyTier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AccuracyTier::StreetAddress => "street_address",
            AccuracyTier::Route => "route",
            AccuracyTier::Neighborhood => "neighborhood",
            AccuracyTier::Sublocality => "sublocality",
            AccuracyTier::Locality => "locality",
            AccuracyTier::Municipality => "municipality",
            AccuracyTier::General => "general",
            AccuracyTier::Coordinates => "coordinates",
            AccuracyTier::Search => "search",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResult {
    pub name: String,
    pub formatted_address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "accuracy")]
    pub accuracy_tier: AccuracyTier,
    pub success: bool,
}

impl LocationResult {
    /// The location reported when reverse geocoding is unavailable.
    #[must_use]
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            name: coordinate_label(latitude, longitude),
            formatted_address: format!("Latitude: {latitude:.4}, Longitude: {longitude:.4}"),
            latitude,
            longitude,
            accuracy_tier: AccuracyTier::Coordinates,
            success: false,
        }
    }
}

/// `"Location (-26.2041, 28.0473)"`.
#[must_use]
pub fn coordinate_label(latitude: f64, longitude: f64) -> String {
    format!("Location ({latitude:.4}, {longitude:.4})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_status_serializes_uppercase() {
        let json = serde_json::to_string(&MatchStatus::Completed).expect("serialize");
        assert_eq!(json, "\"COMPLETED\"");
        assert_eq!(MatchStatus::Live.to_string(), "LIVE");
    }

    #[test]
    fn match_omits_minute_unless_live() {
        let m = Match {
            id: Some(7),
            home_team: "Arsenal FC".to_string(),
            away_team: "Chelsea FC".to_string(),
            score_display: "vs".to_string(),
            status: MatchStatus::Upcoming,
            is_live: false,
            minute: None,
            date: "2026-03-02".to_string(),
            time: "17:30".to_string(),
            venue: "Emirates Stadium".to_string(),
            competition: "Premier League".to_string(),
            competition_code: Some("PL".to_string()),
            matchday: 27,
        };
        let json = serde_json::to_value(&m).expect("serialize");
        assert!(json.get("minute").is_none());
        assert_eq!(json["score"], "vs");
        assert_eq!(json["status"], "UPCOMING");
    }

    #[test]
    fn accuracy_tier_wire_names_match_as_str() {
        for tier in [
            AccuracyTier::StreetAddress,
            AccuracyTier::Route,
            AccuracyTier::Neighborhood,
            AccuracyTier::Sublocality,
            AccuracyTier::Locality,
            AccuracyTier::Municipality,
            AccuracyTier::General,
            AccuracyTier::Coordinates,
            AccuracyTier::Search,
        ] {
            let json = serde_json::to_value(tier).expect("serialize");
            assert_eq!(json.as_str(), Some(tier.as_str()));
        }
    }

    #[test]
    fn coordinate_fallback_is_marked_unsuccessful() {
        let loc = LocationResult::from_coordinates(-33.924_87, 18.424_06);
        assert_eq!(loc.name, "Location (-33.9249, 18.4241)");
        assert_eq!(loc.formatted_address, "Latitude: -33.9249, Longitude: 18.4241");
        assert_eq!(loc.accuracy_tier, AccuracyTier::Coordinates);
        assert!(!loc.success);
    }
}
