//! Provider response shapes.
//!
//! Only the fields the normalizers read are modelled. Anything a provider may
//! omit is an `Option` or `#[serde(default)]` so a sparse record still parses
//! and the normalizer decides the fallback.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// football-data.org v4
// ---------------------------------------------------------------------------

/// `GET /matches`.
#[derive(Debug, Default, Deserialize)]
pub struct MatchesResponse {
    #[serde(default)]
    pub matches: Vec<ApiMatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMatch {
    pub id: Option<i64>,
    pub status: Option<String>,
    /// RFC 3339, e.g. `"2026-03-01T15:00:00Z"`.
    pub utc_date: Option<String>,
    pub home_team: Option<ApiTeam>,
    pub away_team: Option<ApiTeam>,
    pub score: Option<ApiScore>,
    /// A number on most feeds, sometimes a string such as `"45+2"`.
    pub minute: Option<serde_json::Value>,
    pub venue: Option<String>,
    pub competition: Option<ApiCompetition>,
    pub matchday: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiTeam {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiScore {
    pub full_time: Option<ApiScoreLine>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiScoreLine {
    pub home: Option<i64>,
    pub away: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiCompetition {
    pub name: Option<String>,
    pub code: Option<String>,
}

/// `GET /competitions/{code}/standings`.
#[derive(Debug, Default, Deserialize)]
pub struct StandingsResponse {
    #[serde(default)]
    pub standings: Vec<ApiStandingGroup>,
    pub season: Option<ApiSeason>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSeason {
    pub current_matchday: Option<i64>,
}

/// One standings table. The first group is the overall (`TOTAL`) table.
#[derive(Debug, Default, Deserialize)]
pub struct ApiStandingGroup {
    #[serde(default)]
    pub table: Vec<ApiTableRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTableRow {
    pub position: Option<i64>,
    pub team: Option<ApiTeam>,
    pub played_games: Option<i64>,
    pub won: Option<i64>,
    pub draw: Option<i64>,
    pub lost: Option<i64>,
    pub goals_for: Option<i64>,
    pub goals_against: Option<i64>,
    pub goal_difference: Option<i64>,
    pub points: Option<i64>,
    pub form: Option<String>,
}

// ---------------------------------------------------------------------------
// OpenWeatherMap 2.5
// ---------------------------------------------------------------------------

/// `GET /weather`.
#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub main: ApiMain,
    pub wind: ApiWind,
    #[serde(default)]
    pub weather: Vec<ApiCondition>,
    /// Metres.
    pub visibility: Option<f64>,
    pub clouds: Option<ApiClouds>,
    pub sys: ApiSys,
}

#[derive(Debug, Deserialize)]
pub struct ApiMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
    #[serde(default)]
    pub pressure: f64,
}

#[derive(Debug, Deserialize)]
pub struct ApiWind {
    /// Metres per second.
    pub speed: f64,
    pub deg: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCondition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiClouds {
    #[serde(default)]
    pub all: f64,
}

#[derive(Debug, Deserialize)]
pub struct ApiSys {
    pub sunrise: i64,
    pub sunset: i64,
}

/// `GET /forecast`: 3-hourly samples, up to 40 (five days).
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastSample>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastSample {
    /// Unix seconds.
    pub dt: i64,
    pub main: ApiMain,
    #[serde(default)]
    pub weather: Vec<ApiCondition>,
    pub wind: ApiWind,
    /// Probability of precipitation, 0.0..=1.0.
    pub pop: Option<f64>,
    pub clouds: Option<ApiClouds>,
}

// ---------------------------------------------------------------------------
// Google Geocoding
// ---------------------------------------------------------------------------

/// `GET /json?latlng=...`. `status` is `"OK"` on success and e.g.
/// `"ZERO_RESULTS"` or `"REQUEST_DENIED"` otherwise, always with HTTP 200.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressComponent {
    #[serde(default)]
    pub long_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}
