mod info;
mod sports;
mod weather;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use saportal_core::{clock, AppConfig, ResponseCache};
use saportal_upstream::{
    FootballService, GeocodeService, HttpFetcher, RetryPolicy, UpstreamError, WeatherService,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, REQUEST_ID_HEADER};

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared handler state. The cache is the single instance for the process;
/// the services are stateless apart from their HTTP client and credentials.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ResponseCache>,
    pub weather: WeatherService,
    pub geocode: GeocodeService,
    pub football: FootballService,
}

impl AppState {
    /// Builds the provider services from config around a fresh cache.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if the HTTP client cannot be constructed or a
    /// configured base URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, UpstreamError> {
        let fetcher = HttpFetcher::new(&config.user_agent, RetryPolicy::from_config(config))?;
        Ok(Self {
            cache: Arc::new(ResponseCache::new()),
            weather: WeatherService::new(
                fetcher.clone(),
                &config.weather_base_url,
                config.openweather_api_key.clone(),
            )?,
            geocode: GeocodeService::new(
                fetcher.clone(),
                &config.geocode_base_url,
                config.google_maps_api_key.clone(),
            )?,
            football: FootballService::new(
                fetcher,
                &config.football_base_url,
                config.football_data_api_key.clone(),
            )?,
        })
    }
}

/// JSON error body: `{"success": false, "error": "...", ...}`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub success: bool,
    pub error: String,
    pub code: &'static str,
    pub request_id: String,
    pub timestamp: String,
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            error: message.into(),
            code,
            request_id: request_id.into(),
            timestamp: now_iso(),
        }
    }

    pub fn bad_request(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(request_id, "bad_request", message)
    }

    pub fn unavailable(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(request_id, "service_unavailable", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code {
            "bad_request" => StatusCode::BAD_REQUEST,
            "service_unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn now_iso() -> String {
    clock::sast_now().to_rfc3339()
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/weather", get(weather::get_weather))
        .route("/api/sports/matches", get(sports::todays_matches))
        .route("/api/sports/live", get(sports::live_matches))
        .route("/api/sports/standings", get(sports::standings))
        .route("/api/sports/fixtures", get(sports::upcoming_fixtures))
        .route("/api/sports/upcoming", get(sports::upcoming_fixtures))
        .route("/api/sassa/payment-dates", get(info::sassa_payment_dates))
        .route("/api/contact/submit", post(info::submit_contact))
        .route("/api/guides/list", get(info::list_guides))
        .route("/api/status", get(status))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct ServiceStatus {
    status: &'static str,
    version: &'static str,
    services: ServiceFlags,
    cache_entries: usize,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct ServiceFlags {
    weather: &'static str,
    football: &'static str,
    sassa: &'static str,
    guides: &'static str,
    contact: &'static str,
}

async fn status(State(state): State<AppState>) -> impl IntoResponse {
    Json(ServiceStatus {
        status: "online",
        version: SERVICE_VERSION,
        services: ServiceFlags {
            weather: "active",
            football: "active",
            sassa: "active",
            guides: "active",
            contact: "active",
        },
        cache_entries: state.cache.len(),
        timestamp: now_iso(),
    })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
