use axum::{extract::State, Json};
use saportal_upstream::{Cached, MatchListing, StandingsTable};

use super::AppState;

// The football datasets degrade internally, so these handlers cannot fail.

pub(super) async fn todays_matches(State(state): State<AppState>) -> Json<Cached<MatchListing>> {
    Json(state.football.todays_matches(&state.cache).await)
}

pub(super) async fn live_matches(State(state): State<AppState>) -> Json<Cached<MatchListing>> {
    Json(state.football.live_matches(&state.cache).await)
}

pub(super) async fn standings(State(state): State<AppState>) -> Json<Cached<StandingsTable>> {
    Json(state.football.standings(&state.cache).await)
}

pub(super) async fn upcoming_fixtures(
    State(state): State<AppState>,
) -> Json<Cached<MatchListing>> {
    Json(state.football.upcoming_fixtures(&state.cache).await)
}
