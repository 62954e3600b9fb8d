//! Normalization of football-data.org payloads into [`saportal_core::Match`]
//! and [`saportal_core::StandingRow`] records.
//!
//! Normalizers never fail: every absent field has a display default, so a
//! sparse provider record still yields a complete row.

use chrono::{DateTime, NaiveDate};
use saportal_core::{clock, Match, MatchStatus, StandingRow};

use crate::types::{ApiMatch, ApiScore, ApiTableRow, MatchesResponse, StandingsResponse};

const DEFAULT_HOME_TEAM: &str = "Home Team";
const DEFAULT_AWAY_TEAM: &str = "Away Team";
const DEFAULT_VENUE: &str = "Football Stadium";
const DEFAULT_COMPETITION: &str = "Football Match";
const DEFAULT_FORM: &str = "-----";
const LIVE_MINUTE: &str = "LIVE";
const TIME_UNKNOWN: &str = "TBC";

/// Maps a provider status to the portal's three-state lifecycle.
///
/// `COMPLETED` and `UPCOMING` map to themselves, so feeding an already
/// normalized status back in is a no-op.
#[must_use]
pub fn map_status(status: &str) -> MatchStatus {
    match status {
        "LIVE" => MatchStatus::Live,
        "FINISHED" | "COMPLETED" => MatchStatus::Completed,
        _ => MatchStatus::Upcoming,
    }
}

/// `"{home}-{away}"` when both full-time goals are known, `"vs"` for
/// fixtures, otherwise `"0-0"`.
#[must_use]
pub fn score_display(score: Option<&ApiScore>, status: MatchStatus, upcoming_listing: bool) -> String {
    let full_time = score.and_then(|s| s.full_time.as_ref());
    match full_time.and_then(|ft| ft.home.zip(ft.away)) {
        Some((home, away)) => format!("{home}-{away}"),
        None if status == MatchStatus::Upcoming || upcoming_listing => "vs".to_string(),
        None => "0-0".to_string(),
    }
}

/// Converts a provider UTC timestamp into SAST `(date, time)`.
///
/// A missing or unparseable timestamp yields `today` with time `"TBC"`.
#[must_use]
pub fn kickoff(utc_date: Option<&str>, today: NaiveDate) -> (String, String) {
    match utc_date.and_then(|raw| DateTime::parse_from_rfc3339(raw).ok()) {
        Some(dt) => {
            let local = dt.with_timezone(&clock::sast());
            (
                local.format("%Y-%m-%d").to_string(),
                local.format("%H:%M").to_string(),
            )
        }
        None => {
            if let Some(raw) = utc_date {
                tracing::debug!(raw, "unparseable match kickoff timestamp");
            }
            (today.format("%Y-%m-%d").to_string(), TIME_UNKNOWN.to_string())
        }
    }
}

fn live_minute(minute: Option<&serde_json::Value>) -> String {
    match minute {
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
        _ => LIVE_MINUTE.to_string(),
    }
}

/// Normalizes one provider match. `upcoming_listing` marks the fixtures
/// listing, where an unscored match always reads `"vs"`.
#[must_use]
pub fn normalize_match(api: &ApiMatch, upcoming_listing: bool, today: NaiveDate) -> Match {
    let status = map_status(api.status.as_deref().unwrap_or("SCHEDULED"));
    let is_live = status == MatchStatus::Live;
    let (date, time) = kickoff(api.utc_date.as_deref(), today);
    let competition = api.competition.as_ref();

    Match {
        id: api.id,
        home_team: team_name(api.home_team.as_ref(), DEFAULT_HOME_TEAM),
        away_team: team_name(api.away_team.as_ref(), DEFAULT_AWAY_TEAM),
        score_display: score_display(api.score.as_ref(), status, upcoming_listing),
        status,
        is_live,
        minute: is_live.then(|| live_minute(api.minute.as_ref())),
        date,
        time,
        venue: api
            .venue
            .clone()
            .unwrap_or_else(|| DEFAULT_VENUE.to_string()),
        competition: competition
            .and_then(|c| c.name.clone())
            .unwrap_or_else(|| DEFAULT_COMPETITION.to_string()),
        competition_code: competition.and_then(|c| c.code.clone()),
        matchday: api.matchday.unwrap_or(1),
    }
}

/// Normalizes every match in a `/matches` response, preserving order.
#[must_use]
pub fn normalize_matches(
    response: &MatchesResponse,
    upcoming_listing: bool,
    today: NaiveDate,
) -> Vec<Match> {
    response
        .matches
        .iter()
        .map(|m| normalize_match(m, upcoming_listing, today))
        .collect()
}

fn team_name(team: Option<&crate::types::ApiTeam>, default: &str) -> String {
    team.and_then(|t| t.name.clone())
        .unwrap_or_else(|| default.to_string())
}

fn normalize_row(index: usize, row: &ApiTableRow) -> StandingRow {
    let ordinal = i64::try_from(index + 1).unwrap_or(i64::MAX);
    StandingRow {
        position: row.position.unwrap_or(ordinal),
        team: row
            .team
            .as_ref()
            .and_then(|t| t.name.clone())
            .unwrap_or_else(|| format!("Team {ordinal}")),
        played: row.played_games.unwrap_or(0),
        won: row.won.unwrap_or(0),
        drawn: row.draw.unwrap_or(0),
        lost: row.lost.unwrap_or(0),
        goals_for: row.goals_for.unwrap_or(0),
        goals_against: row.goals_against.unwrap_or(0),
        goal_difference: row.goal_difference.unwrap_or(0),
        points: row.points.unwrap_or(0),
        form: row
            .form
            .clone()
            .unwrap_or_else(|| DEFAULT_FORM.to_string()),
    }
}

/// Normalizes the first (overall) table of a standings response in provider
/// order. An empty `standings` array yields an empty table.
#[must_use]
pub fn normalize_standings(response: &StandingsResponse) -> Vec<StandingRow> {
    response
        .standings
        .first()
        .map(|group| {
            group
                .table
                .iter()
                .enumerate()
                .map(|(i, row)| normalize_row(i, row))
                .collect()
        })
        .unwrap_or_default()
}

/// The season's current matchday, defaulting to 1.
#[must_use]
pub fn current_matchday(response: &StandingsResponse) -> i64 {
    response
        .season
        .as_ref()
        .and_then(|s| s.current_matchday)
        .unwrap_or(1)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
