//! football-data.org v4 datasets: live, today's, standings and fixtures.
//!
//! Every public method returns a well-formed listing. Upstream failures,
//! including a missing API key, are logged and degrade to an empty result.

use std::time::Duration;

use chrono::Days;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use saportal_core::{clock, ResponseCache};
use serde::de::DeserializeOwned;

use crate::dataset::{cached_fetch, degrade, Cached, MatchListing, StandingsTable};
use crate::endpoint::{build_url, parse_base_url};
use crate::error::UpstreamError;
use crate::normalize::{current_matchday, normalize_matches, normalize_standings};
use crate::retry::HttpFetcher;
use crate::types::{MatchesResponse, StandingsResponse};

pub const PROVIDER: &str = "Football-Data.org";
const AUTH_HEADER: HeaderName = HeaderName::from_static("x-auth-token");

const LIVE_KEY: &str = "football_live_matches";
const TODAY_KEY: &str = "football_todays_matches";
const STANDINGS_KEY: &str = "football_standings";
const FIXTURES_KEY: &str = "football_upcoming_fixtures";

const LIVE_TTL: Duration = Duration::from_secs(60);
const TODAY_TTL: Duration = Duration::from_secs(300);
const STANDINGS_TTL: Duration = Duration::from_secs(3600);
const FIXTURES_TTL: Duration = Duration::from_secs(600);

const STANDINGS_COMPETITION: &str = "Premier League";
const STANDINGS_PATH: &str = "competitions/PL/standings";
const FIXTURE_WINDOW_DAYS: u64 = 7;

/// Client for the football-data.org datasets.
#[derive(Debug, Clone)]
pub struct FootballService {
    fetcher: HttpFetcher,
    base_url: Url,
    api_key: Option<String>,
}

impl FootballService {
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

    /// Matches in progress right now. Cached for 60 seconds.
    pub async fn live_matches(&self, cache: &ResponseCache) -> Cached<MatchListing> {
        let result = cached_fetch(cache, LIVE_KEY, LIVE_TTL, || async move {
            let response: MatchesResponse = self.get("matches", &[("status", "LIVE")]).await?;
            let mut listing = MatchListing::new(
                normalize_matches(&response, false, clock::sast_today()),
                now_iso(),
            );
            listing.source = Some(PROVIDER.to_string());
            Ok(listing)
        })
        .await;
        degrade("live_matches", result, || MatchListing::empty(now_iso()))
    }

    /// Every match kicking off today (SAST). Cached for 5 minutes.
    pub async fn todays_matches(&self, cache: &ResponseCache) -> Cached<MatchListing> {
        let today = clock::sast_today();
        let day = today.format("%Y-%m-%d").to_string();
        let day_param = day.as_str();

        let result = cached_fetch(cache, TODAY_KEY, TODAY_TTL, || async move {
            let response: MatchesResponse = self
                .get("matches", &[("dateFrom", day_param), ("dateTo", day_param)])
                .await?;
            let mut listing =
                MatchListing::new(normalize_matches(&response, false, today), now_iso());
            listing.date = Some(day_param.to_string());
            Ok(listing)
        })
        .await;
        degrade("todays_matches", result, || {
            let mut listing = MatchListing::empty(now_iso());
            listing.date = Some(day.clone());
            listing
        })
    }

    /// The Premier League table. Cached for an hour.
    pub async fn standings(&self, cache: &ResponseCache) -> Cached<StandingsTable> {
        let result = cached_fetch(cache, STANDINGS_KEY, STANDINGS_TTL, || async move {
            let response: StandingsResponse = self.get(STANDINGS_PATH, &[]).await?;
            Ok(StandingsTable {
                success: true,
                standings: normalize_standings(&response),
                competition: STANDINGS_COMPETITION.to_string(),
                season: Some(current_matchday(&response)),
                last_updated: now_iso(),
            })
        })
        .await;
        degrade("standings", result, || StandingsTable {
            success: true,
            standings: Vec::new(),
            competition: STANDINGS_COMPETITION.to_string(),
            season: None,
            last_updated: now_iso(),
        })
    }

    /// Scheduled matches from today through the next seven days. Cached for
    /// 10 minutes.
    pub async fn upcoming_fixtures(&self, cache: &ResponseCache) -> Cached<MatchListing> {
        let today = clock::sast_today();
        let until = today
            .checked_add_days(Days::new(FIXTURE_WINDOW_DAYS))
            .unwrap_or(today);
        let from = today.format("%Y-%m-%d").to_string();
        let to = until.format("%Y-%m-%d").to_string();
        let date_range = format!("{from} to {to}");
        let (from, to, range) = (from.as_str(), to.as_str(), date_range.as_str());

        let result = cached_fetch(cache, FIXTURES_KEY, FIXTURES_TTL, || async move {
            let response: MatchesResponse = self
                .get(
                    "matches",
                    &[("dateFrom", from), ("dateTo", to), ("status", "SCHEDULED")],
                )
                .await?;
            let mut listing =
                MatchListing::new(normalize_matches(&response, true, today), now_iso());
            listing.date_range = Some(range.to_string());
            Ok(listing)
        })
        .await;
        degrade("upcoming_fixtures", result, || {
            let mut listing = MatchListing::empty(now_iso());
            listing.date_range = Some(date_range.clone());
            listing
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingApiKey(PROVIDER))?;
        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(key).map_err(|_| UpstreamError::Provider {
            provider: PROVIDER,
            message: "API key is not a valid header value".to_string(),
        })?;
        headers.insert(AUTH_HEADER, token);

        let url = build_url(&self.base_url, path, params)?;
        self.fetcher.fetch_as(PROVIDER, &url, &headers).await
    }
}

fn now_iso() -> String {
    clock::sast_now().to_rfc3339()
}
