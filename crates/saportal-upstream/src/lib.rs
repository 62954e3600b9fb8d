//! Upstream provider access for the SA Daily Portal.
//!
//! [`HttpFetcher`] owns the retry schedule. The three services build on it,
//! each reading through the shared [`saportal_core::ResponseCache`] passed in
//! by the caller.

pub mod dataset;
pub mod endpoint;
pub mod error;
pub mod football;
pub mod forecast;
pub mod geocode;
pub mod location;
pub mod normalize;
pub mod retry;
pub mod text;
pub mod types;
pub mod weather;

pub use dataset::{cached_fetch, degrade, Cached, MatchListing, StandingsTable, WeatherReport};
pub use error::UpstreamError;
pub use football::FootballService;
pub use geocode::GeocodeService;
pub use retry::{HttpFetcher, RetryPolicy};
pub use weather::WeatherService;
