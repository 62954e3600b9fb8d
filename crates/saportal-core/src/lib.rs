pub mod app_config;
pub mod cache;
pub mod clock;
pub mod config;
pub mod records;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use cache::{ResponseCache, TtlCache};
pub use config::{load_app_config, load_app_config_from_env};
pub use records::{
    AccuracyTier, CurrentWeather, ForecastDay, HourlyForecast, LocationResult, Match, MatchStatus,
    StandingRow,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
