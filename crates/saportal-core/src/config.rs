use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/";
pub const DEFAULT_GEOCODE_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/";
pub const DEFAULT_FOOTBALL_BASE_URL: &str = "https://api.football-data.org/v4/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The lookup is injected so tests can drive parsing from a `HashMap` without
/// touching the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty values count as unset so `KEY=` in a `.env` file does not produce
    // an API key that every upstream will reject.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SAPORTAL_ENV", "development"))?;

    let bind_addr = parse_addr("SAPORTAL_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SAPORTAL_LOG_LEVEL", "info");

    let openweather_api_key = optional("OPENWEATHER_API_KEY");
    let google_maps_api_key = optional("GOOGLE_MAPS_API_KEY");
    let football_data_api_key = optional("FOOTBALL_DATA_API_KEY");

    if env == Environment::Production {
        for (var, value) in [
            ("OPENWEATHER_API_KEY", &openweather_api_key),
            ("GOOGLE_MAPS_API_KEY", &google_maps_api_key),
            ("FOOTBALL_DATA_API_KEY", &football_data_api_key),
        ] {
            if value.is_none() {
                return Err(ConfigError::MissingEnvVar(var.to_string()));
            }
        }
    }

    let weather_base_url = or_default("SAPORTAL_WEATHER_BASE_URL", DEFAULT_WEATHER_BASE_URL);
    let geocode_base_url = or_default("SAPORTAL_GEOCODE_BASE_URL", DEFAULT_GEOCODE_BASE_URL);
    let football_base_url = or_default("SAPORTAL_FOOTBALL_BASE_URL", DEFAULT_FOOTBALL_BASE_URL);

    let upstream_max_retries = parse_u32("SAPORTAL_UPSTREAM_MAX_RETRIES", "2")?;
    let upstream_first_timeout_secs = parse_u64("SAPORTAL_UPSTREAM_FIRST_TIMEOUT_SECS", "8")?;
    let upstream_retry_timeout_secs = parse_u64("SAPORTAL_UPSTREAM_RETRY_TIMEOUT_SECS", "15")?;
    if upstream_first_timeout_secs == 0 {
        return Err(invalid(
            "SAPORTAL_UPSTREAM_FIRST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    if upstream_retry_timeout_secs < upstream_first_timeout_secs {
        return Err(invalid(
            "SAPORTAL_UPSTREAM_RETRY_TIMEOUT_SECS",
            format!("must be at least the first-attempt timeout ({upstream_first_timeout_secs}s)"),
        ));
    }

    let user_agent = or_default("SAPORTAL_USER_AGENT", "saportal/0.1 (daily-portal)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        openweather_api_key,
        google_maps_api_key,
        football_data_api_key,
        weather_base_url,
        geocode_base_url,
        football_base_url,
        upstream_max_retries,
        upstream_first_timeout_secs,
        upstream_retry_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SAPORTAL_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
