use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with every API key populated, valid for any environment.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("OPENWEATHER_API_KEY", "weather-key");
    m.insert("GOOGLE_MAPS_API_KEY", "maps-key");
    m.insert("FOOTBALL_DATA_API_KEY", "football-key");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SAPORTAL_ENV"));
}

#[test]
fn build_app_config_succeeds_with_empty_env_in_development() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.openweather_api_key.is_none());
    assert!(cfg.google_maps_api_key.is_none());
    assert!(cfg.football_data_api_key.is_none());
    assert_eq!(cfg.weather_base_url, DEFAULT_WEATHER_BASE_URL);
    assert_eq!(cfg.geocode_base_url, DEFAULT_GEOCODE_BASE_URL);
    assert_eq!(cfg.football_base_url, DEFAULT_FOOTBALL_BASE_URL);
    assert_eq!(cfg.upstream_max_retries, 2);
    assert_eq!(cfg.upstream_first_timeout_secs, 8);
    assert_eq!(cfg.upstream_retry_timeout_secs, 15);
    assert_eq!(cfg.user_agent, "saportal/0.1 (daily-portal)");
}

#[test]
fn build_app_config_reads_api_keys() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.openweather_api_key.as_deref(), Some("weather-key"));
    assert_eq!(cfg.google_maps_api_key.as_deref(), Some("maps-key"));
    assert_eq!(cfg.football_data_api_key.as_deref(), Some("football-key"));
}

#[test]
fn build_app_config_treats_blank_api_key_as_unset() {
    let mut map = full_env();
    map.insert("GOOGLE_MAPS_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.google_maps_api_key.is_none());
}

#[test]
fn build_app_config_requires_api_keys_in_production() {
    let mut map = full_env();
    map.insert("SAPORTAL_ENV", "production");
    map.remove("FOOTBALL_DATA_API_KEY");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "FOOTBALL_DATA_API_KEY"),
        "expected MissingEnvVar(FOOTBALL_DATA_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_accepts_production_with_all_keys() {
    let mut map = full_env();
    map.insert("SAPORTAL_ENV", "production");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
}

#[test]
fn build_app_config_fails_on_invalid_saportal_env() {
    let mut map = full_env();
    map.insert("SAPORTAL_ENV", "producton");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SAPORTAL_ENV"),
        "expected InvalidEnvVar(SAPORTAL_ENV), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = full_env();
    map.insert("SAPORTAL_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SAPORTAL_BIND_ADDR"),
        "expected InvalidEnvVar(SAPORTAL_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn upstream_max_retries_override() {
    let mut map = full_env();
    map.insert("SAPORTAL_UPSTREAM_MAX_RETRIES", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.upstream_max_retries, 5);
}

#[test]
fn upstream_max_retries_invalid() {
    let mut map = full_env();
    map.insert("SAPORTAL_UPSTREAM_MAX_RETRIES", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SAPORTAL_UPSTREAM_MAX_RETRIES"),
        "expected InvalidEnvVar(SAPORTAL_UPSTREAM_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn upstream_first_timeout_zero_is_rejected() {
    let mut map = full_env();
    map.insert("SAPORTAL_UPSTREAM_FIRST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SAPORTAL_UPSTREAM_FIRST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SAPORTAL_UPSTREAM_FIRST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn upstream_retry_timeout_must_not_shrink() {
    let mut map = full_env();
    map.insert("SAPORTAL_UPSTREAM_FIRST_TIMEOUT_SECS", "10");
    map.insert("SAPORTAL_UPSTREAM_RETRY_TIMEOUT_SECS", "5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SAPORTAL_UPSTREAM_RETRY_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SAPORTAL_UPSTREAM_RETRY_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn base_url_overrides_are_applied() {
    let mut map = full_env();
    map.insert("SAPORTAL_FOOTBALL_BASE_URL", "http://127.0.0.1:9000/v4");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.football_base_url, "http://127.0.0.1:9000/v4");
}

#[test]
fn debug_output_redacts_api_keys() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("weather-key"));
    assert!(!rendered.contains("maps-key"));
    assert!(!rendered.contains("football-key"));
    assert!(rendered.contains("[redacted]"));
}
