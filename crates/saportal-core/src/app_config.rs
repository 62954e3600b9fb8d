use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub openweather_api_key: Option<String>,
    pub google_maps_api_key: Option<String>,
    pub football_data_api_key: Option<String>,
    pub weather_base_url: String,
    pub geocode_base_url: String,
    pub football_base_url: String,
    pub upstream_max_retries: u32,
    pub upstream_first_timeout_secs: u64,
    pub upstream_retry_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "openweather_api_key",
                &self.openweather_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "google_maps_api_key",
                &self.google_maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "football_data_api_key",
                &self.football_data_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("weather_base_url", &self.weather_base_url)
            .field("geocode_base_url", &self.geocode_base_url)
            .field("football_base_url", &self.football_base_url)
            .field("upstream_max_retries", &self.upstream_max_retries)
            .field(
                "upstream_first_timeout_secs",
                &self.upstream_first_timeout_secs,
            )
            .field(
                "upstream_retry_timeout_secs",
                &self.upstream_retry_timeout_secs,
            )
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
