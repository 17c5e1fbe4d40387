use std::net::SocketAddr;

use crate::location::LocationDetails;
use crate::weather::DEFAULT_ICED_THRESHOLD_CELSIUS;

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

/// Settings for the weather personalization lookups.
#[derive(Clone)]
pub struct WeatherConfig {
    /// Provider key; `None` disables personalization entirely.
    pub api_key: Option<String>,
    pub weather_api_url: String,
    pub geocoding_api_url: String,
    pub ip_lookup_api_url: String,
    pub default_location: Option<LocationDetails>,
    /// Degrees Celsius above which iced coffee is offered. `0` means unset.
    pub min_temp_for_iced: i32,
    pub request_timeout_secs: u64,
}

impl WeatherConfig {
    /// The effective iced-drink threshold, substituting the default for `0`.
    #[must_use]
    pub fn iced_threshold(&self) -> i32 {
        if self.min_temp_for_iced == 0 {
            DEFAULT_ICED_THRESHOLD_CELSIUS
        } else {
            self.min_temp_for_iced
        }
    }
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("weather_api_url", &self.weather_api_url)
            .field("geocoding_api_url", &self.geocoding_api_url)
            .field("ip_lookup_api_url", &self.ip_lookup_api_url)
            .field("default_location", &self.default_location)
            .field("min_temp_for_iced", &self.min_temp_for_iced)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub weather: WeatherConfig,
    pub use_shared_counter: bool,
    /// Always `Some` when `use_shared_counter` is set.
    pub database_url: Option<String>,
    pub counter_timeout_ms: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("weather", &self.weather)
            .field("use_shared_counter", &self.use_shared_counter)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("counter_timeout_ms", &self.counter_timeout_ms)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
