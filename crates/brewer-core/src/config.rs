use crate::app_config::{AppConfig, Environment, WeatherConfig};
use crate::location::LocationDetails;
use crate::ConfigError;

const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const DEFAULT_GEOCODING_API_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
const DEFAULT_IP_LOOKUP_API_URL: &str = "https://ipapi.co/";

const DEFAULT_LOCATION_VARS: [&str; 3] = [
    "BREWER_DEFAULT_CITY",
    "BREWER_DEFAULT_STATE",
    "BREWER_DEFAULT_COUNTRY_CODE",
];

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
/// Blank values are treated the same as unset ones.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
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

    let parse_i32 = |var: &str, default: &str| -> Result<i32, ConfigError> {
        or_default(var, default)
            .parse::<i32>()
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

    let parse_nonzero_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        match parse_u64(var, default)? {
            0 => Err(invalid(var, "must be greater than zero".to_string())),
            value => Ok(value),
        }
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match optional(var).map(|v| v.to_ascii_lowercase()).as_deref() {
            None => Ok(default),
            Some("true" | "1" | "yes") => Ok(true),
            Some("false" | "0" | "no") => Ok(false),
            Some(other) => Err(invalid(var, format!("expected a boolean, got \"{other}\""))),
        }
    };

    let env = parse_environment(&or_default("BREWER_ENV", "development"))?;
    let bind_addr = parse_addr("BREWER_BIND_ADDR", "0.0.0.0:8080")?;
    let log_level = or_default("BREWER_LOG_LEVEL", "info");

    let default_location = {
        let parts = DEFAULT_LOCATION_VARS.map(|var| optional(var));
        match &parts {
            [None, None, None] => None,
            [Some(city), Some(state), Some(country_code)] => {
                LocationDetails::new(city, state, country_code)
            }
            _ => {
                let missing = DEFAULT_LOCATION_VARS
                    .iter()
                    .zip(&parts)
                    .find_map(|(var, part)| part.is_none().then_some(*var))
                    .unwrap_or(DEFAULT_LOCATION_VARS[0]);
                return Err(invalid(
                    missing,
                    "a default location needs city, state and country code".to_string(),
                ));
            }
        }
    };

    let weather = WeatherConfig {
        api_key: optional("BREWER_WEATHER_API_KEY"),
        weather_api_url: or_default("BREWER_WEATHER_API_URL", DEFAULT_WEATHER_API_URL),
        geocoding_api_url: or_default("BREWER_GEOCODING_API_URL", DEFAULT_GEOCODING_API_URL),
        ip_lookup_api_url: or_default("BREWER_IP_LOOKUP_API_URL", DEFAULT_IP_LOOKUP_API_URL),
        default_location,
        min_temp_for_iced: parse_i32("BREWER_MIN_TEMP_FOR_ICED", "0")?,
        request_timeout_secs: parse_nonzero_u64("BREWER_HTTP_TIMEOUT_SECS", "5")?,
    };

    let use_shared_counter = parse_bool("BREWER_USE_SHARED_COUNTER", false)?;
    let database_url = optional("DATABASE_URL");
    if use_shared_counter && database_url.is_none() {
        return Err(ConfigError::MissingEnvVar("DATABASE_URL".to_string()));
    }

    let counter_timeout_ms = parse_nonzero_u64("BREWER_COUNTER_TIMEOUT_MS", "2000")?;
    let db_max_connections = parse_u32("BREWER_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("BREWER_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("BREWER_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        weather,
        use_shared_counter,
        database_url,
        counter_timeout_ms,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BREWER_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
