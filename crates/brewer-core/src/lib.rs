pub mod app_config;
pub mod brew;
pub mod clock;
pub mod config;
pub mod counter;
pub mod location;
pub mod weather;

pub use app_config::{AppConfig, Environment, WeatherConfig};
pub use brew::{BrewError, BrewOutcome, CoffeeMachine};
pub use clock::{Clock, ClockError, FixedClock, SystemClock};
pub use config::{load_app_config, load_app_config_from_env};
pub use counter::{CallCounter, CounterError, InMemoryCallCounter};
pub use location::{GeoCoordinate, LocationDetails};
pub use weather::{FixedWeather, WeatherSource, DEFAULT_ICED_THRESHOLD_CELSIUS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
