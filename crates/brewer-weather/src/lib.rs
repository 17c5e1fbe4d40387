pub mod client;
pub mod error;
pub mod service;
pub mod types;

pub use client::LookupClient;
pub use error::WeatherError;
pub use service::WeatherService;
