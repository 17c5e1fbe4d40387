use thiserror::Error;

/// Errors from the weather lookup chain.
///
/// None of these ever reach an HTTP caller: [`crate::WeatherService`] turns
/// every one of them into "not too hot".
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Network failure, timeout, or non-2xx status from a lookup API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A configured base URL could not be parsed.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The IP lookup answered without a city, state, or country code.
    #[error("IP lookup for {ip} returned an incomplete location")]
    IncompleteLocation { ip: String },

    /// The caller is local and no default location is configured.
    #[error("no default location configured")]
    NoDefaultLocation,

    /// The geocoding API returned an empty result set.
    #[error("no geocoding match for '{query}'")]
    NoGeocodeMatch { query: String },

    /// The weather payload had no `main.temp` reading.
    #[error("weather response has no temperature")]
    MissingTemperature,
}
