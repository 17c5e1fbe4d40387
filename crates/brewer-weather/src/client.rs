//! HTTP client for the three lookup APIs behind the weather check.
//!
//! Wraps `reqwest` with one method per lookup: IP → location, location →
//! coordinates, coordinates → current temperature. Each method either yields
//! the value the next step needs or a [`WeatherError`].

use std::net::IpAddr;
use std::time::Duration;

use brewer_core::{GeoCoordinate, LocationDetails, WeatherConfig};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::WeatherError;
use crate::types::{CurrentWeather, IpLocation};

/// Client for the IP-geolocation, geocoding, and current-weather APIs.
///
/// Use [`LookupClient::from_config`] in the service, or
/// [`LookupClient::with_urls`] to point at a mock server in tests.
pub struct LookupClient {
    client: Client,
    api_key: String,
    weather_url: Url,
    geocoding_url: Url,
    ip_lookup_url: Url,
}

impl LookupClient {
    /// Creates a client from the weather settings and a provider key.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`WeatherError::InvalidBaseUrl`] if a configured URL does not parse.
    pub fn from_config(config: &WeatherConfig, api_key: &str) -> Result<Self, WeatherError> {
        Self::with_urls(
            api_key,
            config.request_timeout_secs,
            &config.weather_api_url,
            &config.geocoding_api_url,
            &config.ip_lookup_api_url,
        )
    }

    /// Creates a client with explicit endpoint URLs.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`WeatherError::InvalidBaseUrl`] if a URL does not parse.
    pub fn with_urls(
        api_key: &str,
        timeout_secs: u64,
        weather_url: &str,
        geocoding_url: &str,
        ip_lookup_url: &str,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent("coffee-brewer/0.1")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            weather_url: parse_url(weather_url)?,
            geocoding_url: parse_url(geocoding_url)?,
            // The caller's address is appended as path segments, so the base
            // must be a directory.
            ip_lookup_url: parse_url(&format!("{}/", ip_lookup_url.trim_end_matches('/')))?,
        })
    }

    /// Resolves an IP address to a city, state, and country code.
    ///
    /// # Errors
    ///
    /// - [`WeatherError::Http`] on network failure or non-2xx status.
    /// - [`WeatherError::Deserialize`] if the body is not the expected JSON.
    /// - [`WeatherError::IncompleteLocation`] if any of the three parts is
    ///   missing or blank.
    pub async fn locate_ip(&self, ip: IpAddr) -> Result<LocationDetails, WeatherError> {
        let url = self.ip_lookup_url(ip);
        let payload: IpLocation = self.request_json(&url, "ip lookup").await?;

        LocationDetails::new(
            payload.city.as_deref().unwrap_or_default(),
            payload.state.as_deref().unwrap_or_default(),
            payload.country_code.as_deref().unwrap_or_default(),
        )
        .ok_or_else(|| WeatherError::IncompleteLocation { ip: ip.to_string() })
    }

    /// Geocodes a location, keeping only the best match.
    ///
    /// # Errors
    ///
    /// - [`WeatherError::Http`] on network failure or non-2xx status.
    /// - [`WeatherError::Deserialize`] if the body is not a list of places.
    /// - [`WeatherError::NoGeocodeMatch`] if the list is empty.
    pub async fn geocode(&self, location: &LocationDetails) -> Result<GeoCoordinate, WeatherError> {
        let url = self.geocoding_url(location);
        let places: Vec<GeoCoordinate> = self.request_json(&url, "geocoding").await?;

        places
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NoGeocodeMatch {
                query: location.geocode_query(),
            })
    }

    /// Fetches the current temperature in degrees Celsius.
    ///
    /// # Errors
    ///
    /// - [`WeatherError::Http`] on network failure or non-2xx status.
    /// - [`WeatherError::Deserialize`] if the body is not a weather payload.
    /// - [`WeatherError::MissingTemperature`] if `main.temp` is absent.
    pub async fn current_temperature(&self, at: &GeoCoordinate) -> Result<f64, WeatherError> {
        let url = self.current_weather_url(at);
        let weather: CurrentWeather = self.request_json(&url, "current weather").await?;

        weather
            .main
            .and_then(|main| main.temp)
            .ok_or(WeatherError::MissingTemperature)
    }

    fn ip_lookup_url(&self, ip: IpAddr) -> Url {
        let mut url = self.ip_lookup_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&ip.to_string()).push("json");
        }
        url
    }

    fn geocoding_url(&self, location: &LocationDetails) -> Url {
        let mut url = self.geocoding_url.clone();
        url.query_pairs_mut()
            .append_pair("q", &location.geocode_query())
            .append_pair("limit", "1")
            .append_pair("appid", &self.api_key);
        url
    }

    fn current_weather_url(&self, at: &GeoCoordinate) -> Url {
        let mut url = self.weather_url.clone();
        url.query_pairs_mut()
            .append_pair("lat", &at.latitude.to_string())
            .append_pair("lon", &at.longitude.to_string())
            .append_pair("appid", &self.api_key)
            .append_pair("units", "metric");
        url
    }

    /// Sends a GET request, asserts a 2xx status, and decodes the body.
    ///
    /// `context` names the lookup in errors; the URL itself is not used since
    /// it carries the API key.
    async fn request_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, WeatherError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let response = response
            .error_for_status()
            .map_err(reqwest::Error::without_url)?;
        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        serde_json::from_str(&body).map_err(|e| WeatherError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

fn parse_url(raw: &str) -> Result<Url, WeatherError> {
    Url::parse(raw).map_err(|e| WeatherError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
