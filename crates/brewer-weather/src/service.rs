use std::net::IpAddr;

use async_trait::async_trait;
use brewer_core::{LocationDetails, WeatherConfig, WeatherSource};

use crate::client::LookupClient;
use crate::error::WeatherError;

/// Weather check backed by the lookup APIs.
///
/// Runs IP lookup, geocoding, and the current-weather fetch in sequence and
/// compares the temperature with the iced-drink threshold. Any failure along
/// the way means "not too hot".
pub struct WeatherService {
    /// `None` when no API key is configured.
    client: Option<LookupClient>,
    default_location: Option<LocationDetails>,
    iced_threshold: i32,
}

impl WeatherService {
    /// Builds the service from configuration. Without an API key, or when
    /// the lookup client cannot be built, no client is kept and every check
    /// answers `false`.
    #[must_use]
    pub fn from_config(config: &WeatherConfig) -> Self {
        let client = match config.api_key.as_deref() {
            Some(key) => match LookupClient::from_config(config, key) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "weather lookup client unavailable; weather personalization disabled"
                    );
                    None
                }
            },
            None => {
                tracing::info!("no weather API key configured; weather personalization disabled");
                None
            }
        };

        Self::new(
            client,
            config.default_location.clone(),
            config.iced_threshold(),
        )
    }

    #[must_use]
    pub fn new(
        client: Option<LookupClient>,
        default_location: Option<LocationDetails>,
        iced_threshold: i32,
    ) -> Self {
        Self {
            client,
            default_location,
            iced_threshold,
        }
    }

    async fn check(
        &self,
        client: &LookupClient,
        caller_ip: Option<IpAddr>,
    ) -> Result<bool, WeatherError> {
        let location = self.locate(client, caller_ip).await?;
        let at = client.geocode(&location).await?;
        let temperature = client.current_temperature(&at).await?;

        tracing::debug!(
            city = %location.city,
            temperature,
            threshold = self.iced_threshold,
            "current temperature"
        );
        Ok(temperature > f64::from(self.iced_threshold))
    }

    async fn locate(
        &self,
        client: &LookupClient,
        caller_ip: Option<IpAddr>,
    ) -> Result<LocationDetails, WeatherError> {
        match caller_ip.map(|ip| ip.to_canonical()) {
            Some(ip) if !ip.is_loopback() => client.locate_ip(ip).await,
            _ => self
                .default_location
                .clone()
                .ok_or(WeatherError::NoDefaultLocation),
        }
    }
}

#[async_trait]
impl WeatherSource for WeatherService {
    async fn too_hot_for_hot_drink(&self, caller_ip: Option<IpAddr>) -> bool {
        let Some(client) = &self.client else {
            return false;
        };

        match self.check(client, caller_ip).await {
            Ok(too_hot) => too_hot,
            Err(e) => {
                tracing::warn!(error = %e, "weather lookup failed; assuming it is not too hot");
                false
            }
        }
    }
}
