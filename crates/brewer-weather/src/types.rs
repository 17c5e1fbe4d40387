//! Response types for the lookup APIs.
//!
//! Only the fields the brew decision needs are modelled; everything else in
//! the provider payloads is ignored by serde.

use serde::Deserialize;

/// IP-geolocation payload (`ipapi.co` shape, `ip-api.com` field names also
/// accepted).
///
/// Every field is optional here because providers answer failed lookups with
/// a 200 and an error object; completeness is checked by the client.
#[derive(Debug, Deserialize)]
pub struct IpLocation {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, alias = "region")]
    pub state: Option<String>,
    #[serde(default, alias = "countryCode")]
    pub country_code: Option<String>,
}

/// Current-weather payload. Only `main.temp` is load-bearing.
#[derive(Debug, Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub main: Option<MainReadings>,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    /// Degrees Celsius when requested with `units=metric`.
    #[serde(default)]
    pub temp: Option<f64>,
}
