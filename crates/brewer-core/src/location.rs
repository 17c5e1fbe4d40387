use std::collections::HashMap;

use serde::Deserialize;

/// Where a caller is, coarse enough to geocode.
///
/// Every field is required and non-empty; use [`LocationDetails::new`] to
/// build one from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocationDetails {
    pub city: String,
    pub state: String,
    pub country_code: String,
}

impl LocationDetails {
    /// Builds a location, trimming each part. Returns `None` if any part is
    /// blank.
    #[must_use]
    pub fn new(city: &str, state: &str, country_code: &str) -> Option<Self> {
        let (city, state, country_code) = (city.trim(), state.trim(), country_code.trim());
        if city.is_empty() || state.is_empty() || country_code.is_empty() {
            return None;
        }

        Some(Self {
            city: city.to_owned(),
            state: state.to_owned(),
            country_code: country_code.to_owned(),
        })
    }

    /// The `city,state,country` triple used as a geocoding query.
    #[must_use]
    pub fn geocode_query(&self) -> String {
        format!("{},{},{}", self.city, self.state, self.country_code)
    }
}

/// A point on the globe as returned by the geocoding API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoCoordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub local_names: Option<HashMap<String, String>>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}
