//! Geocoding and timezone lookup
//!
//! Turns a place name into coordinates and finds the IANA timezone that
//! applies there.

pub mod nominatim;
pub mod photon;
pub mod timezone;

use crate::config::GeocoderConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A geocoded location result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Display name (address or description)
    pub display_name: String,
}

/// Trait for geocoding backends
pub trait GeoBackend {
    /// Backend name (e.g., "photon")
    fn name(&self) -> &'static str;

    /// Geocode a location string to coordinates
    ///
    /// Returns the best match for the query, or None if not found
    fn geocode(&self, query: &str) -> Result<Option<GeoLocation>>;
}

/// Names of the available geocoding backends
pub fn available_geocoders() -> Vec<&'static str> {
    vec!["photon", "nominatim"]
}

/// Build the geocoding backend selected in config
pub fn get_geocoder(config: &GeocoderConfig) -> Result<Box<dyn GeoBackend>> {
    let timeout = Duration::from_secs(config.timeout_secs);
    match config.backend.to_lowercase().as_str() {
        "photon" => Ok(Box::new(photon::PhotonBackend::new(timeout)?)),
        "nominatim" => Ok(Box::new(nominatim::NominatimBackend::new(timeout)?)),
        other => Err(Error::Config(format!("Unknown geocoder: {}", other))),
    }
}

/// Build a blocking HTTP client with the crate's user agent
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent(crate::constants::api::USER_AGENT)
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Geo(format!("Failed to build HTTP client: {}", e)))
}
