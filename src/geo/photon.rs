//! Photon geocoding backend (komoot)
//!
//! Photon answers with a GeoJSON feature collection; coordinates come
//! back as `[lon, lat]`.

use crate::constants::api::PHOTON_URL;
use crate::error::{Error, Result};
use crate::geo::{http_client, GeoBackend, GeoLocation};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Photon geocoding backend
#[derive(Debug, Clone)]
pub struct PhotonBackend {
    client: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: [f64; 2],
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    name: Option<String>,
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

impl Properties {
    /// "name, city, state, country" with missing and repeated parts skipped
    fn display_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for part in [&self.name, &self.city, &self.state, &self.country]
            .into_iter()
            .flatten()
        {
            if !parts.contains(&part.as_str()) {
                parts.push(part);
            }
        }

        if parts.is_empty() {
            "Unknown Location".to_string()
        } else {
            parts.join(", ")
        }
    }
}

impl PhotonBackend {
    /// Create a new Photon backend
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
        })
    }

    fn first_location(collection: FeatureCollection) -> Option<GeoLocation> {
        collection.features.into_iter().next().map(|feature| {
            let [lng, lat] = feature.geometry.coordinates;
            GeoLocation {
                lat,
                lng,
                display_name: feature.properties.display_name(),
            }
        })
    }
}

impl GeoBackend for PhotonBackend {
    fn name(&self) -> &'static str {
        "photon"
    }

    fn geocode(&self, query: &str) -> Result<Option<GeoLocation>> {
        let url = format!("{}/?q={}&limit=1", PHOTON_URL, urlencoding::encode(query));
        debug!(%url, "photon search");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| Error::Geo(format!("Photon request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geo(format!(
                "Photon returned status: {}",
                response.status()
            )));
        }

        let collection: FeatureCollection = response
            .json()
            .map_err(|e| Error::Geo(format!("Failed to parse Photon response: {}", e)))?;

        Ok(Self::first_location(collection))
    }
}
