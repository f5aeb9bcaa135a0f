//! Error types for star-hex

use thiserror::Error;

/// Main error type for star-hex operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Invalid time '{0}': expected YYYY-MM-DD HH:MM")]
    TimeParse(String),

    #[error("No timezone found at ({lat:.4}, {lng:.4})")]
    TimezoneResolution { lat: f64, lng: f64 },

    #[error("Local time {0} is ambiguous or does not exist (DST transition)")]
    AmbiguousLocalTime(String),

    #[error("Dataset unavailable: {0}")]
    DatasetUnavailable(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Geocoding error: {0}")]
    Geo(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for star-hex operations
pub type Result<T> = std::result::Result<T, Error>;
