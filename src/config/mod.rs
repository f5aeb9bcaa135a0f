//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/star-hex/config.toml
//!
//! A missing file means defaults. Nothing is written until the user sets
//! or resets a value through the `config` command.

pub mod defaults;

use crate::constants::cache::APP_DIR_NAME;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Canvas settings
    #[serde(default)]
    pub chart: ChartConfig,

    /// Animation settings
    #[serde(default)]
    pub animation: AnimationConfig,

    /// Geocoding settings
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Reference dataset locations
    #[serde(default)]
    pub data: DataConfig,

    /// Interactive display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Canvas settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Side length of the square canvas in inches
    #[serde(default = "default_size_inches")]
    pub size_inches: f64,

    /// Pixels per inch
    #[serde(default = "default_dpi")]
    pub dpi: u32,
}

/// Animation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Number of frames
    #[serde(default = "default_frames")]
    pub frames: usize,

    /// Observation time step between frames, in hours
    #[serde(default = "default_step_hours")]
    pub step_hours: i64,

    /// Delay between frames in the GIF, in milliseconds
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u32,
}

/// Geocoding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Backend name: "photon" or "nominatim"
    #[serde(default = "default_geocoder")]
    pub backend: String,

    /// Connect/read timeout in seconds
    #[serde(default = "default_geocoder_timeout")]
    pub timeout_secs: u64,
}

/// Reference dataset locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Hipparcos main catalog URL
    #[serde(default = "default_hipparcos_url")]
    pub hipparcos_url: String,

    /// Stellarium constellationship.fab URL
    #[serde(default = "default_constellations_url")]
    pub constellations_url: String,
}

/// Interactive display settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Image viewer command; empty uses the platform opener
    #[serde(default)]
    pub viewer: String,
}

// Default value functions for serde
fn default_size_inches() -> f64 {
    DEFAULT_CHART_SIZE_INCHES
}
fn default_dpi() -> u32 {
    DEFAULT_DPI
}
fn default_frames() -> usize {
    DEFAULT_FRAMES
}
fn default_step_hours() -> i64 {
    DEFAULT_STEP_HOURS
}
fn default_frame_delay_ms() -> u32 {
    DEFAULT_FRAME_DELAY_MS
}
fn default_geocoder() -> String {
    DEFAULT_GEOCODER.to_string()
}
fn default_geocoder_timeout() -> u64 {
    DEFAULT_GEOCODER_TIMEOUT_SECS
}
fn default_hipparcos_url() -> String {
    DEFAULT_HIPPARCOS_URL.to_string()
}
fn default_constellations_url() -> String {
    DEFAULT_CONSTELLATIONS_URL.to_string()
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            size_inches: default_size_inches(),
            dpi: default_dpi(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            step_hours: default_step_hours(),
            frame_delay_ms: default_frame_delay_ms(),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            backend: default_geocoder(),
            timeout_secs: default_geocoder_timeout(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            hipparcos_url: default_hipparcos_url(),
            constellations_url: default_constellations_url(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path, falling back to defaults
    /// when the file doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["chart", "size_inches"] => Some(self.chart.size_inches.to_string()),
            ["chart", "dpi"] => Some(self.chart.dpi.to_string()),

            ["animation", "frames"] => Some(self.animation.frames.to_string()),
            ["animation", "step_hours"] => Some(self.animation.step_hours.to_string()),
            ["animation", "frame_delay_ms"] => Some(self.animation.frame_delay_ms.to_string()),

            ["geocoder", "backend"] => Some(self.geocoder.backend.clone()),
            ["geocoder", "timeout_secs"] => Some(self.geocoder.timeout_secs.to_string()),

            ["data", "hipparcos_url"] => Some(self.data.hipparcos_url.clone()),
            ["data", "constellations_url"] => Some(self.data.constellations_url.clone()),

            ["display", "viewer"] => Some(self.display.viewer.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["chart", "size_inches"] => {
                let size: f64 = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid size value: {}", value)))?;
                if size <= 0.0 {
                    return Err(Error::Config(format!("Chart size must be positive: {}", value)));
                }
                self.chart.size_inches = size;
            }
            ["chart", "dpi"] => {
                self.chart.dpi = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid dpi value: {}", value)))?;
            }

            ["animation", "frames"] => {
                self.animation.frames = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid frame count: {}", value)))?;
            }
            ["animation", "step_hours"] => {
                self.animation.step_hours = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid step value: {}", value)))?;
            }
            ["animation", "frame_delay_ms"] => {
                self.animation.frame_delay_ms = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid delay value: {}", value)))?;
            }

            ["geocoder", "backend"] => {
                if !crate::geo::available_geocoders().contains(&value) {
                    return Err(Error::Config(format!("Unknown geocoder: {}", value)));
                }
                self.geocoder.backend = value.to_string();
            }
            ["geocoder", "timeout_secs"] => {
                self.geocoder.timeout_secs = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid timeout value: {}", value)))?;
            }

            ["data", "hipparcos_url"] => {
                self.data.hipparcos_url = value.to_string();
            }
            ["data", "constellations_url"] => {
                self.data.constellations_url = value.to_string();
            }

            ["display", "viewer"] => {
                self.display.viewer = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "chart.size_inches",
            "chart.dpi",
            "animation.frames",
            "animation.step_hours",
            "animation.frame_delay_ms",
            "geocoder.backend",
            "geocoder.timeout_secs",
            "data.hipparcos_url",
            "data.constellations_url",
            "display.viewer",
        ]
    }

    /// Canvas side length in pixels
    pub fn chart_size_px(&self) -> u32 {
        (self.chart.size_inches * self.chart.dpi as f64).round() as u32
    }

    /// Directory for downloaded datasets and preview images
    pub fn cache_dir() -> Result<PathBuf> {
        dirs::cache_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine cache directory".to_string()))
    }
}
