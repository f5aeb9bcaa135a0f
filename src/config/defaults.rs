//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::api::{CONSTELLATIONS_URL, HIPPARCOS_URL};

/// Default chart side length in inches
pub const DEFAULT_CHART_SIZE_INCHES: f64 = 13.0;

/// Default rendering resolution in dots per inch
pub const DEFAULT_DPI: u32 = 100;

/// Default number of animation frames
pub const DEFAULT_FRAMES: usize = 24;

/// Default time step between animation frames in hours
pub const DEFAULT_STEP_HOURS: i64 = 1;

/// Default delay between animation frames in milliseconds
pub const DEFAULT_FRAME_DELAY_MS: u32 = 200;

/// Default geocoding backend
pub const DEFAULT_GEOCODER: &str = "photon";

/// Default geocoding timeout in seconds
pub const DEFAULT_GEOCODER_TIMEOUT_SECS: u64 = 10;

/// Default Hipparcos catalog URL
pub const DEFAULT_HIPPARCOS_URL: &str = HIPPARCOS_URL;

/// Default constellation outline URL
pub const DEFAULT_CONSTELLATIONS_URL: &str = CONSTELLATIONS_URL;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";
