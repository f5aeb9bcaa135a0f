//! Centralized constants for the star-hex crate
//!
//! Physical constants, external endpoints and cache names shared across
//! modules.

/// Geodetic constants
pub mod geo {
    /// WGS84 equatorial radius in kilometers
    pub const WGS84_RADIUS_KM: f64 = 6378.137;

    /// WGS84 inverse flattening
    pub const WGS84_INVERSE_FLATTENING: f64 = 298.257_223_563;
}

/// Astronomical constants
pub mod astro {
    /// Julian date of the J2000.0 epoch (TT)
    pub const J2000: f64 = 2_451_545.0;

    /// Julian date of the Hipparcos catalog epoch J1991.25 (TT)
    pub const HIPPARCOS_EPOCH: f64 = 2_448_349.0625;

    /// Days per Julian century
    pub const DAYS_PER_CENTURY: f64 = 36_525.0;

    /// Days per Julian year
    pub const DAYS_PER_YEAR: f64 = 365.25;

    /// Kilometers per astronomical unit
    pub const AU_KM: f64 = 149_597_870.700;

    /// Radians per arcsecond
    pub const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / 648_000.0;

    /// TT - TAI in seconds
    pub const TT_MINUS_TAI_SECS: f64 = 32.184;

    /// Parallax floor in milliarcseconds for stars with no usable parallax
    pub const MIN_PARALLAX_MAS: f64 = 1.0e-6;
}

/// External data and API endpoints
pub mod api {
    /// Photon geocoding API (komoot)
    pub const PHOTON_URL: &str = "https://photon.komoot.io/api";

    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// Hipparcos main catalog (CDS)
    pub const HIPPARCOS_URL: &str = "https://cdsarc.cds.unistra.fr/ftp/cats/I/239/hip_main.dat";

    /// Stellarium modern sky culture constellation outlines
    pub const CONSTELLATIONS_URL: &str = "https://raw.githubusercontent.com/Stellarium/stellarium/master/skycultures/modern_st/constellationship.fab";

    /// User agent sent to every external service
    pub const USER_AGENT: &str = concat!("star-hex/", env!("CARGO_PKG_VERSION"));
}

/// Cache settings
pub mod cache {
    /// Application directory name under the user cache directory
    pub const APP_DIR_NAME: &str = "star-hex";

    /// Cached Hipparcos catalog file name
    pub const HIPPARCOS_FILE: &str = "hip_main.dat";

    /// Cached constellation outline file name
    pub const CONSTELLATIONS_FILE: &str = "constellationship.fab";

    /// JPL ephemeris kernel opened through the starfield loader
    pub const EPHEMERIS_KERNEL: &str = "de421.bsp";

    /// Magnitude limit passed to the Hipparcos reader; above every entry
    pub const CATALOG_MAGNITUDE_LIMIT: f64 = 99.0;

    /// Timeout for dataset downloads in seconds
    pub const DOWNLOAD_TIMEOUT_SECS: u64 = 300;
}
