//! Earth orientation and observer geometry
//!
//! Rotates a point fixed on the WGS84 ellipsoid into the J2000 celestial
//! frame:
//!
//! ```text
//! r_J2000 = Pᵀ · Nᵀ · R3(-GAST) · r_terrestrial
//! ```
//!
//! with IAU 1976 precession `P`, a short IAU 1980 nutation series `N`
//! (largest four terms, good to about an arcsecond) and Greenwich apparent
//! sidereal time. Polar motion is ignored.

use crate::constants::astro::ARCSEC_TO_RAD;
use crate::constants::geo::{WGS84_INVERSE_FLATTENING, WGS84_RADIUS_KM};
use crate::sky::time::{centuries_since_j2000, julian_date_tt, julian_date_utc};
use crate::sky::{rot_x, rot_y, rot_z, unit_vector};
use chrono::{DateTime, Utc};
use nalgebra::{Matrix3, Vector3};

/// Mean obliquity of the ecliptic (IAU 1980), radians
pub fn mean_obliquity(t: f64) -> f64 {
    (84_381.448 - 46.8150 * t - 0.00059 * t * t + 0.001_813 * t * t * t) * ARCSEC_TO_RAD
}

/// Nutation in longitude and obliquity, radians
pub fn nutation(t: f64) -> (f64, f64) {
    let omega = (125.044_52 - 1_934.136_261 * t).to_radians();
    let sun = (280.4665 + 36_000.7698 * t).to_radians();
    let moon = (218.3165 + 481_267.8813 * t).to_radians();

    let dpsi = -17.20 * omega.sin() - 1.32 * (2.0 * sun).sin() - 0.23 * (2.0 * moon).sin()
        + 0.21 * (2.0 * omega).sin();
    let deps = 9.20 * omega.cos() + 0.57 * (2.0 * sun).cos() + 0.10 * (2.0 * moon).cos()
        - 0.09 * (2.0 * omega).cos();

    (dpsi * ARCSEC_TO_RAD, deps * ARCSEC_TO_RAD)
}

/// IAU 1976 precession, J2000 mean equator to mean equator of date
pub fn precession_matrix(t: f64) -> Matrix3<f64> {
    let t2 = t * t;
    let t3 = t2 * t;
    let zeta = (2306.2181 * t + 0.30188 * t2 + 0.017_998 * t3) * ARCSEC_TO_RAD;
    let z = (2306.2181 * t + 1.094_68 * t2 + 0.018_203 * t3) * ARCSEC_TO_RAD;
    let theta = (2004.3109 * t - 0.426_65 * t2 - 0.041_833 * t3) * ARCSEC_TO_RAD;

    rot_z(-z) * rot_y(theta) * rot_z(-zeta)
}

/// Nutation, mean equator of date to true equator of date
pub fn nutation_matrix(t: f64) -> Matrix3<f64> {
    let eps = mean_obliquity(t);
    let (dpsi, deps) = nutation(t);
    rot_x(-(eps + deps)) * rot_z(-dpsi) * rot_x(eps)
}

/// Greenwich mean sidereal time (IAU 1982), radians in [0, 2π)
pub fn gmst(jd_ut1: f64) -> f64 {
    let t = centuries_since_j2000(jd_ut1);
    let degrees = 280.460_618_37 + 360.985_647_366_29 * (jd_ut1 - crate::constants::astro::J2000)
        + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    degrees.rem_euclid(360.0).to_radians()
}

/// Greenwich apparent sidereal time, radians
pub fn gast(jd_ut1: f64, t_tt: f64) -> f64 {
    let (dpsi, deps) = nutation(t_tt);
    let equation_of_equinoxes = dpsi * (mean_obliquity(t_tt) + deps).cos();
    (gmst(jd_ut1) + equation_of_equinoxes).rem_euclid(std::f64::consts::TAU)
}

/// Rotation from the terrestrial frame to the J2000 celestial frame
pub fn terrestrial_to_celestial(instant: DateTime<Utc>) -> Matrix3<f64> {
    let t = centuries_since_j2000(julian_date_tt(instant));
    let earth_rotation = rot_z(-gast(julian_date_utc(instant), t));
    precession_matrix(t).transpose() * nutation_matrix(t).transpose() * earth_rotation
}

/// Observer on the WGS84 ellipsoid at sea level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub lat_degrees: f64,
    pub lng_degrees: f64,
}

impl Observer {
    pub fn new(lat_degrees: f64, lng_degrees: f64) -> Self {
        Self {
            lat_degrees,
            lng_degrees,
        }
    }

    /// Geocentric position in the terrestrial frame, kilometers
    pub fn terrestrial_position_km(&self) -> Vector3<f64> {
        let f = 1.0 / WGS84_INVERSE_FLATTENING;
        let e2 = f * (2.0 - f);
        let lat = self.lat_degrees.to_radians();
        let lng = self.lng_degrees.to_radians();
        let n = WGS84_RADIUS_KM / (1.0 - e2 * lat.sin().powi(2)).sqrt();

        Vector3::new(
            n * lat.cos() * lng.cos(),
            n * lat.cos() * lng.sin(),
            n * (1.0 - e2) * lat.sin(),
        )
    }

    /// Local vertical (altitude 90°) in the terrestrial frame
    pub fn terrestrial_zenith(&self) -> Vector3<f64> {
        unit_vector(self.lng_degrees.to_radians(), self.lat_degrees.to_radians())
    }

    /// Zenith direction in the J2000 celestial frame
    pub fn zenith_at(&self, instant: DateTime<Utc>) -> Vector3<f64> {
        terrestrial_to_celestial(instant) * self.terrestrial_zenith()
    }

    /// Geocentric position in the J2000 celestial frame, kilometers
    pub fn geocentric_position_km(&self, instant: DateTime<Utc>) -> Vector3<f64> {
        terrestrial_to_celestial(instant) * self.terrestrial_position_km()
    }
}
