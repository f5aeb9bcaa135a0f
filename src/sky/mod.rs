//! Observer-relative star positions
//!
//! This module handles:
//! - Local time parsing and time scales (UTC, TT)
//! - Earth orientation: precession, nutation, sidereal time
//! - The observer's barycentric position
//! - Stereographic projection centered on the zenith
//! - The resolver tying geocoding, timezones and datasets together

pub mod astrometry;
pub mod earth;
pub mod ephemeris;
pub mod projection;
pub mod resolver;
pub mod time;

use crate::geo::GeoLocation;
use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use nalgebra::{Matrix3, Vector3};
use std::collections::HashMap;

pub use resolver::Resolver;

/// Unit vector for spherical angles given in radians
pub fn unit_vector(lon: f64, lat: f64) -> Vector3<f64> {
    Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// (longitude, latitude) in radians, longitude in [0, 2π)
pub fn spherical(v: &Vector3<f64>) -> (f64, f64) {
    let lon = v.y.atan2(v.x).rem_euclid(std::f64::consts::TAU);
    let lat = (v.z / v.norm()).asin();
    (lon, lat)
}

/// Frame rotation about the x axis
pub fn rot_x(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

/// Frame rotation about the y axis
pub fn rot_y(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c)
}

/// Frame rotation about the z axis
pub fn rot_z(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

/// A resolved observing site
#[derive(Debug, Clone)]
pub struct Site {
    /// The location string as the user typed it
    pub label: String,
    pub location: GeoLocation,
    pub timezone: Tz,
}

/// An observation instant, kept both as local wall clock and UTC
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub local: NaiveDateTime,
    pub utc: DateTime<Utc>,
}

/// A catalog star placed on the projection plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedStar {
    pub hip: u32,
    pub magnitude: Option<f64>,
    pub x: f64,
    pub y: f64,
}

/// Every catalog star projected for one site and instant, plus the
/// constellation edges as parallel start/end identifier lists
#[derive(Debug, Clone)]
pub struct SkyView {
    pub site: Site,
    pub observation: Observation,
    pub stars: Vec<ProjectedStar>,
    pub edge_starts: Vec<u32>,
    pub edge_ends: Vec<u32>,
    index: HashMap<u32, usize>,
}

impl SkyView {
    pub fn new(
        site: Site,
        observation: Observation,
        stars: Vec<ProjectedStar>,
        edge_starts: Vec<u32>,
        edge_ends: Vec<u32>,
    ) -> Self {
        let index = stars
            .iter()
            .enumerate()
            .map(|(i, star)| (star.hip, i))
            .collect();
        Self {
            site,
            observation,
            stars,
            edge_starts,
            edge_ends,
            index,
        }
    }

    /// Projected star by HIP number
    pub fn star(&self, hip: u32) -> Option<&ProjectedStar> {
        self.index.get(&hip).map(|&i| &self.stars[i])
    }

    /// Edges as (start, end) pairs
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.edge_starts
            .iter()
            .copied()
            .zip(self.edge_ends.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_rotation_is_orthonormal() {
        let m = rot_z(0.3) * rot_y(-1.1) * rot_x(2.0);
        let v = Vector3::new(0.2, -0.7, 0.4);
        let back = m.transpose() * (m * v);
        assert_abs_diff_eq!(back.x, v.x, epsilon = 1e-12);
        assert_abs_diff_eq!(back.y, v.y, epsilon = 1e-12);
        assert_abs_diff_eq!(back.z, v.z, epsilon = 1e-12);
        assert_abs_diff_eq!((m * v).norm(), v.norm(), epsilon = 1e-12);
    }

    #[test]
    fn test_frame_rotation_direction() {
        // Rotating the frame by +90° about z moves the x axis to -y
        let v = rot_z(FRAC_PI_2) * Vector3::new(1.0, 0.0, 0.0);
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_spherical_roundtrip() {
        let v = unit_vector(4.0, -0.5);
        let (lon, lat) = spherical(&v);
        assert_abs_diff_eq!(lon, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(lat, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_sky_view_lookup() {
        let site = Site {
            label: "Nowhere".to_string(),
            location: GeoLocation {
                lat: 0.0,
                lng: 0.0,
                display_name: "Nowhere".to_string(),
            },
            timezone: chrono_tz::UTC,
        };
        let utc = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        let observation = Observation {
            local: utc.naive_utc(),
            utc,
        };
        let stars = vec![
            ProjectedStar { hip: 1, magnitude: Some(1.0), x: 0.1, y: 0.2 },
            ProjectedStar { hip: 2, magnitude: None, x: 0.3, y: 0.4 },
        ];
        let view = SkyView::new(site, observation, stars, vec![1], vec![2]);

        assert_eq!(view.star(2).unwrap().x, 0.3);
        assert!(view.star(3).is_none());
        assert_eq!(view.edges().collect::<Vec<_>>(), vec![(1, 2)]);
    }
}
