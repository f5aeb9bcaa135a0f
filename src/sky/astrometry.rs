//! Astrometric star directions
//!
//! Catalog positions are propagated along their space motion from the
//! Hipparcos epoch and viewed from the observer's barycentric position.
//! Radial velocity is taken as zero and light-time is ignored (both are
//! far below chart resolution).

use crate::constants::astro::{ARCSEC_TO_RAD, DAYS_PER_YEAR, HIPPARCOS_EPOCH, MIN_PARALLAX_MAS};
use crate::data::hipparcos::Astrometry;
use nalgebra::Vector3;

/// Barycentric position (AU) and velocity (AU/day) at the catalog epoch
pub fn star_state(star: &Astrometry) -> (Vector3<f64>, Vector3<f64>) {
    let parallax_mas = if star.parallax_mas > 0.0 {
        star.parallax_mas
    } else {
        MIN_PARALLAX_MAS
    };
    let distance = 1.0 / (parallax_mas * 1e-3 * ARCSEC_TO_RAD).sin();

    let ra = star.ra_degrees.to_radians();
    let dec = star.dec_degrees.to_radians();
    let (sin_ra, cos_ra) = ra.sin_cos();
    let (sin_dec, cos_dec) = dec.sin_cos();

    let position = Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec) * distance;

    // Proper motion over parallax is transverse velocity in AU per year
    let pm_ra = star.ra_mas_per_year / (parallax_mas * DAYS_PER_YEAR);
    let pm_dec = star.dec_mas_per_year / (parallax_mas * DAYS_PER_YEAR);
    let velocity = Vector3::new(
        -pm_ra * sin_ra - pm_dec * sin_dec * cos_ra,
        pm_ra * cos_ra - pm_dec * sin_dec * sin_ra,
        pm_dec * cos_dec,
    );

    (position, velocity)
}

/// Direction from `observer` (barycentric, AU) to the star at `jd_tt`
pub fn star_direction(star: &Astrometry, jd_tt: f64, observer: &Vector3<f64>) -> Vector3<f64> {
    let (position, velocity) = star_state(star);
    (position + velocity * (jd_tt - HIPPARCOS_EPOCH) - observer).normalize()
}
