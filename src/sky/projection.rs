//! Stereographic projection onto the chart plane
//!
//! For a unit direction `u` and projection center `c`:
//!
//! ```text
//! (x, y) = k · (u·east, u·north) / (1 + u·c)
//! ```
//!
//! `north` points from the center toward the celestial north pole and
//! `east` completes the frame so that east is on the left, as seen when
//! looking up. With a 180° field (`k = 1`) the great circle 90° from the
//! center, the horizon when centered on the zenith, maps to the unit
//! circle. Points beyond it land outside; the antipode goes to infinity.

use nalgebra::Vector3;

/// Field of view spanned by the unit circle
pub const FIELD_OF_VIEW_DEGREES: f64 = 180.0;

/// Below this the center is treated as a celestial pole
const POLE_EPSILON: f64 = 1e-12;

/// Stereographic projection centered on a direction
#[derive(Debug, Clone, Copy)]
pub struct StereographicProjection {
    center: Vector3<f64>,
    east: Vector3<f64>,
    north: Vector3<f64>,
    scale: f64,
}

impl StereographicProjection {
    /// Projection with a 180° field of view
    pub fn centered_on(center: Vector3<f64>) -> Self {
        Self::with_field_of_view(center, FIELD_OF_VIEW_DEGREES)
    }

    /// Projection whose unit circle spans `fov_degrees`
    pub fn with_field_of_view(center: Vector3<f64>, fov_degrees: f64) -> Self {
        let c = center.normalize();
        let rho = c.x.hypot(c.y);

        // At a pole the east/north frame degenerates; use the limit as the
        // center approaches the pole along RA 0h
        let (east, north) = if rho < POLE_EPSILON {
            (-Vector3::y(), Vector3::new(-c.z.signum(), 0.0, 0.0))
        } else {
            // East on the left as seen from inside the sphere
            let east = c.cross(&Vector3::z()).normalize();
            (east, east.cross(&c))
        };

        Self {
            center: c,
            east,
            north,
            scale: 1.0 / (fov_degrees / 4.0).to_radians().tan(),
        }
    }

    pub fn center(&self) -> Vector3<f64> {
        self.center
    }

    /// Project a direction (any length) to plane coordinates
    pub fn project(&self, direction: &Vector3<f64>) -> (f64, f64) {
        let u = direction.normalize();
        let k = self.scale / (1.0 + u.dot(&self.center));
        (k * u.dot(&self.east), k * u.dot(&self.north))
    }
}
