//! Solar-system ephemeris
//!
//! Only the Earth's barycentric position is needed, to shift star
//! positions for annual parallax. It comes from a JPL SPK kernel
//! (DE421 by default) that the starfield loader downloads once into its
//! cache directory.

use crate::error::{Error, Result};
use nalgebra::Vector3;
use starfield::jplephem_ext::SpiceKernelExt;
use starfield::Loader;
use std::cell::RefCell;
use tracing::info;

/// Source of the Earth's position
pub trait Ephemeris {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Earth's barycentric position in AU, ICRS axes
    fn earth_barycentric(&self, jd_tdb: f64) -> Result<Vector3<f64>>;
}

type EarthPosition = Box<dyn FnMut(f64) -> Result<Vector3<f64>>>;

/// Earth positions computed from a JPL kernel
pub struct JplKernel {
    name: String,
    earth: RefCell<EarthPosition>,
}

impl JplKernel {
    /// Open `file_name` through the starfield loader, downloading it on
    /// first use
    pub fn open(file_name: &str) -> Result<Self> {
        let loader = Loader::new();
        let ts = loader.timescale();
        let mut kernel = loader
            .open(file_name)
            .map_err(|e| kernel_unavailable(file_name, e))?;
        info!(kernel = file_name, "ephemeris kernel opened");

        let name = file_name.to_string();
        let earth: EarthPosition = Box::new(move |jd_tdb| {
            let t = ts.tdb_jd(jd_tdb);
            let state = kernel
                .compute_at("earth", &t)
                .map_err(|e| kernel_unavailable(&name, e))?;
            Ok(Vector3::new(state.position.x, state.position.y, state.position.z))
        });

        Ok(Self {
            name: file_name.to_string(),
            earth: RefCell::new(earth),
        })
    }
}

fn kernel_unavailable(kernel: &str, e: impl std::fmt::Display) -> Error {
    Error::DatasetUnavailable(format!("ephemeris kernel {}: {}", kernel, e))
}

impl Ephemeris for JplKernel {
    fn name(&self) -> &str {
        &self.name
    }

    fn earth_barycentric(&self, jd_tdb: f64) -> Result<Vector3<f64>> {
        let mut earth = self.earth.borrow_mut();
        (*earth)(jd_tdb)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::constants::astro::J2000;
    use crate::constants::cache::EPHEMERIS_KERNEL;

    /// Earth parked 1 AU from the barycenter along +x
    pub(crate) struct FixedEarth;

    impl Ephemeris for FixedEarth {
        fn name(&self) -> &str {
            "fixed"
        }

        fn earth_barycentric(&self, _jd_tdb: f64) -> Result<Vector3<f64>> {
            Ok(Vector3::x())
        }
    }

    #[test]
    fn test_ephemeris_as_trait_object() {
        let ephemeris: Box<dyn Ephemeris> = Box::new(FixedEarth);
        assert_eq!(ephemeris.name(), "fixed");
        assert_eq!(ephemeris.earth_barycentric(J2000).unwrap(), Vector3::x());
    }

    #[test]
    #[ignore = "Requires network access to download the DE421 kernel"]
    fn test_de421_earth_distance() {
        let kernel = JplKernel::open(EPHEMERIS_KERNEL).unwrap();
        for day in (0..365).step_by(30) {
            let r = kernel.earth_barycentric(J2000 + day as f64).unwrap().norm();
            assert!((0.98..=1.02).contains(&r), "distance {} on day {}", r, day);
        }
    }

    #[test]
    #[ignore = "Requires network access to download the DE421 kernel"]
    fn test_de421_perihelion_in_early_january() {
        let kernel = JplKernel::open(EPHEMERIS_KERNEL).unwrap();
        let january = kernel.earth_barycentric(J2000 + 2.0).unwrap().norm();
        let july = kernel.earth_barycentric(J2000 + 184.0).unwrap().norm();
        assert!(january < july);
    }

    #[test]
    #[ignore = "Requires network access to download the DE421 kernel"]
    fn test_unknown_kernel_is_unavailable() {
        let result = JplKernel::open("no-such-kernel.bsp");
        assert!(matches!(result, Err(Error::DatasetUnavailable(_))));
    }
}
