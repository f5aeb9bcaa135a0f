//! Celestial data resolver
//!
//! Turns a (location, local time) pair into every catalog star projected
//! onto a stereographic plane centered on the observer's zenith, plus the
//! constellation edges.

use crate::config::Config;
use crate::constants::astro::AU_KM;
use crate::constants::cache::EPHEMERIS_KERNEL;
use crate::data::{DatasetLoader, Datasets};
use crate::error::{Error, Result};
use crate::geo::timezone::{localize, to_local, TimezoneLookup};
use crate::geo::{get_geocoder, GeoBackend};
use crate::sky::astrometry::star_direction;
use crate::sky::earth::Observer;
use crate::sky::ephemeris::{Ephemeris, JplKernel};
use crate::sky::projection::StereographicProjection;
use crate::sky::time::{julian_date_tt, parse_when};
use crate::sky::{Observation, ProjectedStar, Site, SkyView};
use chrono::{DateTime, Utc};
use std::cell::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Where the resolver gets its reference datasets
enum DatasetSource {
    /// Download/parse on first use, shared process-wide
    Loader(DatasetLoader),
    /// Already in memory
    Loaded(Arc<Datasets>),
}

/// Resolves chart requests into projected sky views
///
/// Geocoded sites are memoized per location string, so an animation
/// geocodes once and recomputes only the time-dependent steps per frame.
pub struct Resolver {
    geocoder: Box<dyn GeoBackend>,
    timezones: TimezoneLookup,
    /// Opened on the first observation
    ephemeris: OnceCell<Box<dyn Ephemeris>>,
    source: DatasetSource,
    sites: HashMap<String, Site>,
}

impl Resolver {
    /// Resolver that loads datasets through `loader` on first use
    pub fn new(geocoder: Box<dyn GeoBackend>, loader: DatasetLoader) -> Self {
        Self::with_source(geocoder, DatasetSource::Loader(loader))
    }

    /// Resolver over datasets and an ephemeris already in memory
    pub fn with_datasets(
        geocoder: Box<dyn GeoBackend>,
        datasets: Arc<Datasets>,
        ephemeris: Box<dyn Ephemeris>,
    ) -> Self {
        let resolver = Self::with_source(geocoder, DatasetSource::Loaded(datasets));
        let _ = resolver.ephemeris.set(ephemeris);
        resolver
    }

    fn with_source(geocoder: Box<dyn GeoBackend>, source: DatasetSource) -> Self {
        Self {
            geocoder,
            timezones: TimezoneLookup::new(),
            ephemeris: OnceCell::new(),
            source,
            sites: HashMap::new(),
        }
    }

    /// Resolver built from the user's configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let geocoder = get_geocoder(&config.geocoder)?;
        let loader = DatasetLoader::new(&config.data, Config::cache_dir()?);
        Ok(Self::new(geocoder, loader))
    }

    /// Full pipeline for a location string and a `YYYY-MM-DD HH:MM` local
    /// time
    pub fn resolve(&mut self, location: &str, when: &str) -> Result<SkyView> {
        let local = parse_when(when)?;
        let site = self.resolve_site(location)?;
        let utc = localize(local, site.timezone)?;
        self.observe(&site, utc)
    }

    /// Geocode a location and find its timezone
    pub fn resolve_site(&mut self, location: &str) -> Result<Site> {
        if let Some(site) = self.sites.get(location) {
            debug!(location, "site cache hit");
            return Ok(site.clone());
        }

        let geo = self
            .geocoder
            .geocode(location)?
            .ok_or_else(|| Error::LocationNotFound(location.to_string()))?;
        info!(
            location,
            geocoder = self.geocoder.name(),
            lat = geo.lat,
            lng = geo.lng,
            display_name = %geo.display_name,
            "geocoded"
        );

        let timezone = self.timezones.timezone_at(geo.lat, geo.lng)?;
        info!(location, timezone = timezone.name(), "timezone resolved");

        let site = Site {
            label: location.to_string(),
            location: geo,
            timezone,
        };
        self.sites.insert(location.to_string(), site.clone());
        Ok(site)
    }

    /// Project every catalog star for a site at a UTC instant
    pub fn observe(&self, site: &Site, utc: DateTime<Utc>) -> Result<SkyView> {
        let datasets = self.datasets()?;
        datasets.verify_edges()?;

        let ephemeris = self.ephemeris()?;

        let observer = Observer::new(site.location.lat, site.location.lng);
        // TDB and TT differ by under 2 ms
        let jd_tt = julian_date_tt(utc);

        let projection = StereographicProjection::centered_on(observer.zenith_at(utc));
        let observer_position = ephemeris.earth_barycentric(jd_tt)?
            + observer.geocentric_position_km(utc) / AU_KM;

        // Stars without astrometry get a non-finite position, which every
        // chart filter drops
        let stars: Vec<ProjectedStar> = datasets
            .catalog
            .iter()
            .map(|star| {
                let (x, y) = star.astrometry.as_ref().map_or((f64::NAN, f64::NAN), |a| {
                    projection.project(&star_direction(a, jd_tt, &observer_position))
                });
                ProjectedStar {
                    hip: star.hip,
                    magnitude: star.magnitude,
                    x,
                    y,
                }
            })
            .collect();

        let (edge_starts, edge_ends) = datasets.edge_endpoints();
        debug!(
            stars = stars.len(),
            edges = edge_starts.len(),
            ephemeris = ephemeris.name(),
            %utc,
            "projected"
        );

        let observation = Observation {
            local: to_local(utc, site.timezone),
            utc,
        };
        Ok(SkyView::new(
            site.clone(),
            observation,
            stars,
            edge_starts,
            edge_ends,
        ))
    }

    fn ephemeris(&self) -> Result<&dyn Ephemeris> {
        if let Some(ephemeris) = self.ephemeris.get() {
            return Ok(ephemeris.as_ref());
        }

        let opened: Box<dyn Ephemeris> = Box::new(JplKernel::open(EPHEMERIS_KERNEL)?);
        Ok(self.ephemeris.get_or_init(|| opened).as_ref())
    }

    fn datasets(&self) -> Result<Arc<Datasets>> {
        match &self.source {
            DatasetSource::Loaded(datasets) => Ok(Arc::clone(datasets)),
            DatasetSource::Loader(loader) => Datasets::shared(loader),
        }
    }
}
