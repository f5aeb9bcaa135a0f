//! Reference datasets: star catalog and constellation outlines
//!
//! Files are downloaded once into the user cache directory and parsed
//! once per process. The parsed datasets are shared read-only after the
//! first load.

pub mod download;
pub mod hipparcos;
pub mod stellarium;

use crate::config::DataConfig;
use crate::constants::cache::{CONSTELLATIONS_FILE, HIPPARCOS_FILE};
use crate::error::{Error, Result};
use hipparcos::StarCatalog;
use stellarium::Constellation;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

static SHARED: OnceLock<Arc<Datasets>> = OnceLock::new();

/// Where the reference files come from and where they are cached
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    pub cache_dir: PathBuf,
    pub hipparcos_url: String,
    pub constellations_url: String,
}

impl DatasetLoader {
    pub fn new(config: &DataConfig, cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            hipparcos_url: config.hipparcos_url.clone(),
            constellations_url: config.constellations_url.clone(),
        }
    }

    /// Download (if needed) and parse both datasets
    ///
    /// A cached file that fails to parse is deleted, so the next run
    /// downloads it again.
    pub fn load(&self) -> Result<Datasets> {
        let constellations_path =
            download::cached_file(&self.constellations_url, &self.cache_dir, CONSTELLATIONS_FILE)?;
        let constellations = discard_on_error(
            &constellations_path,
            open(&constellations_path).and_then(stellarium::parse_constellations),
        )?;

        let hipparcos_path =
            download::cached_file(&self.hipparcos_url, &self.cache_dir, HIPPARCOS_FILE)?;
        let catalog = discard_on_error(&hipparcos_path, StarCatalog::load(&hipparcos_path))?;
        info!(
            stars = catalog.len(),
            constellations = constellations.len(),
            "datasets loaded"
        );

        Ok(Datasets {
            catalog,
            constellations,
        })
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| download::io_unavailable("failed to open", path, e))
}

fn discard_on_error<T>(path: &Path, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        warn!(path = %path.display(), error = %e, "discarding unreadable cache entry");
        let _ = fs::remove_file(path);
    }
    result
}

/// Parsed reference data
#[derive(Debug, Default)]
pub struct Datasets {
    pub catalog: StarCatalog,
    pub constellations: Vec<Constellation>,
}

impl Datasets {
    /// Process-wide datasets, loaded on first use
    pub fn shared(loader: &DatasetLoader) -> Result<Arc<Datasets>> {
        if let Some(datasets) = SHARED.get() {
            return Ok(Arc::clone(datasets));
        }

        let loaded = Arc::new(loader.load()?);
        Ok(Arc::clone(SHARED.get_or_init(|| loaded)))
    }

    /// Parallel lists of edge start and end identifiers over all
    /// constellations
    pub fn edge_endpoints(&self) -> (Vec<u32>, Vec<u32>) {
        stellarium::edge_endpoints(&self.constellations)
    }

    /// Check that every edge endpoint is in the catalog
    ///
    /// Endpoints without astrometry still count; they are simply not drawn.
    pub fn verify_edges(&self) -> Result<()> {
        for constellation in &self.constellations {
            for &(a, b) in &constellation.edges {
                for hip in [a, b] {
                    if !self.catalog.contains(hip) {
                        return Err(Error::DataIntegrity(format!(
                            "constellation {} references HIP {} which is not in the catalog",
                            constellation.name, hip
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn sample_datasets() -> Datasets {
        let rows = hipparcos::scan_rows(hipparcos::tests::sample().as_bytes()).unwrap();
        Datasets {
            catalog: StarCatalog::from_rows(rows, &HashMap::new()),
            constellations: stellarium::parse_constellations("Tst 1 27989 11767\n".as_bytes())
                .unwrap(),
        }
    }

    fn offline_loader(cache_dir: &Path) -> DatasetLoader {
        DatasetLoader {
            cache_dir: cache_dir.to_path_buf(),
            hipparcos_url: "http://invalid.invalid/hip_main.dat".to_string(),
            constellations_url: "http://invalid.invalid/constellationship.fab".to_string(),
        }
    }

    #[test]
    fn test_load_from_cache() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(HIPPARCOS_FILE), hipparcos::tests::sample()).unwrap();
        fs::write(temp_dir.path().join(CONSTELLATIONS_FILE), stellarium::tests::SAMPLE).unwrap();

        let datasets = offline_loader(temp_dir.path()).load().unwrap();
        assert_eq!(datasets.catalog.len(), 3);
        assert_eq!(datasets.constellations.len(), 2);
    }

    #[test]
    fn test_unparseable_cache_entry_is_removed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONSTELLATIONS_FILE);
        fs::write(&path, "Ori 1 27989 Betelgeuse\n").unwrap();

        let result = offline_loader(temp_dir.path()).load();
        assert!(matches!(result, Err(Error::DatasetUnavailable(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_catalog_is_removed() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONSTELLATIONS_FILE), stellarium::tests::SAMPLE).unwrap();
        let path = temp_dir.path().join(HIPPARCOS_FILE);
        fs::write(&path, "<html>Service Unavailable</html>\n").unwrap();

        let result = offline_loader(temp_dir.path()).load();
        assert!(matches!(result, Err(Error::DatasetUnavailable(_))));
        assert!(!path.exists());
        assert!(temp_dir.path().join(CONSTELLATIONS_FILE).exists());
    }

    #[test]
    fn test_verify_edges() {
        let datasets = sample_datasets();
        assert!(datasets.verify_edges().is_ok());
    }

    #[test]
    fn test_edge_to_star_without_astrometry() {
        // ξ UMa has no position in the main catalog
        let mut datasets = sample_datasets();
        datasets.constellations = stellarium::parse_constellations("UMa 1 27989 55203\n".as_bytes())
            .unwrap();
        assert!(datasets.catalog.get(55203).unwrap().astrometry.is_none());
        assert!(datasets.verify_edges().is_ok());
    }

    #[test]
    fn test_verify_edges_missing_star() {
        let mut datasets = sample_datasets();
        datasets.constellations[0].edges.push((27989, 424242));

        match datasets.verify_edges() {
            Err(Error::DataIntegrity(msg)) => assert!(msg.contains("424242")),
            other => panic!("expected data integrity error, got {:?}", other),
        }
    }
}
