//! Hipparcos main catalog (`hip_main.dat`)
//!
//! Astrometry comes from starfield's Hipparcos reader. That reader only
//! returns entries it can place on the sky, while about 260 rows of the
//! main catalog have no position and some of them (ξ UMa, HIP 55203) are
//! constellation endpoints. The identifier and magnitude columns are
//! therefore scanned separately so every row stays a catalog member.
//!
//! | field | content                          |
//! |-------|----------------------------------|
//! | 1     | HIP identifier                   |
//! | 5     | V magnitude                      |
//! | 8, 9  | RA, Dec in degrees (ICRS, J1991.25) |
//! | 11    | parallax, mas                    |
//! | 12, 13| proper motion RA·cos(Dec), Dec, mas/yr |

use crate::constants::cache::CATALOG_MAGNITUDE_LIMIT;
use crate::error::{Error, Result};
use starfield::catalogs::hipparcos::HipparcosCatalog;
use starfield::catalogs::{HipparcosEntry, StarCatalog as _};
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;
use tracing::debug;

/// Catalog position and space motion at the Hipparcos epoch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Astrometry {
    pub ra_degrees: f64,
    pub dec_degrees: f64,
    pub parallax_mas: f64,
    pub ra_mas_per_year: f64,
    pub dec_mas_per_year: f64,
}

impl From<&HipparcosEntry> for Astrometry {
    fn from(entry: &HipparcosEntry) -> Self {
        Self {
            ra_degrees: entry.ra,
            dec_degrees: entry.dec,
            parallax_mas: entry.parallax.unwrap_or(0.0),
            ra_mas_per_year: entry.pm_ra.unwrap_or(0.0),
            dec_mas_per_year: entry.pm_dec.unwrap_or(0.0),
        }
    }
}

/// One catalog row
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogStar {
    pub hip: u32,
    /// Apparent V magnitude, absent for a handful of entries
    pub magnitude: Option<f64>,
    /// Absent for rows the catalog could not position
    pub astrometry: Option<Astrometry>,
}

/// Star catalog indexed by HIP number
#[derive(Debug, Default)]
pub struct StarCatalog {
    stars: Vec<CatalogStar>,
    index: HashMap<u32, usize>,
}

impl StarCatalog {
    /// Build a catalog from a list of stars
    pub fn from_stars(stars: Vec<CatalogStar>) -> Self {
        let index = stars
            .iter()
            .enumerate()
            .map(|(i, star)| (star.hip, i))
            .collect();
        Self { stars, index }
    }

    /// Read a `hip_main.dat` file
    pub fn load(path: &Path) -> Result<Self> {
        let rows = scan_rows(super::open(path)?)?;

        let hipparcos = HipparcosCatalog::from_dat_file(path, CATALOG_MAGNITUDE_LIMIT)
            .map_err(|e| {
                Error::DatasetUnavailable(format!("failed to read {}: {}", path.display(), e))
            })?;
        let positions: HashMap<u32, Astrometry> = hipparcos
            .stars()
            .map(|entry| (entry.hip as u32, Astrometry::from(entry)))
            .collect();

        Ok(Self::from_rows(rows, &positions))
    }

    /// Join scanned rows with the positions known for them
    pub fn from_rows(rows: Vec<CatalogRow>, positions: &HashMap<u32, Astrometry>) -> Self {
        let stars: Vec<CatalogStar> = rows
            .into_iter()
            .map(|row| CatalogStar {
                hip: row.hip,
                magnitude: row.magnitude,
                astrometry: positions.get(&row.hip).copied(),
            })
            .collect();

        let unpositioned = stars.iter().filter(|s| s.astrometry.is_none()).count();
        debug!(stars = stars.len(), unpositioned, "catalog joined");
        Self::from_stars(stars)
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn get(&self, hip: u32) -> Option<&CatalogStar> {
        self.index.get(&hip).map(|&i| &self.stars[i])
    }

    pub fn contains(&self, hip: u32) -> bool {
        self.index.contains_key(&hip)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogStar> {
        self.stars.iter()
    }
}

/// Identifier and magnitude of one `hip_main.dat` row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogRow {
    pub hip: u32,
    pub magnitude: Option<f64>,
}

/// Read the identifier and magnitude of every row
pub fn scan_rows<R: BufRead>(reader: R) -> Result<Vec<CatalogRow>> {
    let mut rows = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let context = |what: String| {
            Error::DatasetUnavailable(format!("hip_main.dat line {}: {}", line_no + 1, what))
        };

        let line = line.map_err(|e| context(e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }
        rows.push(parse_row(&line).map_err(context)?);
    }

    if rows.is_empty() {
        return Err(Error::DatasetUnavailable(
            "hip_main.dat contained no stars".to_string(),
        ));
    }
    Ok(rows)
}

fn parse_row(line: &str) -> std::result::Result<CatalogRow, String> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() < 6 {
        return Err(format!("expected at least 6 fields, found {}", fields.len()));
    }

    let hip = fields[1]
        .trim()
        .parse()
        .map_err(|_| format!("invalid HIP number: {:?}", fields[1].trim()))?;

    let magnitude = match fields[5].trim() {
        "" => None,
        value => Some(
            value
                .parse()
                .map_err(|_| format!("invalid magnitude: {:?}", value))?,
        ),
    };

    Ok(CatalogRow { hip, magnitude })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::fs;
    use tempfile::TempDir;

    /// Betelgeuse, Polaris and ξ UMa (no astrometry), in the CDS layout
    /// padded out to the B-V column
    pub(crate) fn sample() -> String {
        [
            "H|       27989| |05 55 10.29|+07 24 25.3| 0.45|3|H|088.79287720|+07.40703634| |   7.63|   27.33|   10.86|  1.57|  0.86|",
            "H|       11767| |02 31 47.08|+89 15 50.9| 1.97|1|H|037.94614689|+89.26413805| |   7.56|   44.22|  -11.74|  0.39|  0.45|",
            "H|       55203| |11 18 10.95|+31 31 44.9| 4.33| |H|            |            | |       |        |        |      |      |",
        ]
        .iter()
        .zip([" 1.500", " 0.636", " 0.590"])
        .map(|(record, b_v)| format!("{:<245}{}|\n", record, b_v))
        .collect()
    }

    fn positions() -> HashMap<u32, Astrometry> {
        HashMap::from([(
            27989,
            Astrometry {
                ra_degrees: 88.7928772,
                dec_degrees: 7.40703634,
                parallax_mas: 7.63,
                ra_mas_per_year: 27.33,
                dec_mas_per_year: 10.86,
            },
        )])
    }

    #[test]
    fn test_scan_rows() {
        let rows = scan_rows(sample().as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], CatalogRow { hip: 27989, magnitude: Some(0.45) });
        assert_eq!(rows[2], CatalogRow { hip: 55203, magnitude: Some(4.33) });
    }

    #[test]
    fn test_rows_without_position_are_kept() {
        let rows = scan_rows(sample().as_bytes()).unwrap();
        let catalog = StarCatalog::from_rows(rows, &positions());

        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains(55203));
        assert_eq!(catalog.get(55203).unwrap().astrometry, None);
        let betelgeuse = catalog.get(27989).unwrap().astrometry.unwrap();
        assert_eq!(betelgeuse.parallax_mas, 7.63);
    }

    #[test]
    fn test_missing_magnitude() {
        let line = "H|           7| |00 00 01.20|+38 51 33.4|     | |H|000.00500625|+38.85928608| |   2.81|   -6.90|   -8.65|";
        assert_eq!(parse_row(line).unwrap().magnitude, None);
    }

    #[test]
    fn test_malformed_record() {
        assert!(scan_rows("H|abc|".as_bytes()).is_err());
        assert!(parse_row("H|  x| |a|b| 1.0| |H|1.0|2.0|").is_err());
        assert!(parse_row("H|  1| |a|b| bright|").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            scan_rows("".as_bytes()),
            Err(Error::DatasetUnavailable(_))
        ));
    }

    #[test]
    fn test_load_positions_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hip_main.dat");
        fs::write(&path, sample()).unwrap();

        let catalog = StarCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 3);

        let betelgeuse = catalog.get(27989).unwrap();
        assert_eq!(betelgeuse.magnitude, Some(0.45));
        let astrometry = betelgeuse.astrometry.unwrap();
        assert_abs_diff_eq!(astrometry.ra_degrees, 88.7928772, epsilon = 1e-6);
        assert_abs_diff_eq!(astrometry.dec_degrees, 7.40703634, epsilon = 1e-6);
        assert!(catalog.get(55203).unwrap().astrometry.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = StarCatalog::load(&temp_dir.path().join("hip_main.dat"));
        assert!(matches!(result, Err(Error::DatasetUnavailable(_))));
    }
}
