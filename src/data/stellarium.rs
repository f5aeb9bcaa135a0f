//! Stellarium constellation outlines (`constellationship.fab`)
//!
//! One constellation per line: abbreviation, number of segments, then the
//! HIP numbers of each segment's endpoints. Lines starting with `#` are
//! comments. The segment count is informational; pairs are read from the
//! remaining fields.

use crate::error::{Error, Result};
use std::io::BufRead;

/// A constellation and its stick-figure segments
#[derive(Debug, Clone, PartialEq)]
pub struct Constellation {
    pub name: String,
    pub edges: Vec<(u32, u32)>,
}

/// Parse `constellationship.fab` content
pub fn parse_constellations<R: BufRead>(reader: R) -> Result<Vec<Constellation>> {
    let mut constellations = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            Error::DatasetUnavailable(format!(
                "constellationship.fab line {}: {}",
                line_no + 1,
                e
            ))
        })?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 || fields[0].starts_with('#') {
            continue;
        }

        let ids = fields[2..]
            .iter()
            .map(|f| {
                f.parse::<u32>().map_err(|_| {
                    Error::DatasetUnavailable(format!(
                        "constellationship.fab line {}: invalid HIP number {:?}",
                        line_no + 1,
                        f
                    ))
                })
            })
            .collect::<Result<Vec<u32>>>()?;

        constellations.push(Constellation {
            name: fields[0].to_string(),
            edges: ids.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect(),
        });
    }

    if constellations.is_empty() {
        return Err(Error::DatasetUnavailable(
            "constellationship.fab contained no constellations".to_string(),
        ));
    }
    Ok(constellations)
}

/// Flatten every constellation into parallel lists of edge start and end
/// identifiers
pub fn edge_endpoints(constellations: &[Constellation]) -> (Vec<u32>, Vec<u32>) {
    constellations
        .iter()
        .flat_map(|c| c.edges.iter().copied())
        .unzip()
}
