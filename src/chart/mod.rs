//! Star chart rendering
//!
//! Turns a projected sky view into markers and line segments clipped to a
//! hexagon, then draws them as a PNG or an animated GIF.

pub mod animate;
pub mod display;
pub mod hexagon;
pub mod render;

use crate::sky::time::format_when;
use crate::sky::SkyView;
use chrono::NaiveDateTime;
use hexagon::Hexagon;

/// Faintest magnitude drawn as a marker
pub const LIMITING_MAGNITUDE: f64 = 13.0;

/// A point on the chart plane
pub type Point = (f64, f64);

/// Marker size (area, points²) for a magnitude
///
/// Flux scales as 10^(-m/2.5): five magnitudes brighter is 100× the area.
pub fn marker_size(magnitude: f64, max_marker_size: f64) -> f64 {
    max_marker_size * 10f64.powf(magnitude / -2.5)
}

/// Whether a star with this magnitude is drawn
pub fn is_visible(magnitude: Option<f64>) -> bool {
    magnitude.is_some_and(|m| m <= LIMITING_MAGNITUDE)
}

/// A star marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub position: Point,
    /// Area in points²
    pub size: f64,
}

/// A constellation line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// Everything drawn for one chart, in plane coordinates
#[derive(Debug, Clone)]
pub struct ChartLayout {
    pub title: String,
    pub markers: Vec<Marker>,
    pub segments: Vec<Segment>,
}

impl ChartLayout {
    /// Unclipped markers for visible stars and one segment per edge whose
    /// endpoints are both in the view
    pub fn from_view(view: &SkyView, max_marker_size: f64) -> Self {
        let markers = view
            .stars
            .iter()
            .filter_map(|star| match star.magnitude {
                Some(m) if is_visible(star.magnitude) => Some(Marker {
                    position: (star.x, star.y),
                    size: marker_size(m, max_marker_size),
                }),
                _ => None,
            })
            .collect();

        let segments = view
            .edges()
            .filter_map(|(a, b)| {
                let start = view.star(a)?;
                let end = view.star(b)?;
                Some(Segment {
                    start: (start.x, start.y),
                    end: (end.x, end.y),
                })
            })
            .collect();

        Self {
            title: chart_title(&view.site.label, &view.observation.local),
            markers,
            segments,
        }
    }

    /// Keep only what shows inside the hexagon, shortening segments that
    /// cross its boundary
    pub fn clipped_to(mut self, hexagon: &Hexagon) -> Self {
        self.markers.retain(|m| hexagon.contains(m.position));
        self.segments = self
            .segments
            .iter()
            .filter_map(|s| {
                hexagon
                    .clip_segment(s.start, s.end)
                    .map(|(start, end)| Segment { start, end })
            })
            .collect();
        self
    }
}

/// Chart title for a location and local wall-clock time
pub fn chart_title(location: &str, local: &NaiveDateTime) -> String {
    format!(
        "Observation Location: {}, Time: {}",
        location,
        format_when(local)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoLocation;
    use crate::sky::{Observation, ProjectedStar, Site};
    use crate::sky::time::parse_when;
    use approx::assert_relative_eq;
    use chrono::{DateTime, Utc};

    fn view(stars: Vec<ProjectedStar>, edges: Vec<(u32, u32)>) -> SkyView {
        let site = Site {
            label: "Juneau, AK".to_string(),
            location: GeoLocation {
                lat: 58.3019,
                lng: -134.4197,
                display_name: "Juneau".to_string(),
            },
            timezone: chrono_tz::America::Juneau,
        };
        let observation = Observation {
            local: parse_when("2023-11-01 15:00").unwrap(),
            utc: "2023-11-02T00:00:00Z".parse::<DateTime<Utc>>().unwrap(),
        };
        let (starts, ends) = edges.into_iter().unzip();
        SkyView::new(site, observation, stars, starts, ends)
    }

    fn star(hip: u32, magnitude: Option<f64>, x: f64, y: f64) -> ProjectedStar {
        ProjectedStar { hip, magnitude, x, y }
    }

    #[test]
    fn test_marker_size_reference_values() {
        assert_relative_eq!(marker_size(0.0, 250.0), 250.0);
        assert_relative_eq!(marker_size(5.0, 250.0), 2.5, max_relative = 1e-12);
        assert_relative_eq!(marker_size(-1.46, 100.0), 100.0 * 10f64.powf(0.584));
    }

    #[test]
    fn test_marker_size_monotonic() {
        let mut previous = f64::INFINITY;
        for tenth in -20..=130 {
            let size = marker_size(tenth as f64 / 10.0, 250.0);
            assert!(size < previous);
            previous = size;
        }
    }

    #[test]
    fn test_visibility_threshold() {
        assert!(is_visible(Some(-1.46)));
        assert!(is_visible(Some(13.0)));
        assert!(!is_visible(Some(13.01)));
        assert!(!is_visible(None));
    }

    #[test]
    fn test_layout_filters_markers_but_not_edges() {
        let v = view(
            vec![
                star(1, Some(1.0), 0.1, 0.2),
                star(2, Some(14.0), 0.3, 0.4),
                star(3, None, -0.5, 0.5),
            ],
            vec![(1, 2), (2, 3)],
        );
        let layout = ChartLayout::from_view(&v, 250.0);

        assert_eq!(layout.markers.len(), 1);
        assert_eq!(layout.markers[0].position, (0.1, 0.2));
        assert_eq!(
            layout.segments,
            vec![
                Segment { start: (0.1, 0.2), end: (0.3, 0.4) },
                Segment { start: (0.3, 0.4), end: (-0.5, 0.5) },
            ]
        );
    }

    #[test]
    fn test_layout_skips_edges_with_missing_stars() {
        let v = view(vec![star(1, Some(1.0), 0.0, 0.0)], vec![(1, 42)]);
        let layout = ChartLayout::from_view(&v, 250.0);
        assert!(layout.segments.is_empty());
    }

    #[test]
    fn test_layout_title() {
        let v = view(Vec::new(), Vec::new());
        let layout = ChartLayout::from_view(&v, 250.0);
        assert_eq!(
            layout.title,
            "Observation Location: Juneau, AK, Time: 2023-11-01 15:00"
        );
    }

    #[test]
    fn test_clipping_drops_outside_markers() {
        let v = view(
            vec![star(1, Some(1.0), 0.0, 0.0), star(2, Some(1.0), 0.99, 0.0)],
            vec![(1, 2)],
        );
        let layout = ChartLayout::from_view(&v, 250.0).clipped_to(&Hexagon::unit());

        // 0.99 on the x axis is past the flat side at √3/2
        assert_eq!(layout.markers.len(), 1);
        assert_eq!(layout.segments.len(), 1);
        assert_relative_eq!(layout.segments[0].end.0, 3f64.sqrt() / 2.0, max_relative = 1e-9);
    }

    #[test]
    fn test_unplaced_star_is_not_drawn() {
        let v = view(
            vec![
                star(1, Some(1.0), 0.1, 0.2),
                star(55203, Some(4.33), f64::NAN, f64::NAN),
            ],
            vec![(1, 55203)],
        );
        let layout = ChartLayout::from_view(&v, 250.0).clipped_to(&Hexagon::unit());

        assert_eq!(layout.markers.len(), 1);
        assert_eq!(layout.markers[0].position, (0.1, 0.2));
        assert!(layout.segments.is_empty());
    }
}
