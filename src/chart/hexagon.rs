//! Regular hexagon viewport and clipping

use crate::chart::Point;

/// Regular hexagon centered at the origin with a vertex pointing up
#[derive(Debug, Clone)]
pub struct Hexagon {
    vertices: [Point; 6],
}

impl Hexagon {
    /// Hexagon with the given circumradius
    pub fn new(circumradius: f64) -> Self {
        let mut vertices = [(0.0, 0.0); 6];
        for (k, vertex) in vertices.iter_mut().enumerate() {
            let angle = (90.0 + 60.0 * k as f64).to_radians();
            *vertex = (circumradius * angle.cos(), circumradius * angle.sin());
        }
        Self { vertices }
    }

    /// Circumradius 1, inscribed in the horizon circle
    pub fn unit() -> Self {
        Self::new(1.0)
    }

    /// Vertices in counterclockwise order
    pub fn vertices(&self) -> &[Point; 6] {
        &self.vertices
    }

    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        (0..6).map(move |i| (self.vertices[i], self.vertices[(i + 1) % 6]))
    }

    /// Point-in-hexagon test, boundary included
    pub fn contains(&self, p: Point) -> bool {
        p.0.is_finite()
            && p.1.is_finite()
            && self.edges().all(|(a, b)| {
                let cross = (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0);
                cross >= -1e-12
            })
    }

    /// Cyrus-Beck clipping of the segment `start`-`end`
    ///
    /// Returns the visible part, or None if the segment misses the hexagon.
    pub fn clip_segment(&self, start: Point, end: Point) -> Option<(Point, Point)> {
        if ![start.0, start.1, end.0, end.1].iter().all(|v| v.is_finite()) {
            return None;
        }

        let d = (end.0 - start.0, end.1 - start.1);
        let mut t_enter: f64 = 0.0;
        let mut t_exit: f64 = 1.0;

        for (a, b) in self.edges() {
            // Inward normal for counterclockwise winding
            let normal = (-(b.1 - a.1), b.0 - a.0);
            let num = normal.0 * (start.0 - a.0) + normal.1 * (start.1 - a.1);
            let den = normal.0 * d.0 + normal.1 * d.1;

            if den == 0.0 {
                if num < 0.0 {
                    return None;
                }
                continue;
            }

            let t = -num / den;
            if den > 0.0 {
                t_enter = t_enter.max(t);
            } else {
                t_exit = t_exit.min(t);
            }
            if t_enter > t_exit {
                return None;
            }
        }

        let at = |t: f64| (start.0 + t * d.0, start.1 + t * d.1);
        Some((at(t_enter), at(t_exit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const APOTHEM: f64 = 0.866_025_403_784_438_6;

    #[test]
    fn test_vertices() {
        let hex = Hexagon::unit();
        let top = hex.vertices()[0];
        assert_abs_diff_eq!(top.0, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(top.1, 1.0, epsilon = 1e-12);
        for v in hex.vertices() {
            assert_abs_diff_eq!(v.0.hypot(v.1), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_contains() {
        let hex = Hexagon::unit();
        assert!(hex.contains((0.0, 0.0)));
        assert!(hex.contains((0.0, 0.99)));
        assert!(hex.contains((0.86, 0.0)));
        assert!(!hex.contains((0.87, 0.0)));
        assert!(!hex.contains((0.8, 0.8)));
        assert!(!hex.contains((f64::NAN, 0.0)));
    }

    #[test]
    fn test_segment_inside_is_unchanged() {
        let hex = Hexagon::unit();
        let (a, b) = hex.clip_segment((-0.2, 0.1), (0.3, -0.4)).unwrap();
        assert_eq!(a, (-0.2, 0.1));
        assert_eq!(b, (0.3, -0.4));
    }

    #[test]
    fn test_segment_crossing_is_shortened() {
        let hex = Hexagon::unit();
        let (a, b) = hex.clip_segment((-2.0, 0.0), (2.0, 0.0)).unwrap();
        assert_abs_diff_eq!(a.0, -APOTHEM, epsilon = 1e-12);
        assert_abs_diff_eq!(b.0, APOTHEM, epsilon = 1e-12);
        assert_abs_diff_eq!(a.1, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_segment_outside_is_dropped() {
        let hex = Hexagon::unit();
        assert!(hex.clip_segment((0.9, 0.9), (1.5, 0.2)).is_none());
        assert!(hex.clip_segment((2.0, -2.0), (2.0, 2.0)).is_none());
    }

    #[test]
    fn test_infinite_endpoint_is_dropped() {
        let hex = Hexagon::unit();
        assert!(hex.clip_segment((0.0, 0.0), (f64::INFINITY, 0.0)).is_none());
    }

    #[test]
    fn test_scaled_hexagon() {
        let hex = Hexagon::new(2.0);
        assert!(hex.contains((0.0, 1.9)));
        assert!(!Hexagon::unit().contains((0.0, 1.9)));
    }
}
