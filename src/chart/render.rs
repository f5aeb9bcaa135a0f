//! Drawing chart layouts with plotters

use crate::chart::hexagon::Hexagon;
use crate::chart::{ChartLayout, Point};
use crate::config::Config;
use crate::error::{Error, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::debug;

const DARK_CYAN: RGBColor = RGBColor(0, 139, 139);
const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const DARK_ORANGE: RGBColor = RGBColor(255, 140, 0);

/// Title font size in points
const TITLE_FONT_POINTS: f64 = 10.0;

/// Points per inch
const POINTS_PER_INCH: f64 = 72.0;

/// Markers smaller than this radius are not drawn
const MIN_MARKER_RADIUS_PX: f64 = 0.25;

/// Inner to outer radius ratio of a regular five-pointed star
const STAR_INNER_RATIO: f64 = 0.381_966;

/// Canvas geometry
#[derive(Debug, Clone, Copy)]
pub struct ChartStyle {
    /// Side of the square canvas in pixels
    pub size_px: u32,
    pub dpi: u32,
}

impl ChartStyle {
    pub fn from_config(config: &Config) -> Self {
        Self {
            size_px: config.chart_size_px(),
            dpi: config.chart.dpi,
        }
    }

    pub fn points_to_px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / POINTS_PER_INCH
    }

    /// Height of the title band above the plot area
    pub fn title_band_px(&self) -> u32 {
        (self.points_to_px(TITLE_FONT_POINTS) * 2.0).ceil() as u32
    }

    /// Side of the square plot area below the title band
    pub fn plot_side_px(&self) -> u32 {
        self.size_px.saturating_sub(self.title_band_px())
    }

    /// Outer radius in plot units for a marker of `size` points²
    pub fn marker_radius(&self, size: f64) -> f64 {
        let radius_px = self.points_to_px(size.sqrt() / 2.0);
        radius_px * 2.0 / self.plot_side_px().max(1) as f64
    }
}

/// Vertices of a five-pointed star with one point up
pub fn star_polygon(center: Point, radius: f64) -> Vec<Point> {
    (0..10)
        .map(|i| {
            let r = if i % 2 == 0 {
                radius
            } else {
                radius * STAR_INNER_RATIO
            };
            let angle = (90.0 + 36.0 * i as f64).to_radians();
            (center.0 + r * angle.cos(), center.1 + r * angle.sin())
        })
        .collect()
}

fn render_error(e: impl std::fmt::Display) -> Error {
    Error::Render(e.to_string())
}

/// Draw one chart onto a drawing area
pub fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layout: &ChartLayout,
    style: &ChartStyle,
) -> Result<()> {
    root.fill(&WHITE).map_err(render_error)?;

    let (title_area, body) = root.split_vertically(style.title_band_px());

    if !layout.title.is_empty() {
        let (width, height) = title_area.dim_in_pixel();
        let font_px = style.points_to_px(TITLE_FONT_POINTS);
        let text_style = ("sans-serif", font_px)
            .into_font()
            .color(&DARK_ORANGE)
            .pos(Pos::new(HPos::Right, VPos::Center));
        let x = width as i32 - font_px.round() as i32;
        title_area
            .draw(&Text::new(layout.title.clone(), (x, height as i32 / 2), text_style))
            .map_err(render_error)?;
    }

    // Square plot area, centered horizontally
    let (body_width, body_height) = body.dim_in_pixel();
    let side = body_width.min(body_height);
    let margin = (body_width - side) / 2;
    let plot_area = body.margin(0, body_height - side, margin, body_width - side - margin);

    let mut chart = ChartBuilder::on(&plot_area)
        .build_cartesian_2d(-1.0..1.0, -1.0..1.0)
        .map_err(render_error)?;

    let hexagon = Hexagon::unit();
    chart
        .draw_series(std::iter::once(Polygon::new(
            hexagon.vertices().to_vec(),
            DARK_CYAN.filled(),
        )))
        .map_err(render_error)?;

    chart
        .draw_series(layout.segments.iter().map(|segment| {
            PathElement::new(vec![segment.start, segment.end], SKY_BLUE.stroke_width(1))
        }))
        .map_err(render_error)?;

    let min_radius = MIN_MARKER_RADIUS_PX * 2.0 / side.max(1) as f64;
    let markers: Vec<_> = layout
        .markers
        .iter()
        .map(|marker| (marker.position, style.marker_radius(marker.size)))
        .filter(|&(_, radius)| radius >= min_radius)
        .collect();
    debug!(
        drawn = markers.len(),
        skipped = layout.markers.len() - markers.len(),
        segments = layout.segments.len(),
        "drawing chart"
    );

    chart
        .draw_series(
            markers
                .into_iter()
                .map(|(center, radius)| Polygon::new(star_polygon(center, radius), YELLOW.filled())),
        )
        .map_err(render_error)?;

    Ok(())
}

/// Render a single chart to a PNG file
pub fn render_png(path: &Path, layout: &ChartLayout, style: &ChartStyle) -> Result<()> {
    let root = BitMapBackend::new(path, (style.size_px, style.size_px)).into_drawing_area();
    draw_chart(&root, layout, style)?;
    root.present().map_err(render_error)?;
    Ok(())
}

/// Render frames to a looping animated GIF
pub fn render_gif(
    path: &Path,
    frames: &[ChartLayout],
    style: &ChartStyle,
    frame_delay_ms: u32,
) -> Result<()> {
    if frames.is_empty() {
        return Err(Error::Render("Animation has no frames".to_string()));
    }

    let root = BitMapBackend::gif(path, (style.size_px, style.size_px), frame_delay_ms)
        .map_err(render_error)?
        .into_drawing_area();

    for (i, layout) in frames.iter().enumerate() {
        draw_chart(&root, layout, style)?;
        root.present().map_err(render_error)?;
        debug!(frame = i, "frame written");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Marker, Segment};
    use approx::assert_abs_diff_eq;
    use tempfile::TempDir;

    fn style() -> ChartStyle {
        ChartStyle {
            size_px: 200,
            dpi: 72,
        }
    }

    fn layout() -> ChartLayout {
        ChartLayout {
            title: String::new(),
            markers: vec![
                Marker {
                    position: (0.0, 0.0),
                    size: 250.0,
                },
                Marker {
                    position: (0.3, -0.2),
                    size: 2.5,
                },
            ],
            segments: vec![Segment {
                start: (0.0, 0.0),
                end: (0.3, -0.2),
            }],
        }
    }

    #[test]
    fn test_style_geometry() {
        let style = ChartStyle {
            size_px: 1300,
            dpi: 100,
        };
        assert_abs_diff_eq!(style.points_to_px(72.0), 100.0);
        assert_eq!(style.title_band_px(), 28);
        assert_eq!(style.plot_side_px(), 1272);
    }

    #[test]
    fn test_from_config() {
        let style = ChartStyle::from_config(&Config::default());
        assert_eq!(style.size_px, 1300);
        assert_eq!(style.dpi, 100);
    }

    #[test]
    fn test_marker_radius_scales_with_root_of_size() {
        let style = style();
        let small = style.marker_radius(25.0);
        let large = style.marker_radius(100.0);
        assert_abs_diff_eq!(large / small, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_star_polygon() {
        let points = star_polygon((1.0, 2.0), 0.5);
        assert_eq!(points.len(), 10);
        assert_abs_diff_eq!(points[0].0, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(points[0].1, 2.5, epsilon = 1e-12);
        let inner = (points[1].0 - 1.0).hypot(points[1].1 - 2.0);
        assert_abs_diff_eq!(inner, 0.5 * STAR_INNER_RATIO, epsilon = 1e-12);
    }

    #[test]
    fn test_render_png_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.png");
        render_png(&path, &layout(), &style()).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn test_render_gif_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.gif");
        render_gif(&path, &[layout(), layout()], &style(), 100).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn test_render_gif_without_frames() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.gif");
        assert!(matches!(
            render_gif(&path, &[], &style(), 100),
            Err(Error::Render(_))
        ));
        assert!(!path.exists());
    }
}
