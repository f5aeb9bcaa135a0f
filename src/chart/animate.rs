//! Animated charts over a span of time
//!
//! Frames step the absolute instant, so across a DST change the wall-clock
//! titles jump by two hours or repeat while the sky advances evenly.

use crate::chart::hexagon::Hexagon;
use crate::chart::render::{render_gif, ChartStyle};
use crate::chart::ChartLayout;
use crate::config::AnimationConfig;
use crate::error::Result;
use crate::geo::timezone::localize;
use crate::sky::time::parse_when;
use crate::sky::Resolver;
use chrono::{DateTime, Duration, Utc};
use std::path::Path;
use tracing::info;

/// Frame k is at `start + k * step_hours`
pub fn frame_instants(start: DateTime<Utc>, frames: usize, step_hours: i64) -> Vec<DateTime<Utc>> {
    (0..frames)
        .map(|k| start + Duration::hours(step_hours * k as i64))
        .collect()
}

/// Resolve and clip every frame of an animation
///
/// Fails on the first frame that fails; nothing is drawn until all frames
/// are ready.
pub fn resolve_frames(
    resolver: &mut Resolver,
    location: &str,
    when: &str,
    max_marker_size: f64,
    animation: &AnimationConfig,
) -> Result<Vec<ChartLayout>> {
    let local = parse_when(when)?;
    let site = resolver.resolve_site(location)?;
    let start = localize(local, site.timezone)?;

    let hexagon = Hexagon::unit();
    frame_instants(start, animation.frames, animation.step_hours)
        .into_iter()
        .map(|utc| {
            let view = resolver.observe(&site, utc)?;
            Ok(ChartLayout::from_view(&view, max_marker_size).clipped_to(&hexagon))
        })
        .collect()
}

/// Resolve all frames and write them to a GIF at `path`
pub fn render_animation(
    resolver: &mut Resolver,
    location: &str,
    when: &str,
    max_marker_size: f64,
    animation: &AnimationConfig,
    style: &ChartStyle,
    path: &Path,
) -> Result<()> {
    let frames = resolve_frames(resolver, location, when, max_marker_size, animation)?;
    info!(frames = frames.len(), path = %path.display(), "writing animation");
    render_gif(path, &frames, style, animation.frame_delay_ms)
}
