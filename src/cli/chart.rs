//! Chart command handler
//!
//! Draws a single star chart for a place and local time.

use crate::chart::display::{open_in_viewer, preview_path};
use crate::chart::hexagon::Hexagon;
use crate::chart::render::{render_png, ChartStyle};
use crate::chart::ChartLayout;
use crate::config::Config;
use crate::error::Result;
use crate::sky::Resolver;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Chart command arguments
#[derive(Args)]
pub struct ChartArgs {
    /// Observation location (geocoded)
    #[arg(long, short = 'l')]
    pub location: String,

    /// Local time at the location, "YYYY-MM-DD HH:MM"
    #[arg(long, short = 't')]
    pub time: String,

    /// Marker size of a magnitude 0 star, in points²
    #[arg(long = "max_stars")]
    pub max_stars: u32,

    /// Save the PNG here instead of opening a viewer
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Run the chart command
pub fn run(args: ChartArgs) -> Result<()> {
    let config = Config::load()?;

    println!(
        "You've requested a star map for {} starting from {}",
        args.location, args.time
    );

    let mut resolver = Resolver::from_config(&config)?;
    let view = resolver.resolve(&args.location, &args.time)?;
    let layout = ChartLayout::from_view(&view, args.max_stars as f64).clipped_to(&Hexagon::unit());
    let style = ChartStyle::from_config(&config);

    match &args.output {
        Some(path) => {
            render_png(path, &layout, &style)?;
            eprintln!("Saved chart to {}", path.display());
        }
        None => {
            let cache_dir = Config::cache_dir()?;
            fs::create_dir_all(&cache_dir)?;
            let path = preview_path(&cache_dir, "png");
            render_png(&path, &layout, &style)?;
            open_in_viewer(&path, &config.display.viewer)?;
        }
    }

    Ok(())
}
