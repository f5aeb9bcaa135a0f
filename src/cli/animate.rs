//! Animate command handler
//!
//! Draws a looping GIF of the sky over the following hours.

use crate::chart::animate::render_animation;
use crate::chart::display::{open_in_viewer, preview_path};
use crate::chart::render::ChartStyle;
use crate::config::Config;
use crate::error::Result;
use crate::sky::Resolver;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Animate command arguments
#[derive(Args)]
pub struct AnimateArgs {
    /// Observation location (geocoded)
    #[arg(long, short = 'l')]
    pub location: String,

    /// Local time of the first frame, "YYYY-MM-DD HH:MM"
    #[arg(long, short = 't')]
    pub time: String,

    /// Marker size of a magnitude 0 star, in points²
    #[arg(long = "max_stars")]
    pub max_stars: u32,

    /// Save as <FILE_NAME>.gif instead of opening a viewer
    #[arg(long = "file_name", short = 'f')]
    pub file_name: Option<String>,
}

/// Output path for a `--file_name` value
pub fn gif_path(file_name: &str) -> PathBuf {
    if file_name.ends_with(".gif") {
        PathBuf::from(file_name)
    } else {
        PathBuf::from(format!("{}.gif", file_name))
    }
}

/// Run the animate command
pub fn run(args: AnimateArgs) -> Result<()> {
    let config = Config::load()?;

    println!(
        "You've requested a star map for {} starting from {}",
        args.location, args.time
    );

    let mut resolver = Resolver::from_config(&config)?;
    let style = ChartStyle::from_config(&config);

    let (path, preview) = match &args.file_name {
        Some(name) => (gif_path(name), false),
        None => {
            let cache_dir = Config::cache_dir()?;
            fs::create_dir_all(&cache_dir)?;
            (preview_path(&cache_dir, "gif"), true)
        }
    };

    render_animation(
        &mut resolver,
        &args.location,
        &args.time,
        args.max_stars as f64,
        &config.animation,
        &style,
        &path,
    )?;

    if preview {
        open_in_viewer(&path, &config.display.viewer)?;
    } else {
        eprintln!("Saved animation to {}", path.display());
    }

    Ok(())
}
