//! Showing charts that were not saved to an explicit path

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

/// Preview file for an extension ("png" or "gif") in the cache directory
pub fn preview_path(cache_dir: &Path, extension: &str) -> PathBuf {
    cache_dir.join(format!("preview.{}", extension))
}

/// Program and leading arguments used to open an image
///
/// A configured viewer is split on whitespace; an empty one falls back to
/// the platform opener.
pub fn viewer_command(viewer: &str) -> (String, Vec<String>) {
    let mut parts = viewer.split_whitespace().map(str::to_string);
    match parts.next() {
        Some(program) => (program, parts.collect()),
        None => platform_opener(),
    }
}

fn platform_opener() -> (String, Vec<String>) {
    if cfg!(target_os = "macos") {
        ("open".to_string(), Vec::new())
    } else if cfg!(target_os = "windows") {
        ("explorer".to_string(), Vec::new())
    } else {
        ("xdg-open".to_string(), Vec::new())
    }
}

/// Open an image in the viewer without waiting for it to close
pub fn open_in_viewer(path: &Path, viewer: &str) -> Result<()> {
    let (program, args) = viewer_command(viewer);
    info!(program = %program, path = %path.display(), "opening viewer");

    Command::new(&program)
        .args(&args)
        .arg(path)
        .spawn()
        .map_err(|e| Error::Render(format!("Failed to launch viewer '{}': {}", program, e)))?;

    Ok(())
}
