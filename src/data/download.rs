//! Download and on-disk caching of reference data files

use crate::constants::api::USER_AGENT;
use crate::constants::cache::DOWNLOAD_TIMEOUT_SECS;
use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Check if a file exists and is not empty
fn file_exists_and_not_empty<P: AsRef<Path>>(path: P) -> bool {
    match fs::metadata(path) {
        Ok(metadata) => metadata.is_file() && metadata.len() > 0,
        Err(_) => false,
    }
}

/// Return the cached copy of `url` at `cache_dir/file_name`, downloading
/// it first if needed
pub fn cached_file(url: &str, cache_dir: &Path, file_name: &str) -> Result<PathBuf> {
    let path = cache_dir.join(file_name);

    if file_exists_and_not_empty(&path) {
        debug!(path = %path.display(), "using cached file");
        return Ok(path);
    }

    info!(%url, "downloading");
    download_file(url, &path)?;
    Ok(path)
}

/// Download a file from URL to a local path
fn download_file(url: &str, path: &Path) -> Result<()> {
    let unavailable = |what: String| Error::DatasetUnavailable(format!("{}: {}", url, what));

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| io_unavailable("failed to create", parent, e))?;
    }

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
        .build()
        .map_err(|e| unavailable(format!("failed to create HTTP client: {}", e)))?;

    let mut response = client
        .get(url)
        .send()
        .map_err(|e| unavailable(format!("request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(unavailable(format!("status {}", response.status())));
    }

    write_atomically(path, |file| {
        response
            .copy_to(file)
            .map(|_| ())
            .map_err(|e| unavailable(format!("failed to read response: {}", e)))
    })?;
    info!(path = %path.display(), "download complete");

    Ok(())
}

/// Fill a temporary sibling of `path` and rename it into place
///
/// On any failure the temporary file is removed and `path` is left
/// untouched, so an interrupted download never leaves a truncated cache
/// entry.
fn write_atomically<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let temp_path = path.with_extension("tmp");
    let result = File::create(&temp_path)
        .map_err(|e| io_unavailable("failed to create", &temp_path, e))
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            fill(&mut writer)?;
            writer
                .flush()
                .map_err(|e| io_unavailable("failed to write", &temp_path, e))
        })
        .and_then(|()| {
            fs::rename(&temp_path, path)
                .map_err(|e| io_unavailable("failed to move into place", path, e))
        });

    if result.is_err() && temp_path.exists() {
        warn!(path = %temp_path.display(), "removing partial download");
        let _ = fs::remove_file(&temp_path);
    }
    result
}

pub(crate) fn io_unavailable(action: &str, path: &Path, e: std::io::Error) -> Error {
    Error::DatasetUnavailable(format!("{} {}: {}", action, path.display(), e))
}
