//! Environment/runtime helpers
//!
//! Sanity checks to ensure the SQLite file can be created at startup.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Extract the on-disk path from a `sqlite:` URL.
///
/// Returns `None` for in-memory databases and non-sqlite URLs.
pub fn sqlite_file_path(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Ensure the directory holding the SQLite file exists.
pub async fn ensure_data_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(file) = sqlite_file_path(database_url) else {
        debug!("database url has no file component; nothing to prepare");
        return Ok(());
    };
    let Some(dir) = file.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return Ok(());
    };
    if tokio::fs::metadata(dir).await.is_err() {
        warn!(dir = %dir.display(), "data directory missing; creating it");
    }
    create_dir(dir).await
}

async fn create_dir(dir: &Path) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))
}
