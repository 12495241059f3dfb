//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::warn;

/// Warn when the static client directory is missing; create the data directory.
pub async fn ensure_env(static_dir: &str, data_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(static_dir).await.is_err() {
        warn!(%static_dir, "static client directory not found; non-API paths will 404");
    }
    if data_dir.is_empty() {
        return Ok(());
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    Ok(())
}

/// Parent directory of a data file, or `""` when it has none.
pub fn data_dir_of(file_path: &str) -> &str {
    Path::new(file_path)
        .parent()
        .and_then(|p| p.to_str())
        .unwrap_or("")
}
