//! Artifact retention and traversal-safe path resolution.

use crate::error::ApiError;
use archflow_engine::{validate_serving_name, ServingNameError};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::task::JoinHandle;

/// Resolve a client-supplied artifact name to a path inside `output_dir`.
///
/// The name is re-sanitized server-side before any filesystem access: older
/// artifacts may bear names produced before sanitization tightened, and the
/// serving path must never trust the writer.
///
/// # Errors
///
/// [`ApiError::Traversal`] for escape attempts, [`ApiError::MalformedName`]
/// for disallowed characters, [`ApiError::NotFound`] when the file
/// does not exist under the output directory.
pub async fn resolve_artifact(output_dir: &Path, name: &str) -> Result<PathBuf, ApiError> {
    match validate_serving_name(name) {
        Ok(()) => {}
        Err(ServingNameError::Traversal) => return Err(ApiError::Traversal),
        Err(ServingNameError::Malformed) => return Err(ApiError::MalformedName),
        Err(_) => return Err(ApiError::MalformedName),
    }

    let candidate = output_dir.join(name);

    // Canonicalization both checks existence and collapses any symlink
    // trickery; the result must stay inside the canonical output dir.
    let canonical_dir = tokio::fs::canonicalize(output_dir)
        .await
        .map_err(|_| ApiError::NotFound(name.to_string()))?;
    let canonical = tokio::fs::canonicalize(&candidate)
        .await
        .map_err(|_| ApiError::NotFound(name.to_string()))?;

    if !canonical.starts_with(&canonical_dir) {
        return Err(ApiError::Traversal);
    }
    if !canonical.is_file() {
        return Err(ApiError::NotFound(name.to_string()));
    }
    Ok(canonical)
}

/// Content type for an artifact extension.
#[must_use]
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        Some("dot") => "text/vnd.graphviz",
        _ => "application/octet-stream",
    }
}

/// Delete artifacts whose mtime is older than `ttl`. Returns the number
/// removed.
pub async fn sweep_artifacts(output_dir: &Path, ttl: Duration) -> usize {
    let Ok(mut entries) = tokio::fs::read_dir(output_dir).await else {
        return 0;
    };
    let cutoff = SystemTime::now()
        .checked_sub(ttl)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let mut removed = 0;
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        let Ok(metadata) = entry.metadata().await else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        let Ok(modified) = metadata.modified() else {
            continue;
        };
        if modified < cutoff && tokio::fs::remove_file(&path).await.is_ok() {
            removed += 1;
        }
    }
    if removed > 0 {
        tracing::info!(removed, "artifact sweep");
    }
    removed
}

/// Spawn the artifact retention sweeper.
pub fn spawn_sweeper(output_dir: PathBuf, ttl: Duration, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            sweep_artifacts(&output_dir, ttl).await;
        }
    })
}
