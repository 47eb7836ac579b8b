/// Artifact bootstrap
///
/// The catalog and similarity matrix are published as static blobs. On
/// startup each one is fetched once if the local copy is missing; an
/// existing file is left untouched. There is no retry: a failed fetch is
/// fatal because the engine cannot serve without its matrix.
use std::path::Path;

use reqwest::Client as HttpClient;

use crate::error::{AppError, AppResult};

/// Downloads `url` to `path` unless `path` already exists
pub async fn ensure_local(client: &HttpClient, url: &str, path: &Path) -> AppResult<()> {
    if path.exists() {
        tracing::debug!(path = %path.display(), "Artifact already present, skipping fetch");
        return Ok(());
    }

    tracing::info!(url = %url, path = %path.display(), "Fetching artifact");

    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(AppError::ExternalApi(format!(
            "Artifact source returned status {} for {}",
            response.status(),
            url
        )));
    }

    let bytes = response.bytes().await?;

    tokio::fs::write(path, &bytes)
        .await
        .map_err(|e| AppError::DataLoad(format!("Failed to write {}: {}", path.display(), e)))?;

    tracing::info!(
        path = %path.display(),
        bytes = bytes.len(),
        "Artifact stored"
    );

    Ok(())
}
