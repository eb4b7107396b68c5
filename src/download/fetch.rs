//! Streaming download of the audio resource into a temp artifact.
//!
//! The temp artifact's lifetime is tied to a [`TempGuard`]: whatever path
//! the request takes after a download begins — success, bad status, I/O
//! failure, a failed decrypt later on — the staging file is removed when the
//! guard drops.

use crate::error::{AppError, AppResult};
use futures_util::StreamExt;
use std::io::Write;
use std::path::{Path, PathBuf};

/// RAII guard for an in-flight download artifact.
pub struct TempGuard {
    path: PathBuf,
}

impl TempGuard {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempGuard {
    fn drop(&mut self) {
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                log::warn!("Temp artifact not removed: {} ({})", self.path.display(), e);
            }
        }
    }
}

/// Stream `url` into `temp` in chunks.
///
/// Non-success status is `AppError::DownloadStatus` (the code reaches the
/// user); transport and file errors are `AppError::Download`. A partially
/// written file is left for the caller's guard to clean up.
pub async fn fetch_to_temp(client: &reqwest::Client, url: &str, temp: &Path) -> AppResult<()> {
    log::info!("📥 Fetching audio: {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::Download(format!("request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::DownloadStatus(status));
    }

    let mut file =
        fs_err::File::create(temp).map_err(|e| AppError::Download(format!("failed to create temp file: {e}")))?;

    let mut downloaded: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| AppError::Download(format!("error reading chunk: {e}")))?;
        file.write_all(&chunk)
            .map_err(|e| AppError::Download(format!("error writing to file: {e}")))?;
        downloaded += chunk.len() as u64;
    }

    file.flush()
        .map_err(|e| AppError::Download(format!("failed to flush file: {e}")))?;

    log::info!(
        "✅ Audio fetched: {} ({:.2} MB)",
        temp.display(),
        downloaded as f64 / (1024.0 * 1024.0)
    );

    Ok(())
}
