use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use monitor_logging::monitor_info;
use runwatch_core::classify_artifact;
use thiserror::Error;

use crate::fetch::{build_client, map_reqwest_error, status_error};
use crate::{AtomicFileWriter, FailureKind, FetchError, MonitorSettings, PersistError};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("artifact path {0:?} has no usable file name")]
    InvalidFileName(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Saves artifacts served at `{base}/artifacts/{path}` under their file name.
#[derive(Debug, Clone)]
pub struct ArtifactDownloader {
    settings: MonitorSettings,
    client: reqwest::Client,
}

impl ArtifactDownloader {
    pub fn new(settings: MonitorSettings) -> Result<Self, FetchError> {
        let client = build_client(&settings)?;
        Ok(Self { settings, client })
    }

    pub async fn download(
        &self,
        artifact_path: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, DownloadError> {
        let file_name = classify_artifact(artifact_path).file_name;
        if matches!(file_name.as_str(), "" | "." | "..") || file_name.contains('\\') {
            return Err(DownloadError::InvalidFileName(artifact_path.to_string()));
        }

        let url = self.settings.artifact_url(artifact_path)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, response.text().await.ok()).into());
        }

        let max_bytes = self.settings.max_artifact_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len).into());
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len).into());
            }
            bytes.extend_from_slice(&chunk);
        }

        let writer = AtomicFileWriter::new(dest_dir.to_path_buf());
        let target = writer.write(&file_name, &bytes)?;
        monitor_info!(
            "Downloaded artifact {} ({} bytes) to {:?}",
            artifact_path,
            bytes.len(),
            target
        );
        Ok(target)
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "artifact too large",
    )
}
