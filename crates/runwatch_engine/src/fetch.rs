use reqwest::StatusCode;
use runwatch_core::RunSnapshot;

use crate::wire::parse_run_document;
use crate::{FailureKind, FetchError, MonitorSettings};

/// Source of run snapshots. The poller only ever talks to this seam.
#[async_trait::async_trait]
pub trait RunFetcher: Send + Sync {
    async fn fetch_run(&self, run_id: &str) -> Result<RunSnapshot, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestRunFetcher {
    settings: MonitorSettings,
    client: reqwest::Client,
}

impl ReqwestRunFetcher {
    pub fn new(settings: MonitorSettings) -> Result<Self, FetchError> {
        let client = build_client(&settings)?;
        Ok(Self { settings, client })
    }

    /// Probe `{base}/health`. Any 2xx counts as healthy.
    pub async fn check_health(&self) -> Result<(), FetchError> {
        let url = self.settings.health_url()?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(status_error(status, response.text().await.ok()))
        }
    }
}

#[async_trait::async_trait]
impl RunFetcher for ReqwestRunFetcher {
    async fn fetch_run(&self, run_id: &str) -> Result<RunSnapshot, FetchError> {
        let url = self.settings.run_url(run_id)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, response.text().await.ok()));
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        parse_run_document(&body)
    }
}

pub(crate) fn build_client(settings: &MonitorSettings) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .build()
        .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
}

/// The response body is the message when there is one.
pub(crate) fn status_error(status: StatusCode, body: Option<String>) -> FetchError {
    let message = match body {
        Some(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => format!("Failed: {}", status.as_u16()),
    };
    FetchError::new(FailureKind::HttpStatus(status.as_u16()), message)
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
