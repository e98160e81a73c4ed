use std::time::Duration;

use url::Url;

use crate::{FailureKind, FetchError};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Connection settings for the tracking service.
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub base_url: Url,
    pub poll_interval: Duration,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_artifact_bytes: u64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            poll_interval: DEFAULT_POLL_INTERVAL,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_artifact_bytes: 512 * 1024 * 1024,
        }
    }
}

impl MonitorSettings {
    /// Default settings pointed at another service root. Only http(s) roots are accepted.
    pub fn with_base_url(raw: &str) -> Result<Self, SettingsError> {
        let invalid = |reason: String| SettingsError::InvalidBaseUrl {
            url: raw.to_string(),
            reason,
        };
        let base_url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", base_url.scheme())));
        }
        if base_url.cannot_be_a_base() {
            return Err(invalid("url cannot be a base".to_string()));
        }
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }

    /// Service root without a trailing slash, as used in displayed artifact links.
    pub fn base_url_display(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }

    /// `{base}/runs/{run_id}` with the id encoded as a single segment.
    pub fn run_url(&self, run_id: &str) -> Result<Url, FetchError> {
        self.endpoint(["runs", run_id])
    }

    /// `{base}/artifacts/{path}`; each path segment is encoded separately.
    pub fn artifact_url(&self, artifact_path: &str) -> Result<Url, FetchError> {
        self.endpoint(std::iter::once("artifacts").chain(artifact_path.split('/')))
    }

    pub fn health_url(&self) -> Result<Url, FetchError> {
        self.endpoint(["health"])
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                FetchError::new(
                    FailureKind::InvalidUrl,
                    format!("base url {} cannot carry a path", self.base_url),
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_url_encodes_id_as_one_segment() {
        let settings = MonitorSettings::default();
        assert_eq!(
            settings.run_url("abc-123").unwrap().as_str(),
            "http://127.0.0.1:8000/runs/abc-123"
        );
        assert_eq!(
            settings.run_url("a/b c").unwrap().as_str(),
            "http://127.0.0.1:8000/runs/a%2Fb%20c"
        );
    }

    #[test]
    fn base_path_is_preserved() {
        let settings = MonitorSettings::with_base_url("https://tracker.example.com/api/").unwrap();
        assert_eq!(
            settings.artifact_url("output/final video.mp4").unwrap().as_str(),
            "https://tracker.example.com/api/artifacts/output/final%20video.mp4"
        );
        assert_eq!(
            settings.health_url().unwrap().as_str(),
            "https://tracker.example.com/api/health"
        );
        assert_eq!(settings.base_url_display(), "https://tracker.example.com/api");
    }

    #[test]
    fn rejects_non_http_roots() {
        assert!(matches!(
            MonitorSettings::with_base_url("ftp://example.com"),
            Err(SettingsError::InvalidBaseUrl { .. })
        ));
        assert!(MonitorSettings::with_base_url("not a url").is_err());
        assert!(MonitorSettings::with_base_url("mailto:ops@example.com").is_err());
    }

    #[test]
    fn default_interval_is_two_seconds() {
        assert_eq!(MonitorSettings::default().poll_interval, Duration::from_millis(2000));
    }
}
