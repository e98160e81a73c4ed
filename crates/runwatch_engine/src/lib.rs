//! Runwatch engine: HTTP access to the tracking service and the polling worker.
mod download;
mod fetch;
mod monitor;
mod persist;
mod poller;
mod settings;
mod types;
mod wire;

pub use download::{ArtifactDownloader, DownloadError};
pub use fetch::{ReqwestRunFetcher, RunFetcher};
pub use monitor::RunMonitor;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use poller::PollerHandle;
pub use settings::{MonitorSettings, SettingsError, DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL};
pub use types::{FailureKind, FetchError, PollEvent};
pub use wire::parse_run_document;
