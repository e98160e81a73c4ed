use crate::view_model::{self, RunViewModel};
use crate::{FetchOutcome, RunSnapshot};

/// Session generation. Bumped every time a session ends.
pub type Epoch = u64;
/// Per-session attempt number, starting at 1.
pub type AttemptId = u64;

const DEFAULT_ARTIFACT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Local session state for the run being viewed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorState {
    artifact_base_url: String,
    run_id: String,
    active: bool,
    epoch: Epoch,
    last_applied_attempt: AttemptId,
    snapshot: Option<RunSnapshot>,
    error: Option<String>,
    dirty: bool,
}

impl Default for MonitorState {
    fn default() -> Self {
        Self::new(DEFAULT_ARTIFACT_BASE_URL)
    }
}

impl MonitorState {
    /// `artifact_base_url` is the tracking service root that serves `/artifacts/{path}`.
    pub fn new(artifact_base_url: impl Into<String>) -> Self {
        Self {
            artifact_base_url: artifact_base_url.into(),
            run_id: String::new(),
            active: false,
            epoch: 0,
            last_applied_attempt: 0,
            snapshot: None,
            error: None,
            dirty: false,
        }
    }

    pub fn view(&self) -> RunViewModel {
        view_model::render(self)
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn snapshot(&self) -> Option<&RunSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn artifact_base_url(&self) -> &str {
        &self.artifact_base_url
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn close_session(&mut self) {
        self.epoch += 1;
        let had_content =
            self.active || !self.run_id.is_empty() || self.snapshot.is_some() || self.error.is_some();
        self.active = false;
        self.run_id.clear();
        self.last_applied_attempt = 0;
        self.snapshot = None;
        self.error = None;
        if had_content {
            self.dirty = true;
        }
    }

    pub(crate) fn open_session(&mut self, run_id: String) -> Epoch {
        self.run_id = run_id;
        self.active = true;
        self.dirty = true;
        self.epoch
    }

    /// Only results of the live session that are newer than the last applied one count.
    pub(crate) fn accepts(&self, epoch: Epoch, attempt: AttemptId) -> bool {
        self.active && epoch == self.epoch && attempt > self.last_applied_attempt
    }

    pub(crate) fn apply_outcome(&mut self, attempt: AttemptId, outcome: FetchOutcome) {
        self.last_applied_attempt = attempt;
        match outcome {
            Ok(snapshot) => {
                if self.snapshot.as_ref() != Some(&snapshot) || self.error.is_some() {
                    self.dirty = true;
                }
                self.snapshot = Some(snapshot);
                self.error = None;
            }
            Err(message) => {
                if self.error.as_deref() != Some(message.as_str()) {
                    self.dirty = true;
                }
                self.error = Some(message);
            }
        }
    }
}
