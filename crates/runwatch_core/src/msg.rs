use crate::{AttemptId, Epoch, RunSnapshot};

/// Result of one poll attempt as seen by the core: a fresh snapshot or an error message.
pub type FetchOutcome = Result<RunSnapshot, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The viewed run changed (or was opened for the first time).
    OpenRun(String),
    /// The view was closed; stop polling and drop local state.
    CloseRun,
    /// A poll attempt completed, tagged with the session it was issued for.
    FetchFinished {
        epoch: Epoch,
        attempt: AttemptId,
        outcome: FetchOutcome,
    },
}
