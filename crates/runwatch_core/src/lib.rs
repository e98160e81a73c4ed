//! Runwatch core: pure session state machine, classifiers and view-model helpers.
mod artifact;
mod effect;
mod model;
mod msg;
mod state;
mod steps;
mod update;
mod view_model;

pub use artifact::{classify_artifact, ArtifactKind, ClassifiedArtifact};
pub use effect::Effect;
pub use model::{RunSnapshot, StepName, StepStatus, DEFAULT_STATUS};
pub use msg::{FetchOutcome, Msg};
pub use state::{AttemptId, Epoch, MonitorState};
pub use steps::{step_label, step_row, StatusColor};
pub use update::update;
pub use view_model::{
    ActionKind, ArtifactAction, ArtifactView, RunViewModel, StepRowView, ARTIFACTS_SEGMENT,
};
