use crate::steps::step_row;
use crate::{classify_artifact, ArtifactKind, MonitorState, StatusColor, StepName, DEFAULT_STATUS};

/// Path segment of the artifact retrieval endpoint.
pub const ARTIFACTS_SEGMENT: &str = "artifacts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunViewModel {
    pub run_id: String,
    /// Always one row per fixed step, in declared order.
    pub steps: Vec<StepRowView>,
    pub overall_status: String,
    pub error: Option<String>,
    pub artifacts: Vec<ArtifactView>,
    pub orkes_status: Option<String>,
    pub workflow_id: Option<String>,
}

impl RunViewModel {
    pub fn is_finished(&self) -> bool {
        matches!(self.overall_status.as_str(), "COMPLETED" | "FAILED")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRowView {
    pub key: String,
    pub label: String,
    pub status: String,
    pub color: StatusColor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactView {
    pub path: String,
    pub file_name: String,
    pub kind: ArtifactKind,
    pub actions: Vec<ArtifactAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    ViewImage,
    PlayAudio,
    WatchVideo,
    Download,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::ViewImage => "View Image",
            ActionKind::PlayAudio => "Play Audio",
            ActionKind::WatchVideo => "Watch Video",
            ActionKind::Download => "Download",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactAction {
    pub kind: ActionKind,
    pub url: String,
    /// Set for downloads only.
    pub suggested_filename: Option<String>,
}

pub(crate) fn render(state: &MonitorState) -> RunViewModel {
    let snapshot = state.snapshot();
    let steps = StepName::ALL
        .iter()
        .map(|step| step_row(step.key(), snapshot))
        .collect();

    let artifacts = snapshot
        .map(|snapshot| {
            snapshot
                .artifacts
                .iter()
                .map(|path| artifact_view(state.artifact_base_url(), path))
                .collect()
        })
        .unwrap_or_default();

    RunViewModel {
        run_id: state.run_id().to_string(),
        steps,
        overall_status: snapshot
            .map(|snapshot| snapshot.overall_status())
            .unwrap_or(DEFAULT_STATUS)
            .to_string(),
        error: state.error().map(ToOwned::to_owned),
        artifacts,
        orkes_status: snapshot.and_then(|s| non_empty(s.orkes_status.as_deref())),
        workflow_id: snapshot.and_then(|s| non_empty(s.workflow_id.as_deref())),
    }
}

fn artifact_view(base_url: &str, path: &str) -> ArtifactView {
    let classified = classify_artifact(path);
    let url = format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        ARTIFACTS_SEGMENT,
        path
    );

    let preview = match classified.kind {
        ArtifactKind::Image => Some(ActionKind::ViewImage),
        ArtifactKind::Audio => Some(ActionKind::PlayAudio),
        ArtifactKind::Video => Some(ActionKind::WatchVideo),
        ArtifactKind::Other => None,
    };
    let mut actions = Vec::with_capacity(2);
    if let Some(kind) = preview {
        actions.push(ArtifactAction {
            kind,
            url: url.clone(),
            suggested_filename: None,
        });
    }
    actions.push(ArtifactAction {
        kind: ActionKind::Download,
        url,
        suggested_filename: Some(classified.file_name.clone()),
    });

    ArtifactView {
        path: classified.path,
        file_name: classified.file_name,
        kind: classified.kind,
        actions,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(ToOwned::to_owned)
}
