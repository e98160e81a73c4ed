use std::collections::BTreeMap;
use std::fmt;

/// Status shown for anything the remote service has not reported yet.
pub const DEFAULT_STATUS: &str = "PENDING";

/// The fixed pipeline steps, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StepName {
    GenerateScript,
    GenerateImages,
    GenerateAudio,
    AssembleVideo,
}

impl StepName {
    pub const ALL: [StepName; 4] = [
        StepName::GenerateScript,
        StepName::GenerateImages,
        StepName::GenerateAudio,
        StepName::AssembleVideo,
    ];

    /// Key used by the tracking service for this step.
    pub fn key(self) -> &'static str {
        match self {
            StepName::GenerateScript => "generate_script",
            StepName::GenerateImages => "generate_images",
            StepName::GenerateAudio => "generate_audio",
            StepName::AssembleVideo => "assemble_video",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            StepName::GenerateScript => "Generate Script",
            StepName::GenerateImages => "Generate Images",
            StepName::GenerateAudio => "Generate Audio",
            StepName::AssembleVideo => "Assemble Video",
        }
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Status reported for a single step. Unrecognized values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StepStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
    Other(String),
}

impl StepStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "PENDING" => StepStatus::Pending,
            "IN_PROGRESS" => StepStatus::InProgress,
            "COMPLETED" => StepStatus::Completed,
            "FAILED" => StepStatus::Failed,
            other => StepStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StepStatus::Pending => "PENDING",
            StepStatus::InProgress => "IN_PROGRESS",
            StepStatus::Completed => "COMPLETED",
            StepStatus::Failed => "FAILED",
            StepStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latest known remote state of a run. Always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSnapshot {
    pub status: Option<String>,
    /// Keyed by the raw step name reported by the service.
    pub steps: BTreeMap<String, StepStatus>,
    pub artifacts: Vec<String>,
    pub orkes_status: Option<String>,
    pub workflow_id: Option<String>,
}

impl RunSnapshot {
    /// Overall status, falling back to `PENDING` when absent or empty.
    pub fn overall_status(&self) -> &str {
        match self.status.as_deref() {
            Some(status) if !status.is_empty() => status,
            _ => DEFAULT_STATUS,
        }
    }

    pub fn step_status(&self, step_key: &str) -> StepStatus {
        self.steps.get(step_key).cloned().unwrap_or_default()
    }
}
