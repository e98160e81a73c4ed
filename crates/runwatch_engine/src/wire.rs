use std::collections::BTreeMap;

use runwatch_core::{RunSnapshot, StepStatus};
use serde::Deserialize;

use crate::{FailureKind, FetchError};

/// Run resource as served by the tracking service. Absent and `null` mean the same thing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RunDocument {
    status: Option<String>,
    steps: Option<BTreeMap<String, Option<String>>>,
    artifacts: Option<Vec<String>>,
    #[serde(alias = "orkesStatus")]
    orkes_status: Option<String>,
    #[serde(alias = "workflowId")]
    workflow_id: Option<String>,
}

impl From<RunDocument> for RunSnapshot {
    fn from(doc: RunDocument) -> Self {
        let steps = doc
            .steps
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(name, status)| match status {
                Some(status) if !status.is_empty() => Some((name, StepStatus::parse(&status))),
                _ => None,
            })
            .collect();

        RunSnapshot {
            status: doc.status,
            steps,
            artifacts: doc.artifacts.unwrap_or_default(),
            orkes_status: doc.orkes_status,
            workflow_id: doc.workflow_id,
        }
    }
}

/// Parse a run resource body into a snapshot.
pub fn parse_run_document(body: &str) -> Result<RunSnapshot, FetchError> {
    serde_json::from_str::<RunDocument>(body)
        .map(RunSnapshot::from)
        .map_err(|err| FetchError::new(FailureKind::Parse, format!("invalid run document: {err}")))
}
