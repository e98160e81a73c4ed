use crate::{RunSnapshot, StepName, StepRowView, StepStatus};

/// Presentation color token for a step status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Success,
    Warning,
    Danger,
    Neutral,
}

impl StatusColor {
    pub fn for_status(status: &StepStatus) -> Self {
        match status {
            StepStatus::Completed => StatusColor::Success,
            StepStatus::InProgress => StatusColor::Warning,
            StepStatus::Failed => StatusColor::Danger,
            StepStatus::Pending | StepStatus::Other(_) => StatusColor::Neutral,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            StatusColor::Success => "success",
            StatusColor::Warning => "warning",
            StatusColor::Danger => "danger",
            StatusColor::Neutral => "neutral",
        }
    }
}

/// Friendly name for a step key; unknown keys are shown as-is.
pub fn step_label(step_key: &str) -> &str {
    match StepName::from_key(step_key) {
        Some(step) => step.label(),
        None => step_key,
    }
}

/// Maps a step and the current snapshot (if any) to its display row.
pub fn step_row(step_key: &str, snapshot: Option<&RunSnapshot>) -> StepRowView {
    let status = snapshot
        .map(|snapshot| snapshot.step_status(step_key))
        .unwrap_or_default();
    StepRowView {
        key: step_key.to_string(),
        label: step_label(step_key).to_string(),
        color: StatusColor::for_status(&status),
        status: status.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with(step: &str, status: &str) -> RunSnapshot {
        let mut snapshot = RunSnapshot::default();
        snapshot
            .steps
            .insert(step.to_string(), StepStatus::parse(status));
        snapshot
    }

    #[test]
    fn known_statuses_map_to_fixed_colors() {
        let cases = [
            ("COMPLETED", StatusColor::Success),
            ("IN_PROGRESS", StatusColor::Warning),
            ("FAILED", StatusColor::Danger),
            ("PENDING", StatusColor::Neutral),
            ("QUEUED", StatusColor::Neutral),
            ("completed", StatusColor::Neutral),
        ];
        for (raw, expected) in cases {
            let snapshot = snapshot_with("generate_images", raw);
            let row = step_row("generate_images", Some(&snapshot));
            assert_eq!(row.color, expected, "status {raw}");
            assert_eq!(row.status, raw);
        }
    }

    #[test]
    fn missing_step_is_pending_and_neutral() {
        let snapshot = snapshot_with("generate_script", "COMPLETED");
        let row = step_row("assemble_video", Some(&snapshot));
        assert_eq!(row.status, "PENDING");
        assert_eq!(row.color, StatusColor::Neutral);

        let row = step_row("assemble_video", None);
        assert_eq!(row.status, "PENDING");
        assert_eq!(row.label, "Assemble Video");
    }

    #[test]
    fn unknown_step_uses_raw_key_as_label() {
        let snapshot = snapshot_with("upload_video", "IN_PROGRESS");
        let row = step_row("upload_video", Some(&snapshot));
        assert_eq!(row.label, "upload_video");
        assert_eq!(row.color, StatusColor::Warning);
    }

    #[test]
    fn color_tokens() {
        assert_eq!(StatusColor::Success.token(), "success");
        assert_eq!(StatusColor::Warning.token(), "warning");
        assert_eq!(StatusColor::Danger.token(), "danger");
        assert_eq!(StatusColor::Neutral.token(), "neutral");
    }
}
