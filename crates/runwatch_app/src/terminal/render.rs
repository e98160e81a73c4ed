use runwatch_core::{ArtifactView, RunViewModel, StatusColor, StepRowView};

/// Widest status badge, so labels line up.
const STATUS_WIDTH: usize = 11;

pub fn render(view: &RunViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("Run: {}", view.run_id));
    if let Some(error) = &view.error {
        lines.push(format!("Error: {error}"));
    }

    lines.push(String::new());
    lines.extend(view.steps.iter().map(format_step_row));

    lines.push(String::new());
    lines.push(format!("Status: {}", view.overall_status));

    if !view.artifacts.is_empty() {
        lines.push(String::new());
        lines.push("Generated Files:".to_string());
        for artifact in &view.artifacts {
            lines.extend(format_artifact(artifact));
        }
    }

    if let Some(orkes_status) = &view.orkes_status {
        lines.push(format!("Orkes Status: {orkes_status}"));
    }
    if let Some(workflow_id) = &view.workflow_id {
        lines.push(format!("Workflow ID: {workflow_id}"));
    }
    lines
}

fn format_step_row(row: &StepRowView) -> String {
    format!(
        "{} [{:<width$}] {}",
        color_glyph(row.color),
        row.status,
        row.label,
        width = STATUS_WIDTH
    )
}

fn format_artifact(artifact: &ArtifactView) -> Vec<String> {
    let mut lines = vec![format!("  {}  ({})", artifact.file_name, artifact.path)];
    for action in &artifact.actions {
        match &action.suggested_filename {
            Some(name) => lines.push(format!(
                "    {}: {} (save as {})",
                action.kind.label(),
                action.url,
                name
            )),
            None => lines.push(format!("    {}: {}", action.kind.label(), action.url)),
        }
    }
    lines
}

fn color_glyph(color: StatusColor) -> char {
    match color {
        StatusColor::Success => '+',
        StatusColor::Warning => '~',
        StatusColor::Danger => '!',
        StatusColor::Neutral => '.',
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use runwatch_core::{update, MonitorState, Msg, RunSnapshot, StepStatus};

    use super::*;

    fn view_of(snapshot: RunSnapshot, error: Option<&str>) -> RunViewModel {
        let (state, _) = update(
            MonitorState::new("http://127.0.0.1:8000"),
            Msg::OpenRun("run-9".into()),
        );
        let epoch = state.epoch();
        let (state, _) = update(
            state,
            Msg::FetchFinished {
                epoch,
                attempt: 1,
                outcome: Ok(snapshot),
            },
        );
        let state = match error {
            Some(message) => {
                update(
                    state,
                    Msg::FetchFinished {
                        epoch,
                        attempt: 2,
                        outcome: Err(message.to_string()),
                    },
                )
                .0
            }
            None => state,
        };
        state.view()
    }

    #[test]
    fn renders_full_run() {
        let mut snapshot = RunSnapshot {
            status: Some("IN_PROGRESS".to_string()),
            artifacts: vec!["out/a.png".to_string(), "out/notes.txt".to_string()],
            orkes_status: Some("RUNNING".to_string()),
            workflow_id: Some("wf-1".to_string()),
            ..RunSnapshot::default()
        };
        snapshot
            .steps
            .insert("generate_script".to_string(), StepStatus::Completed);
        snapshot
            .steps
            .insert("generate_images".to_string(), StepStatus::InProgress);

        let lines = render(&view_of(snapshot, None));
        assert_eq!(
            lines,
            vec![
                "Run: run-9",
                "",
                "+ [COMPLETED  ] Generate Script",
                "~ [IN_PROGRESS] Generate Images",
                ". [PENDING    ] Generate Audio",
                ". [PENDING    ] Assemble Video",
                "",
                "Status: IN_PROGRESS",
                "",
                "Generated Files:",
                "  a.png  (out/a.png)",
                "    View Image: http://127.0.0.1:8000/artifacts/out/a.png",
                "    Download: http://127.0.0.1:8000/artifacts/out/a.png (save as a.png)",
                "  notes.txt  (out/notes.txt)",
                "    Download: http://127.0.0.1:8000/artifacts/out/notes.txt (save as notes.txt)",
                "Orkes Status: RUNNING",
                "Workflow ID: wf-1",
            ]
        );
    }

    #[test]
    fn error_is_shown_with_stale_data() {
        let mut snapshot = RunSnapshot::default();
        snapshot
            .steps
            .insert("assemble_video".to_string(), StepStatus::Failed);

        let lines = render(&view_of(snapshot, Some("db down")));
        assert_eq!(lines[1], "Error: db down");
        assert!(lines.contains(&"! [FAILED     ] Assemble Video".to_string()));
        assert!(lines.contains(&"Status: PENDING".to_string()));
        assert!(!lines.iter().any(|line| line.starts_with("Generated Files")));
    }
}
