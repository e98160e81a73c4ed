use pretty_assertions::assert_eq;
use runwatch_core::{
    update, ActionKind, ArtifactAction, ArtifactKind, MonitorState, Msg, RunSnapshot,
    StatusColor, StepStatus,
};

fn state_with(snapshot: RunSnapshot) -> MonitorState {
    let (state, _) = update(
        MonitorState::new("http://tracker.local:8000/"),
        Msg::OpenRun("run-42".into()),
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
    state
}

#[test]
fn always_renders_four_rows_in_fixed_order() {
    let mut snapshot = RunSnapshot::default();
    snapshot
        .steps
        .insert("assemble_video".to_string(), StepStatus::Failed);
    snapshot
        .steps
        .insert("upload_video".to_string(), StepStatus::Completed);

    for state in [MonitorState::default(), state_with(snapshot)] {
        let keys: Vec<_> = state.view().steps.into_iter().map(|row| row.key).collect();
        assert_eq!(
            keys,
            vec![
                "generate_script",
                "generate_images",
                "generate_audio",
                "assemble_video"
            ]
        );
    }
}

#[test]
fn in_progress_run_with_one_image() {
    let mut snapshot = RunSnapshot {
        status: Some("IN_PROGRESS".to_string()),
        artifacts: vec!["out/a.png".to_string()],
        ..RunSnapshot::default()
    };
    snapshot
        .steps
        .insert("generate_script".to_string(), StepStatus::Completed);

    let view = state_with(snapshot).view();

    assert_eq!(view.run_id, "run-42");
    assert_eq!(view.overall_status, "IN_PROGRESS");
    assert_eq!(view.error, None);

    let rows: Vec<_> = view
        .steps
        .iter()
        .map(|row| (row.label.as_str(), row.status.as_str(), row.color))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Generate Script", "COMPLETED", StatusColor::Success),
            ("Generate Images", "PENDING", StatusColor::Neutral),
            ("Generate Audio", "PENDING", StatusColor::Neutral),
            ("Assemble Video", "PENDING", StatusColor::Neutral),
        ]
    );

    assert_eq!(view.artifacts.len(), 1);
    let artifact = &view.artifacts[0];
    assert_eq!(artifact.file_name, "a.png");
    assert_eq!(artifact.path, "out/a.png");
    assert_eq!(artifact.kind, ArtifactKind::Image);
    assert_eq!(
        artifact.actions,
        vec![
            ArtifactAction {
                kind: ActionKind::ViewImage,
                url: "http://tracker.local:8000/artifacts/out/a.png".to_string(),
                suggested_filename: None,
            },
            ArtifactAction {
                kind: ActionKind::Download,
                url: "http://tracker.local:8000/artifacts/out/a.png".to_string(),
                suggested_filename: Some("a.png".to_string()),
            },
        ]
    );
}

#[test]
fn each_kind_offers_matching_affordance() {
    let snapshot = RunSnapshot {
        artifacts: vec![
            "temp/voice.mp3".to_string(),
            "output/final.mp4".to_string(),
            "output/project.json".to_string(),
        ],
        ..RunSnapshot::default()
    };
    let view = state_with(snapshot).view();
    let kinds: Vec<Vec<ActionKind>> = view
        .artifacts
        .iter()
        .map(|artifact| artifact.actions.iter().map(|action| action.kind).collect())
        .collect();
    assert_eq!(
        kinds,
        vec![
            vec![ActionKind::PlayAudio, ActionKind::Download],
            vec![ActionKind::WatchVideo, ActionKind::Download],
            vec![ActionKind::Download],
        ]
    );
    assert_eq!(ActionKind::WatchVideo.label(), "Watch Video");
}

#[test]
fn optional_blocks_only_when_non_empty() {
    let view = state_with(RunSnapshot {
        orkes_status: Some("RUNNING".to_string()),
        workflow_id: Some(String::new()),
        ..RunSnapshot::default()
    })
    .view();
    assert_eq!(view.orkes_status.as_deref(), Some("RUNNING"));
    assert_eq!(view.workflow_id, None);

    let view = state_with(RunSnapshot::default()).view();
    assert_eq!(view.orkes_status, None);
    assert_eq!(view.workflow_id, None);
    assert!(view.artifacts.is_empty());
}

#[test]
fn render_is_deterministic_and_reports_terminal_state() {
    let state = state_with(RunSnapshot {
        status: Some("FAILED".to_string()),
        ..RunSnapshot::default()
    });
    assert_eq!(state.view(), state.view());
    assert!(state.view().is_finished());
    assert!(!MonitorState::default().view().is_finished());
}
