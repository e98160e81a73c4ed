use monitor_logging::monitor_debug;

use crate::{Effect, MonitorState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: MonitorState, msg: Msg) -> (MonitorState, Vec<Effect>) {
    let effects = match msg {
        Msg::OpenRun(raw) => {
            // A new run id always ends the previous session first.
            state.close_session();
            // Whitespace-only counts as empty; any other id is passed on verbatim.
            if raw.trim().is_empty() {
                vec![Effect::StopPolling]
            } else {
                let epoch = state.open_session(raw.clone());
                vec![
                    Effect::StopPolling,
                    Effect::StartPolling { run_id: raw, epoch },
                ]
            }
        }
        Msg::CloseRun => {
            state.close_session();
            vec![Effect::StopPolling]
        }
        Msg::FetchFinished {
            epoch,
            attempt,
            outcome,
        } => {
            if state.accepts(epoch, attempt) {
                state.apply_outcome(attempt, outcome);
            } else {
                monitor_debug!(
                    "Discarding poll result epoch={} attempt={} (current epoch={})",
                    epoch,
                    attempt,
                    state.epoch()
                );
            }
            Vec::new()
        }
    };

    (state, effects)
}
