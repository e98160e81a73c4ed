use std::sync::Arc;
use std::time::Duration;

use monitor_logging::monitor_info;
use runwatch_core::{update, Effect, MonitorState, Msg, RunViewModel};

use crate::{FetchError, MonitorSettings, PollEvent, PollerHandle, ReqwestRunFetcher, RunFetcher};

/// Owns the local session state and is its only writer. Poll results reach the
/// state only through [`RunMonitor::pump`], on the caller's thread.
pub struct RunMonitor {
    state: MonitorState,
    poller: PollerHandle,
}

impl RunMonitor {
    pub fn new(settings: &MonitorSettings) -> Result<Self, FetchError> {
        let fetcher = ReqwestRunFetcher::new(settings.clone())?;
        Ok(Self::with_fetcher(Arc::new(fetcher), settings))
    }

    pub fn with_fetcher(fetcher: Arc<dyn RunFetcher>, settings: &MonitorSettings) -> Self {
        Self {
            state: MonitorState::new(settings.base_url_display()),
            poller: PollerHandle::new(fetcher, settings.poll_interval),
        }
    }

    /// Starts watching `run_id`, ending any previous session. An empty id only stops.
    pub fn start(&mut self, run_id: &str) {
        monitor_info!("Opening run {:?}", run_id);
        self.dispatch(Msg::OpenRun(run_id.to_string()));
    }

    pub fn stop(&mut self) {
        self.dispatch(Msg::CloseRun);
    }

    /// Applies every poll result received so far. Returns how many were processed.
    pub fn pump(&mut self) -> usize {
        let mut processed = 0;
        while let Some(event) = self.poller.try_recv() {
            self.apply_event(event);
            processed += 1;
        }
        processed
    }

    /// Waits up to `timeout` for the next poll result, then applies it and anything queued behind it.
    pub fn pump_timeout(&mut self, timeout: Duration) -> usize {
        match self.poller.recv_timeout(timeout) {
            Some(event) => {
                self.apply_event(event);
                1 + self.pump()
            }
            None => 0,
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn view(&self) -> RunViewModel {
        self.state.view()
    }

    /// The current view if anything changed since the last call.
    pub fn take_dirty_view(&mut self) -> Option<RunViewModel> {
        self.state.consume_dirty().then(|| self.state.view())
    }

    fn apply_event(&mut self, event: PollEvent) {
        let msg = match event {
            PollEvent::FetchFinished {
                epoch,
                attempt,
                result,
            } => Msg::FetchFinished {
                epoch,
                attempt,
                outcome: result.map_err(|err| err.message),
            },
        };
        self.dispatch(msg);
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            match effect {
                Effect::StartPolling { run_id, epoch } => self.poller.start(run_id, epoch),
                Effect::StopPolling => self.poller.stop(),
            }
        }
    }
}

impl Drop for RunMonitor {
    fn drop(&mut self) {
        self.poller.stop();
    }
}
