use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use monitor_logging::{monitor_debug, monitor_error, monitor_info, monitor_warn};
use runwatch_core::{AttemptId, Epoch};
use tokio::sync::mpsc as async_mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{PollEvent, RunFetcher};

enum PollerCommand {
    Start { run_id: String, epoch: Epoch },
    Stop,
}

/// Background polling worker. Runs a single-threaded tokio runtime on its own thread;
/// at most one polling session is live at a time.
pub struct PollerHandle {
    cmd_tx: async_mpsc::UnboundedSender<PollerCommand>,
    event_rx: mpsc::Receiver<PollEvent>,
}

impl PollerHandle {
    pub fn new(fetcher: Arc<dyn RunFetcher>, poll_interval: Duration) -> Self {
        let (cmd_tx, cmd_rx) = async_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    monitor_error!("Failed to start poller runtime: {}", err);
                    return;
                }
            };
            runtime.block_on(command_loop(fetcher, poll_interval, cmd_rx, event_tx));
        });

        Self { cmd_tx, event_rx }
    }

    /// Supersedes any running session.
    pub fn start(&self, run_id: impl Into<String>, epoch: Epoch) {
        let _ = self.cmd_tx.send(PollerCommand::Start {
            run_id: run_id.into(),
            epoch,
        });
    }

    /// Idempotent; safe when nothing is running.
    pub fn stop(&self) {
        let _ = self.cmd_tx.send(PollerCommand::Stop);
    }

    pub fn try_recv(&self) -> Option<PollEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<PollEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn command_loop(
    fetcher: Arc<dyn RunFetcher>,
    poll_interval: Duration,
    mut cmd_rx: async_mpsc::UnboundedReceiver<PollerCommand>,
    event_tx: mpsc::Sender<PollEvent>,
) {
    let mut session: Option<CancellationToken> = None;

    while let Some(command) = cmd_rx.recv().await {
        if let Some(token) = session.take() {
            token.cancel();
        }
        match command {
            PollerCommand::Start { run_id, epoch } => {
                let token = CancellationToken::new();
                tokio::spawn(poll_session(
                    fetcher.clone(),
                    run_id,
                    epoch,
                    poll_interval,
                    token.clone(),
                    event_tx.clone(),
                ));
                session = Some(token);
            }
            PollerCommand::Stop => {}
        }
    }

    // Handle dropped.
    if let Some(token) = session {
        token.cancel();
    }
}

async fn poll_session(
    fetcher: Arc<dyn RunFetcher>,
    run_id: String,
    epoch: Epoch,
    poll_interval: Duration,
    cancel: CancellationToken,
    event_tx: mpsc::Sender<PollEvent>,
) {
    monitor_info!(
        "Polling run {} every {:?} (epoch {})",
        run_id,
        poll_interval,
        epoch
    );

    // The first tick completes immediately; later ticks keep a fixed grid from here.
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut attempt: AttemptId = 0;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                attempt += 1;
                tokio::spawn(run_attempt(
                    fetcher.clone(),
                    run_id.clone(),
                    epoch,
                    attempt,
                    cancel.clone(),
                    event_tx.clone(),
                ));
            }
        }
    }

    monitor_info!("Stopped polling run {} (epoch {})", run_id, epoch);
}

async fn run_attempt(
    fetcher: Arc<dyn RunFetcher>,
    run_id: String,
    epoch: Epoch,
    attempt: AttemptId,
    cancel: CancellationToken,
    event_tx: mpsc::Sender<PollEvent>,
) {
    monitor_debug!("Poll attempt {} for run {}", attempt, run_id);

    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            monitor_debug!("Poll attempt {} for run {} cancelled", attempt, run_id);
            return;
        }
        result = fetcher.fetch_run(&run_id) => result,
    };

    if let Err(err) = &result {
        monitor_warn!(
            "Poll attempt {} for run {} failed ({}): {}",
            attempt,
            run_id,
            err.kind,
            err.message
        );
    }

    let _ = event_tx.send(PollEvent::FetchFinished {
        epoch,
        attempt,
        result,
    });
}
