use std::collections::HashSet;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use monitor_logging::{monitor_info, monitor_warn};
use runwatch_core::RunViewModel;
use runwatch_engine::{ArtifactDownloader, ReqwestRunFetcher, RunMonitor};
use tokio::runtime::Runtime;

use super::render::render;
use crate::cli::Args;

/// How long the loop waits for poll results before checking for Ctrl-C again.
const RENDER_TICK: Duration = Duration::from_millis(75);

pub fn run(args: Args) -> anyhow::Result<()> {
    let settings = args.settings()?;
    let runtime = Runtime::new().context("start tokio runtime")?;

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = interrupted.clone();
        runtime.spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                interrupted.store(true, Ordering::SeqCst);
            }
        });
    }

    let health = ReqwestRunFetcher::new(settings.clone())?;
    if let Err(err) = runtime.block_on(health.check_health()) {
        monitor_warn!(
            "Tracking service at {} is not healthy: {}",
            settings.base_url_display(),
            err
        );
    }

    let mut downloads = match &args.download_dir {
        Some(dir) => Some(ArtifactSync::new(ArtifactDownloader::new(settings.clone())?, dir.clone())),
        None => None,
    };

    let mut monitor = RunMonitor::new(&settings)?;
    monitor.start(&args.run_id);

    let mut stdout = io::stdout().lock();
    let mut last_view = None;
    while !interrupted.load(Ordering::SeqCst) {
        monitor.pump_timeout(RENDER_TICK);
        let Some(view) = monitor.take_dirty_view() else {
            continue;
        };
        print_view(&mut stdout, &view)?;
        if let Some(downloads) = downloads.as_mut() {
            downloads.sync(&runtime, &view);
        }
        let finished = view.is_finished();
        if args.exit_when_done && finished {
            monitor_info!("Run {} finished with {}", view.run_id, view.overall_status);
        }
        last_view = Some(view);
        if args.exit_when_done && finished {
            break;
        }
    }
    monitor.stop();

    // One last attempt for anything that failed, then say what is still missing.
    if let (Some(downloads), Some(view)) = (downloads.as_mut(), last_view.as_ref()) {
        downloads.sync(&runtime, view);
        let unsaved = downloads.pending(view);
        if !unsaved.is_empty() {
            monitor_warn!("{} artifact(s) were not saved", unsaved.len());
            writeln!(stdout, "Not saved: {}", unsaved.join(", "))?;
        }
    }
    Ok(())
}

fn print_view(out: &mut impl Write, view: &RunViewModel) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(40))?;
    for line in render(view) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

/// Saves each listed artifact once.
struct ArtifactSync {
    downloader: ArtifactDownloader,
    dest_dir: PathBuf,
    saved: HashSet<String>,
}

impl ArtifactSync {
    fn new(downloader: ArtifactDownloader, dest_dir: PathBuf) -> Self {
        Self {
            downloader,
            dest_dir,
            saved: HashSet::new(),
        }
    }

    /// Listed artifacts that have not been saved yet, in listing order.
    fn pending<'a>(&self, view: &'a RunViewModel) -> Vec<&'a str> {
        view.artifacts
            .iter()
            .map(|artifact| artifact.path.as_str())
            .filter(|path| !self.saved.contains(*path))
            .collect()
    }

    fn sync(&mut self, runtime: &Runtime, view: &RunViewModel) {
        for path in self.pending(view) {
            match runtime.block_on(self.downloader.download(path, &self.dest_dir)) {
                Ok(target) => {
                    println!("Saved {} to {}", path, target.display());
                    self.saved.insert(path.to_string());
                }
                // Retried on the next view change and once more before exit.
                Err(err) => monitor_warn!("Could not save artifact {}: {}", path, err),
            }
        }
    }
}
