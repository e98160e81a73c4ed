use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use runwatch_engine::{MonitorSettings, DEFAULT_BASE_URL};

use crate::logging::LogDestination;

/// Watch one run of the generation pipeline and print its progress.
#[derive(Debug, Parser)]
#[command(name = "runwatch", version)]
pub struct Args {
    /// Run identifier to watch. An empty id shows a pending run and never polls.
    pub run_id: String,

    /// Root of the tracking service.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Milliseconds between poll attempts.
    #[arg(long, default_value_t = 2000, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: u64,

    /// Save every artifact into this directory as soon as it is listed.
    #[arg(long)]
    pub download_dir: Option<PathBuf>,

    /// Exit once the run reports COMPLETED or FAILED.
    #[arg(long)]
    pub exit_when_done: bool,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

impl Args {
    pub fn settings(&self) -> anyhow::Result<MonitorSettings> {
        let settings = MonitorSettings::with_base_url(&self.base_url)
            .with_context(|| format!("bad --base-url {}", self.base_url))?;
        Ok(MonitorSettings {
            poll_interval: Duration::from_millis(self.interval_ms),
            ..settings
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_conventions() {
        let args = Args::try_parse_from(["runwatch", "run-1"]).unwrap();
        assert_eq!(args.run_id, "run-1");
        assert_eq!(args.log, LogTarget::File);
        assert!(!args.exit_when_done);

        let settings = args.settings().unwrap();
        assert_eq!(settings.poll_interval, Duration::from_millis(2000));
        assert_eq!(settings.base_url_display(), DEFAULT_BASE_URL);
    }

    #[test]
    fn flags_override_settings() {
        let args = Args::try_parse_from([
            "runwatch",
            "run-1",
            "--base-url",
            "https://tracker.example.com/api",
            "--interval-ms",
            "500",
            "--download-dir",
            "out",
            "--exit-when-done",
            "--log",
            "both",
        ])
        .unwrap();
        let settings = args.settings().unwrap();
        assert_eq!(settings.poll_interval, Duration::from_millis(500));
        assert_eq!(settings.base_url_display(), "https://tracker.example.com/api");
        assert_eq!(args.download_dir, Some(PathBuf::from("out")));
        assert!(args.exit_when_done);
        assert_eq!(args.log, LogTarget::Both);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Args::try_parse_from(["runwatch", "r", "--interval-ms", "0"]).is_err());
        let args = Args::try_parse_from(["runwatch", "r", "--base-url", "ftp://x"]).unwrap();
        assert!(args.settings().is_err());
    }
}
