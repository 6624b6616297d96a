use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use ragdesk_engine::{ClientSettings, DEFAULT_BASE_URL};
use ragdesk_logging::{LogDestination, DEFAULT_LOG_FILE};

/// Terminal client for a retrieval-augmented-generation backend.
#[derive(Debug, Parser)]
#[command(name = "ragdesk", version, about)]
pub struct CliArgs {
    /// Base URL of the backend API; endpoints are resolved below it.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Seconds between health checks.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval_secs: u64,

    /// Per-request timeout in seconds. Transport defaults apply when unset.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub request_timeout_secs: Option<u64>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    /// Log file used by the `file` and `both` targets.
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
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

impl CliArgs {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}
