//! Command-line surface.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, TimeZone};
use clap::Parser;

use crate::config::WatchConfig;
use crate::error::WatchResult;
use crate::humanize::parse_since;
use crate::job::{JobStatus, parse_status};
use crate::logs::{DEFAULT_LOG_GROUP, DEFAULT_TAIL_LINES};

/// Live activity feed for jobs in a managed job queue.
#[derive(Debug, Parser)]
#[command(name = "jobwatch", version, about)]
pub struct Cli {
    /// Queue to watch
    #[arg(long, env = "JOBWATCH_QUEUE")]
    pub job_queue: String,

    /// Name of jobs to show. Shell-style wildcards are supported
    #[arg(long, env = "JOBWATCH_JOB_NAME", default_value = "*")]
    pub job_name: String,

    /// Only show jobs in this status (repeatable, default: all)
    #[arg(long = "job-status", value_parser = status_arg)]
    pub job_status: Vec<JobStatus>,

    /// Only show jobs created after this time ("now", "2 hours ago", "2024-05-01", ...)
    #[arg(long, env = "JOBWATCH_SINCE", default_value = "now")]
    pub since: String,

    /// Keep polling until interrupted
    #[arg(long)]
    pub watch: bool,

    /// Seconds between polls in watch mode
    #[arg(long, env = "JOBWATCH_INTERVAL", default_value_t = 1)]
    pub interval_secs: u64,

    /// Log group holding job log streams
    #[arg(long, env = "JOBWATCH_LOG_GROUP", default_value = DEFAULT_LOG_GROUP)]
    pub log_group: String,

    /// Log lines to show under a failed job
    #[arg(long, env = "JOBWATCH_TAIL_LINES", default_value_t = DEFAULT_TAIL_LINES)]
    pub tail_lines: usize,

    /// Seconds before a single service call is abandoned
    #[arg(long, env = "JOBWATCH_CALL_TIMEOUT", default_value_t = 30)]
    pub call_timeout_secs: u64,

    /// Region used to build log console links
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// JSON document serving as the queue and log backend
    #[arg(long, env = "JOBWATCH_BACKEND_FILE")]
    pub backend_file: PathBuf,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose logging to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

fn status_arg(s: &str) -> Result<JobStatus, String> {
    parse_status(s).map_err(|e| {
        let names: Vec<_> = JobStatus::ALL.iter().map(JobStatus::as_str).collect();
        format!("{e} (expected one of {})", names.join(", "))
    })
}

impl Cli {
    /// Resolve flags into a validated config, anchoring `--since` at `now`.
    pub fn to_config<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> WatchResult<WatchConfig> {
        let config = WatchConfig {
            queue: self.job_queue.clone(),
            name_pattern: self.job_name.clone(),
            statuses: self.job_status.clone(),
            min_created_at: parse_since(&self.since, now)?,
            watch: self.watch,
            interval: Duration::from_secs(self.interval_secs),
            log_group: self.log_group.clone(),
            tail_lines: self.tail_lines,
            call_timeout: Duration::from_secs(self.call_timeout_secs),
            region: self.region.clone(),
            colorize: !self.no_color,
        };
        config.validate()?;
        Ok(config)
    }
}
