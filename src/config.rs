//! Resolved run parameters for a watch session.

use std::time::Duration;

use crate::error::{WatchError, WatchResult};
use crate::job::JobStatus;
use crate::logs::{DEFAULT_LOG_GROUP, DEFAULT_TAIL_LINES};

/// Delay between polling cycles in watch mode.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Budget for a single queue or log service call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything a [`WatchLoop`](crate::WatchLoop) needs, already parsed.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub queue: String,
    pub name_pattern: String,
    /// Statuses to list. Empty means all of them.
    pub statuses: Vec<JobStatus>,
    /// Only jobs created strictly after this epoch-millisecond instant.
    pub min_created_at: i64,
    pub watch: bool,
    pub interval: Duration,
    pub log_group: String,
    pub tail_lines: usize,
    pub call_timeout: Duration,
    pub region: Option<String>,
    pub colorize: bool,
}

impl WatchConfig {
    /// Defaults for everything but the queue: all statuses, all names,
    /// jobs created after the Unix epoch, a single cycle.
    pub fn new(queue: impl Into<String>) -> Self {
        Self {
            queue: queue.into(),
            name_pattern: "*".into(),
            statuses: Vec::new(),
            min_created_at: 0,
            watch: false,
            interval: DEFAULT_INTERVAL,
            log_group: DEFAULT_LOG_GROUP.into(),
            tail_lines: DEFAULT_TAIL_LINES,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            region: None,
            colorize: true,
        }
    }

    /// The statuses to scan, with an empty filter widened to every status.
    pub fn effective_statuses(&self) -> Vec<JobStatus> {
        if self.statuses.is_empty() {
            JobStatus::ALL.to_vec()
        } else {
            let mut statuses = self.statuses.clone();
            statuses.sort();
            statuses.dedup();
            statuses
        }
    }

    pub fn validate(&self) -> WatchResult<()> {
        if self.queue.trim().is_empty() {
            return Err(WatchError::Configuration("job queue must not be empty".into()));
        }
        if self.interval.is_zero() {
            return Err(WatchError::Configuration("interval must be positive".into()));
        }
        if self.tail_lines == 0 {
            return Err(WatchError::Configuration("tail lines must be positive".into()));
        }
        if self.call_timeout.is_zero() {
            return Err(WatchError::Configuration("call timeout must be positive".into()));
        }
        Ok(())
    }
}
