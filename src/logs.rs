//! Log tails for failed jobs.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::{WatchError, WatchResult};
use crate::service::{LogService, with_timeout};

/// Log group that managed batch jobs write to.
pub const DEFAULT_LOG_GROUP: &str = "/aws/batch/job";

/// Number of log lines shown under a failed job.
pub const DEFAULT_TAIL_LINES: usize = 20;

/// Fetches the most recent lines of a job's log stream.
#[derive(Clone)]
pub struct LogTailFetcher {
    service: Arc<dyn LogService>,
    log_group: String,
    limit: usize,
    call_timeout: Duration,
}

impl LogTailFetcher {
    pub fn new(
        service: Arc<dyn LogService>,
        log_group: impl Into<String>,
        limit: usize,
        call_timeout: Duration,
    ) -> Self {
        Self {
            service,
            log_group: log_group.into(),
            limit,
            call_timeout,
        }
    }

    pub fn log_group(&self) -> &str {
        &self.log_group
    }

    /// Up to `limit` most recent messages of `log_stream`.
    ///
    /// A stream that does not exist yields no lines; jobs that fail before
    /// their container starts never get one.
    pub async fn tail(&self, log_stream: &str) -> WatchResult<Vec<String>> {
        let events = with_timeout(
            self.call_timeout,
            format!("get_log_events({log_stream})"),
            self.service
                .get_log_events(&self.log_group, log_stream, self.limit),
        )
        .await;

        match events {
            Ok(events) => Ok(events.into_iter().map(|e| e.message).collect()),
            Err(WatchError::LogStreamUnavailable(reason)) => {
                debug!(log_stream, reason = %reason, "log stream unavailable");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }
}
