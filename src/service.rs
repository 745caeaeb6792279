//! Collaborator traits for the remote job queue and log store.
//!
//! The watcher never talks to a cloud SDK directly. It is handed a
//! [`QueueService`] and a [`LogService`] at construction time:
//!
//! ```text
//!   list_jobs() ──→ describe_jobs() ──→ get_log_events()
//!   (paginated)      (one job id)        (one log stream)
//! ```
//!
//! ## Method table
//!
//! | Trait | Method | Returns |
//! |-------|--------|---------|
//! | `QueueService` | `list_jobs()` | `WatchResult<JobPage>` |
//! | `QueueService` | `describe_jobs()` | `WatchResult<Vec<JobDetail>>` |
//! | `LogService` | `get_log_events()` | `WatchResult<Vec<LogEvent>>` |
//!
//! Implementations report an invalid log stream reference as
//! [`WatchError::LogStreamUnavailable`](crate::WatchError::LogStreamUnavailable)
//! so callers can tell it apart from transport failures.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{WatchError, WatchResult};
use crate::job::{JobId, JobRecord, JobStatus};

/// The remote job queue.
#[async_trait]
pub trait QueueService: Send + Sync {
    /// List one page of jobs in `queue` with exactly `status`.
    ///
    /// `next_token` is the opaque continuation returned by the previous page,
    /// `None` for the first page.
    async fn list_jobs(
        &self,
        queue: &str,
        status: JobStatus,
        next_token: Option<&str>,
    ) -> WatchResult<JobPage>;

    /// Fetch the full description of the given jobs.
    ///
    /// Unknown ids are omitted from the result rather than reported as errors.
    async fn describe_jobs(&self, job_ids: &[JobId]) -> WatchResult<Vec<JobDetail>>;
}

/// The remote log store.
#[async_trait]
pub trait LogService: Send + Sync {
    /// Fetch up to `limit` of the most recent events of a log stream.
    async fn get_log_events(
        &self,
        log_group: &str,
        log_stream: &str,
        limit: usize,
    ) -> WatchResult<Vec<LogEvent>>;
}

/// One page of a job listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPage {
    #[serde(rename = "jobSummaryList")]
    pub jobs: Vec<JobRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl JobPage {
    /// A final page (no continuation).
    pub fn last(jobs: Vec<JobRecord>) -> Self {
        Self {
            jobs,
            next_token: None,
        }
    }

    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }
}

/// Full description of a single job.
///
/// Array and multi-node parent jobs carry no `container`; their children do.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    pub job_id: JobId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_properties: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_properties: Option<serde_json::Value>,
}

impl JobDetail {
    pub fn new(job_id: impl Into<JobId>) -> Self {
        Self {
            job_id: job_id.into(),
            container: None,
            array_properties: None,
            node_properties: None,
        }
    }

    pub fn with_log_stream(mut self, stream: impl Into<String>) -> Self {
        self.container = Some(ContainerDetail {
            log_stream_name: Some(stream.into()),
            ..ContainerDetail::default()
        });
        self
    }

    /// The log stream name, if the detail has the expected shape.
    pub fn log_stream(&self) -> WatchResult<&str> {
        self.container
            .as_ref()
            .and_then(|c| c.log_stream_name.as_deref())
            .ok_or_else(|| WatchError::DetailShapeMismatch(self.job_id.to_string()))
    }
}

/// Container section of a job description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_stream_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A single log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    pub message: String,
}

impl LogEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            message: message.into(),
        }
    }
}

/// Run a collaborator call under a time budget.
///
/// An elapsed budget becomes [`WatchError::Timeout`] naming `what`.
pub async fn with_timeout<T>(
    budget: Duration,
    what: impl Into<String>,
    call: impl Future<Output = WatchResult<T>>,
) -> WatchResult<T> {
    match tokio::time::timeout(budget, call).await {
        Ok(result) => result,
        Err(_) => Err(WatchError::Timeout(format!(
            "{} after {}ms",
            what.into(),
            budget.as_millis()
        ))),
    }
}
