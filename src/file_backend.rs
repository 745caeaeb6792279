//! A queue and log backend served from a JSON document on disk.
//!
//! The document is re-read on every call, so editing it while `--watch` runs
//! drives the feed:
//!
//! ```json
//! {
//!   "pageSize": 100,
//!   "queues": {
//!     "gpu": [
//!       { "jobId": "a1", "jobName": "train", "status": "FAILED", "createdAt": 1714560000000,
//!         "startedAt": 1714560005000, "stoppedAt": 1714560065000,
//!         "statusReason": "Essential container in task exited",
//!         "container": { "logStreamName": "train/default/a1" } }
//!     ]
//!   },
//!   "logs": { "train/default/a1": ["loading data", "Killed"] }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::trace;

use crate::error::{WatchError, WatchResult};
use crate::job::{JobId, JobRecord, JobStatus};
use crate::service::{ContainerDetail, JobDetail, JobPage, LogEvent, LogService, QueueService};

const DEFAULT_PAGE_SIZE: usize = 100;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackendDocument {
    #[serde(default = "default_page_size")]
    page_size: usize,
    #[serde(default)]
    queues: BTreeMap<String, Vec<JobRecord>>,
    #[serde(default)]
    logs: BTreeMap<String, Vec<String>>,
}

/// File-backed [`QueueService`] and [`LogService`].
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> WatchResult<BackendDocument> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| WatchError::RemoteQuery(format!("{}: {e}", self.path.display())))?;
        let document: BackendDocument = serde_json::from_str(&text)?;
        trace!(
            path = %self.path.display(),
            queues = document.queues.len(),
            streams = document.logs.len(),
            "loaded backend document"
        );
        Ok(document)
    }
}

#[async_trait]
impl QueueService for FileBackend {
    async fn list_jobs(
        &self,
        queue: &str,
        status: JobStatus,
        next_token: Option<&str>,
    ) -> WatchResult<JobPage> {
        let document = self.load().await?;
        let jobs = document
            .queues
            .get(queue)
            .ok_or_else(|| WatchError::RemoteQuery(format!("job queue {queue} not found")))?;

        let start = match next_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| WatchError::RemoteQuery(format!("invalid next token {token:?}")))?,
            None => 0,
        };
        let page_size = document.page_size.max(1);

        let matching: Vec<&JobRecord> = jobs.iter().filter(|j| j.status == status).collect();
        let end = (start + page_size).min(matching.len());
        let page: Vec<JobRecord> = matching
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|&j| j.clone())
            .collect();

        let page = JobPage::last(page);
        Ok(if end < matching.len() {
            page.with_next_token(end.to_string())
        } else {
            page
        })
    }

    async fn describe_jobs(&self, job_ids: &[JobId]) -> WatchResult<Vec<JobDetail>> {
        let document = self.load().await?;
        let mut details = Vec::new();
        for job in document.queues.values().flatten() {
            if !job_ids.contains(&job.id) {
                continue;
            }
            let container = job
                .container
                .clone()
                .map(serde_json::from_value::<ContainerDetail>)
                .transpose()?;
            details.push(JobDetail {
                job_id: job.id.clone(),
                container,
                array_properties: job.array_properties.clone(),
                node_properties: None,
            });
        }
        Ok(details)
    }
}

#[async_trait]
impl LogService for FileBackend {
    async fn get_log_events(
        &self,
        _log_group: &str,
        log_stream: &str,
        limit: usize,
    ) -> WatchResult<Vec<LogEvent>> {
        if log_stream.is_empty() {
            return Err(WatchError::LogStreamUnavailable(
                "log stream name must not be empty".into(),
            ));
        }
        let document = self.load().await?;
        let lines = document.logs.get(log_stream).ok_or_else(|| {
            WatchError::LogStreamUnavailable(format!("log stream {log_stream} does not exist"))
        })?;
        let skip = lines.len().saturating_sub(limit);
        Ok(lines[skip..].iter().map(LogEvent::new).collect())
    }
}
