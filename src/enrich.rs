//! Lazily fetched, memoized job detail.

use std::sync::Arc;
use std::time::Duration;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{WatchError, WatchResult};
use crate::job::JobId;
use crate::service::{QueueService, with_timeout};

/// Resolves a job's log stream through `describe_jobs`, at most once per id.
///
/// Both outcomes of a successful describe are cached: the stream name, or its
/// absence (array and multi-node parents have no container). A failed
/// describe is not cached, so a later cycle may try again.
pub struct DetailEnricher {
    service: Arc<dyn QueueService>,
    call_timeout: Duration,
    cache: FxHashMap<JobId, Option<String>>,
}

impl DetailEnricher {
    pub fn new(service: Arc<dyn QueueService>, call_timeout: Duration) -> Self {
        Self {
            service,
            call_timeout,
            cache: FxHashMap::default(),
        }
    }

    /// The log stream of `job_id`, or `None` when the job has none.
    pub async fn resolve_log_stream(&mut self, job_id: &JobId) -> WatchResult<Option<String>> {
        if let Some(cached) = self.cache.get(job_id) {
            debug!(job_id = %job_id, "detail cache hit");
            return Ok(cached.clone());
        }

        let details = with_timeout(
            self.call_timeout,
            format!("describe_jobs({job_id})"),
            self.service.describe_jobs(std::slice::from_ref(job_id)),
        )
        .await?;

        let stream = match details.iter().find(|d| &d.job_id == job_id) {
            Some(detail) => match detail.log_stream() {
                Ok(stream) => Some(stream.to_string()),
                Err(err) => {
                    debug!(job_id = %job_id, error = %err, "no log stream in detail");
                    None
                }
            },
            None => {
                let err = WatchError::DetailShapeMismatch(format!("{job_id} not described"));
                debug!(job_id = %job_id, error = %err, "describe returned no entry");
                None
            }
        };

        self.cache.insert(job_id.clone(), stream.clone());
        Ok(stream)
    }

    /// Number of job ids with a cached detail.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
