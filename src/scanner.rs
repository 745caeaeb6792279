//! Paginated scan of a queue across a set of statuses.

use std::sync::Arc;
use std::time::Duration;

use tokio_stream::Stream;
use tracing::debug;

use crate::error::WatchResult;
use crate::job::{JobRecord, JobStatus};
use crate::service::{QueueService, with_timeout};

/// Lists every job in a queue for a set of statuses.
///
/// Each call to [`scan`](QueueScanner::scan) starts a fresh pagination pass.
/// Records come out in backend order, status by status, and are not
/// deduplicated across statuses.
#[derive(Clone)]
pub struct QueueScanner {
    service: Arc<dyn QueueService>,
    call_timeout: Duration,
}

impl QueueScanner {
    pub fn new(service: Arc<dyn QueueService>, call_timeout: Duration) -> Self {
        Self {
            service,
            call_timeout,
        }
    }

    /// Lazily stream the jobs of `queue` in each of `statuses`.
    ///
    /// The first backend error ends the stream after being yielded.
    pub fn scan<'a>(
        &'a self,
        queue: &'a str,
        statuses: &'a [JobStatus],
    ) -> impl Stream<Item = WatchResult<JobRecord>> + Send + 'a {
        async_stream::try_stream! {
            for &status in statuses {
                let mut next_token: Option<String> = None;
                let mut page_no = 0usize;
                loop {
                    let page = with_timeout(
                        self.call_timeout,
                        format!("list_jobs({queue}, {status})"),
                        self.service.list_jobs(queue, status, next_token.as_deref()),
                    )
                    .await?;
                    page_no += 1;
                    debug!(
                        queue,
                        status = %status,
                        page = page_no,
                        jobs = page.jobs.len(),
                        "listed page"
                    );
                    for job in page.jobs {
                        yield job;
                    }
                    match page.next_token {
                        Some(token) => next_token = Some(token),
                        None => break,
                    }
                }
            }
        }
    }

    /// Drain a full scan into a vector.
    pub async fn collect(&self, queue: &str, statuses: &[JobStatus]) -> WatchResult<Vec<JobRecord>> {
        use tokio_stream::StreamExt;

        let stream = self.scan(queue, statuses);
        tokio::pin!(stream);
        let mut records = Vec::new();
        while let Some(record) = stream.next().await {
            records.push(record?);
        }
        Ok(records)
    }
}
