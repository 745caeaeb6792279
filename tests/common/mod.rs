//! In-memory queue and log collaborators for driving the watch loop.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use jobwatch::{
    JobDetail, JobId, JobPage, JobRecord, JobStatus, LogEvent, LogService, QueueService,
    WatchError, WatchResult,
};

/// A queue whose contents tests replace between cycles.
pub struct MockQueue {
    jobs: Mutex<Vec<JobRecord>>,
    details: Mutex<HashMap<String, JobDetail>>,
    page_size: usize,
    pub list_calls: AtomicUsize,
    pub describe_calls: Mutex<HashMap<String, usize>>,
    pub fail_list: AtomicBool,
    pub fail_describe: AtomicBool,
}

impl MockQueue {
    pub fn new(page_size: usize) -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
            details: Mutex::new(HashMap::new()),
            page_size,
            list_calls: AtomicUsize::new(0),
            describe_calls: Mutex::new(HashMap::new()),
            fail_list: AtomicBool::new(false),
            fail_describe: AtomicBool::new(false),
        }
    }

    pub fn set_jobs(&self, jobs: Vec<JobRecord>) {
        *self.jobs.lock().unwrap() = jobs;
    }

    pub fn add_detail(&self, detail: JobDetail) {
        self.details
            .lock()
            .unwrap()
            .insert(detail.job_id.as_str().to_string(), detail);
    }

    pub fn describes_of(&self, id: &str) -> usize {
        self.describe_calls
            .lock()
            .unwrap()
            .get(id)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl QueueService for MockQueue {
    async fn list_jobs(
        &self,
        _queue: &str,
        status: JobStatus,
        next_token: Option<&str>,
    ) -> WatchResult<JobPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(WatchError::RemoteQuery("service unavailable".into()));
        }

        let start: usize = next_token.map_or(0, |t| t.parse().unwrap());
        let matching: Vec<JobRecord> = self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| j.status == status)
            .cloned()
            .collect();
        let end = (start + self.page_size).min(matching.len());
        let page = JobPage::last(matching[start..end].to_vec());
        Ok(if end < matching.len() {
            page.with_next_token(end.to_string())
        } else {
            page
        })
    }

    async fn describe_jobs(&self, job_ids: &[JobId]) -> WatchResult<Vec<JobDetail>> {
        {
            let mut calls = self.describe_calls.lock().unwrap();
            for id in job_ids {
                *calls.entry(id.as_str().to_string()).or_default() += 1;
            }
        }
        if self.fail_describe.load(Ordering::SeqCst) {
            return Err(WatchError::RemoteQuery("describe throttled".into()));
        }
        let details = self.details.lock().unwrap();
        Ok(job_ids
            .iter()
            .filter_map(|id| details.get(id.as_str()).cloned())
            .collect())
    }
}

/// Log streams keyed by name; unknown names are validation errors.
#[derive(Default)]
pub struct MockLogs {
    streams: Mutex<HashMap<String, Vec<String>>>,
    pub calls: AtomicUsize,
    pub fail: AtomicBool,
}

impl MockLogs {
    pub fn add_stream(&self, name: &str, lines: &[&str]) {
        self.streams.lock().unwrap().insert(
            name.to_string(),
            lines.iter().map(|l| l.to_string()).collect(),
        );
    }
}

#[async_trait]
impl LogService for MockLogs {
    async fn get_log_events(
        &self,
        _log_group: &str,
        log_stream: &str,
        limit: usize,
    ) -> WatchResult<Vec<LogEvent>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(WatchError::RemoteQuery("log service unavailable".into()));
        }
        let streams = self.streams.lock().unwrap();
        let lines = streams
            .get(log_stream)
            .ok_or_else(|| WatchError::LogStreamUnavailable(log_stream.to_string()))?;
        let skip = lines.len().saturating_sub(limit);
        Ok(lines[skip..].iter().map(LogEvent::new).collect())
    }
}

/// Feed output as lines.
pub fn lines(out: &[u8]) -> Vec<String> {
    String::from_utf8(out.to_vec())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
