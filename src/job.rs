//! Job observation types.
//!
//! The typical job lifecycle:
//!
//! ```text
//!   SUBMITTED ──→ PENDING ──→ RUNNABLE ──→ STARTING ──→ RUNNING ──→ SUCCEEDED
//!                                                          │
//!                                                          └──→ FAILED
//! ```
//!
//! The order is not enforced: a poller may observe a job in any state and
//! skip any number of intermediate ones.
//!
//! A [`JobRecord`] is one observation of a job at a point in time. Two
//! records are equal only when every identity field matches, so the same
//! job seen in two different states yields two different records.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{WatchError, WatchResult};

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Create a new job ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status of a job, ordered by typical lifecycle progression.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Submitted,
    Pending,
    Runnable,
    Starting,
    Running,
    Succeeded,
    Failed,
}

impl JobStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [JobStatus; 7] = [
        JobStatus::Submitted,
        JobStatus::Pending,
        JobStatus::Runnable,
        JobStatus::Starting,
        JobStatus::Running,
        JobStatus::Succeeded,
        JobStatus::Failed,
    ];

    /// Wire name used by the queue service.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Submitted => "SUBMITTED",
            JobStatus::Pending => "PENDING",
            JobStatus::Runnable => "RUNNABLE",
            JobStatus::Starting => "STARTING",
            JobStatus::Running => "RUNNING",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }

    /// Whether extended job detail (log stream identity) is worth fetching.
    pub fn wants_detail(&self) -> bool {
        matches!(self, JobStatus::Running | JobStatus::Failed)
    }

    /// Whether the tail of the job's log should be shown.
    pub fn wants_log_tail(&self) -> bool {
        matches!(self, JobStatus::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `pad` so width/alignment specifiers apply to the status column.
        f.pad(self.as_str())
    }
}

/// Parse a user-supplied status name, case-insensitively.
pub fn parse_status(s: &str) -> WatchResult<JobStatus> {
    let wanted = s.trim();
    JobStatus::ALL
        .into_iter()
        .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| WatchError::InvalidStatus(s.to_string()))
}

/// One observation of a job, as returned by a queue listing.
///
/// Timestamps are epoch milliseconds. `container` and `array_properties` are
/// opaque backend metadata and do not take part in equality or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    #[serde(rename = "jobId")]
    pub id: JobId,
    #[serde(rename = "jobName")]
    pub name: String,
    pub status: JobStatus,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_properties: Option<serde_json::Value>,
}

impl JobRecord {
    /// Create a record with only the always-present fields set.
    pub fn new(
        id: impl Into<JobId>,
        name: impl Into<String>,
        status: JobStatus,
        created_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status,
            created_at,
            started_at: None,
            stopped_at: None,
            status_reason: None,
            container: None,
            array_properties: None,
        }
    }

    pub fn with_started_at(mut self, ts: i64) -> Self {
        self.started_at = Some(ts);
        self
    }

    pub fn with_stopped_at(mut self, ts: i64) -> Self {
        self.stopped_at = Some(ts);
        self
    }

    pub fn with_status_reason(mut self, reason: impl Into<String>) -> Self {
        self.status_reason = Some(reason.into());
        self
    }

    pub fn with_container(mut self, container: serde_json::Value) -> Self {
        self.container = Some(container);
        self
    }

    pub fn with_array_properties(mut self, props: serde_json::Value) -> Self {
        self.array_properties = Some(props);
        self
    }

    /// Run time in milliseconds, when both start and stop are known.
    pub fn duration_ms(&self) -> Option<i64> {
        match (self.started_at, self.stopped_at) {
            (Some(start), Some(stop)) => Some(stop.saturating_sub(start).max(0)),
            _ => None,
        }
    }

    /// The `reason` string carried in the container metadata, if any.
    pub fn container_reason(&self) -> Option<&str> {
        self.container.as_ref()?.get("reason")?.as_str()
    }

    /// Composite key over every identity field.
    pub fn key(&self) -> ObservationKey {
        ObservationKey {
            id: self.id.clone(),
            name: self.name.clone(),
            status: self.status,
            created_at: self.created_at,
            started_at: self.started_at,
            stopped_at: self.stopped_at,
            status_reason: self.status_reason.clone(),
        }
    }

    fn key_ref(&self) -> KeyRef<'_> {
        (
            &self.id,
            self.name.as_str(),
            self.status,
            self.created_at,
            self.started_at,
            self.stopped_at,
            self.status_reason.as_deref(),
        )
    }
}

type KeyRef<'a> = (
    &'a JobId,
    &'a str,
    JobStatus,
    i64,
    Option<i64>,
    Option<i64>,
    Option<&'a str>,
);

impl PartialEq for JobRecord {
    fn eq(&self, other: &Self) -> bool {
        self.key_ref() == other.key_ref()
    }
}

impl Eq for JobRecord {}

impl Hash for JobRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key_ref().hash(state);
    }
}

/// Owned composite of a record's identity fields.
///
/// This is what the tracking set remembers: opaque metadata is dropped so
/// the set stays small and hashing stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObservationKey {
    pub id: JobId,
    pub name: String,
    pub status: JobStatus,
    pub created_at: i64,
    pub started_at: Option<i64>,
    pub stopped_at: Option<i64>,
    pub status_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_terminal() {
        assert!(!JobStatus::Submitted.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn test_job_status_lifecycle_order() {
        let mut shuffled = vec![
            JobStatus::Failed,
            JobStatus::Pending,
            JobStatus::Running,
            JobStatus::Submitted,
        ];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![
                JobStatus::Submitted,
                JobStatus::Pending,
                JobStatus::Running,
                JobStatus::Failed
            ]
        );
    }

    #[test]
    fn test_job_status_display_pads() {
        assert_eq!(JobStatus::Failed.to_string(), "FAILED");
        assert_eq!(format!("{:<9}|", JobStatus::Running), "RUNNING  |");
    }

    #[test]
    fn test_parse_status_case_insensitive() {
        assert_eq!(parse_status("running").unwrap(), JobStatus::Running);
        assert_eq!(parse_status("FAILED").unwrap(), JobStatus::Failed);
        assert_eq!(parse_status(" Runnable ").unwrap(), JobStatus::Runnable);
        assert!(matches!(
            parse_status("done"),
            Err(WatchError::InvalidStatus(s)) if s == "done"
        ));
    }

    #[test]
    fn test_status_serde_wire_names() {
        let json = serde_json::to_string(&JobStatus::Succeeded).unwrap();
        assert_eq!(json, "\"SUCCEEDED\"");
        let parsed: JobStatus = serde_json::from_str("\"STARTING\"").unwrap();
        assert_eq!(parsed, JobStatus::Starting);
    }

    #[test]
    fn test_job_id_from() {
        let id: JobId = "job-123".into();
        assert_eq!(id.as_str(), "job-123");
        assert_eq!(id.to_string(), "job-123");
    }

    #[test]
    fn test_record_equality_includes_status() {
        let running = JobRecord::new("x", "train", JobStatus::Running, 10);
        let succeeded = JobRecord::new("x", "train", JobStatus::Succeeded, 10);
        assert_ne!(running, succeeded);
        assert_ne!(running.key(), succeeded.key());
    }

    #[test]
    fn test_record_equality_ignores_opaque_metadata() {
        let plain = JobRecord::new("x", "train", JobStatus::Running, 10);
        let with_meta = plain
            .clone()
            .with_container(serde_json::json!({"logStreamName": "s"}))
            .with_array_properties(serde_json::json!({"size": 4}));
        assert_eq!(plain, with_meta);
        assert_eq!(plain.key(), with_meta.key());
    }

    #[test]
    fn test_record_deserialize_wire_shape() {
        let record: JobRecord = serde_json::from_value(serde_json::json!({
            "jobId": "abc",
            "jobName": "etl-1",
            "status": "FAILED",
            "createdAt": 100,
            "startedAt": 200,
            "stoppedAt": 1_200,
            "statusReason": "Essential container exited",
            "container": {"exitCode": 1, "reason": "OutOfMemoryError"}
        }))
        .unwrap();

        assert_eq!(record.id, JobId::new("abc"));
        assert_eq!(record.status, JobStatus::Failed);
        assert_eq!(record.duration_ms(), Some(1_000));
        assert_eq!(record.container_reason(), Some("OutOfMemoryError"));
    }

    #[test]
    fn test_duration_requires_both_timestamps() {
        let started = JobRecord::new("x", "n", JobStatus::Running, 0).with_started_at(5);
        assert_eq!(started.duration_ms(), None);
        assert_eq!(started.with_stopped_at(8).duration_ms(), Some(3));
    }
}
