//! Snapshot filtering by creation time and job name.

use glob::{MatchOptions, Pattern};

use crate::error::{WatchError, WatchResult};
use crate::job::JobRecord;

/// Shell glob semantics: case-sensitive, `/` and leading `.` are ordinary.
const NAME_MATCH: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Keeps records created strictly after a cutoff whose name matches a glob.
#[derive(Debug, Clone)]
pub struct SnapshotFilter {
    min_created_at: i64,
    pattern: Pattern,
}

impl SnapshotFilter {
    /// Build a filter from an epoch-millisecond cutoff and a shell glob
    /// (`*`, `?`, `[...]`).
    pub fn new(min_created_at: i64, name_pattern: &str) -> WatchResult<Self> {
        let pattern = Pattern::new(name_pattern)
            .map_err(|e| WatchError::InvalidPattern(format!("{name_pattern}: {e}")))?;
        Ok(Self {
            min_created_at,
            pattern,
        })
    }

    pub fn min_created_at(&self) -> i64 {
        self.min_created_at
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn matches(&self, record: &JobRecord) -> bool {
        record.created_at > self.min_created_at
            && self.pattern.matches_with(&record.name, NAME_MATCH)
    }

    /// Filter a scanned sequence, preserving order.
    pub fn apply(&self, records: impl IntoIterator<Item = JobRecord>) -> Vec<JobRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
