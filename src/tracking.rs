//! Accumulated set of reported observations and the per-cycle diff.
//!
//! The set only grows. A job that changes status since it was last reported
//! is a new observation and shows up in the next diff again; that is how
//! completion events reach the feed.

use rustc_hash::FxHashSet;

use crate::job::{JobRecord, ObservationKey};

/// Observations already shown to the user during this session.
#[derive(Debug, Clone, Default)]
pub struct TrackingSet {
    tracked: FxHashSet<ObservationKey>,
}

impl TrackingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in `snapshot` not yet tracked, oldest `created_at` first.
    ///
    /// Duplicate observations within the snapshot are returned once. Ties on
    /// `created_at` keep snapshot order.
    pub fn diff(&self, snapshot: &[JobRecord]) -> Vec<JobRecord> {
        let mut seen = FxHashSet::default();
        let mut fresh: Vec<JobRecord> = snapshot
            .iter()
            .filter(|record| {
                let key = record.key();
                !self.tracked.contains(&key) && seen.insert(key)
            })
            .cloned()
            .collect();
        fresh.sort_by_key(|record| record.created_at);
        fresh
    }

    /// Mark a record as reported. Returns `false` if it already was.
    pub fn insert(&mut self, record: &JobRecord) -> bool {
        self.tracked.insert(record.key())
    }

    pub fn extend<'a>(&mut self, records: impl IntoIterator<Item = &'a JobRecord>) {
        self.tracked.extend(records.into_iter().map(JobRecord::key));
    }

    pub fn contains(&self, record: &JobRecord) -> bool {
        self.tracked.contains(&record.key())
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }
}
