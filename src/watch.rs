//! The polling loop.
//!
//! ```text
//!   Idle ──→ Scanning ──→ Filtering ──→ Diffing ──→ Enriching ──→ Rendering ─┬─→ Done
//!               ↑                                                             │
//!               └──────────────────────── Sleeping ←────────── (watch mode) ──┘
//! ```
//!
//! Everything runs on one task: a cycle finishes before the next begins, and
//! the only suspension points are collaborator calls and the sleep between
//! cycles. Watch mode ends only when the process is interrupted.

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::WatchConfig;
use crate::enrich::DetailEnricher;
use crate::error::WatchResult;
use crate::filter::SnapshotFilter;
use crate::job::{JobRecord, JobStatus};
use crate::logs::LogTailFetcher;
use crate::render::ReportRenderer;
use crate::scanner::QueueScanner;
use crate::service::{LogService, QueueService};
use crate::tracking::TrackingSet;

/// Counts from one polling cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Records returned by the queue.
    pub scanned: usize,
    /// Records left after name and creation-time filtering.
    pub matched: usize,
    /// Records not seen before, written to the feed.
    pub reported: usize,
}

/// Drives scan → filter → diff → enrich → render, once or forever.
pub struct WatchLoop {
    config: WatchConfig,
    statuses: Vec<JobStatus>,
    scanner: QueueScanner,
    filter: SnapshotFilter,
    tracking: TrackingSet,
    enricher: DetailEnricher,
    tails: LogTailFetcher,
    renderer: ReportRenderer,
}

impl WatchLoop {
    pub fn new(
        config: WatchConfig,
        queue: Arc<dyn QueueService>,
        logs: Arc<dyn LogService>,
    ) -> WatchResult<Self> {
        config.validate()?;
        let filter = SnapshotFilter::new(config.min_created_at, &config.name_pattern)?;
        let mut renderer = ReportRenderer::new(config.log_group.clone()).with_color(config.colorize);
        if let Some(region) = &config.region {
            renderer = renderer.with_region(region.clone());
        }

        Ok(Self {
            statuses: config.effective_statuses(),
            scanner: QueueScanner::new(queue.clone(), config.call_timeout),
            filter,
            tracking: TrackingSet::new(),
            enricher: DetailEnricher::new(queue, config.call_timeout),
            tails: LogTailFetcher::new(
                logs,
                config.log_group.clone(),
                config.tail_lines,
                config.call_timeout,
            ),
            renderer,
            config,
        })
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    /// Observations reported so far.
    pub fn tracking(&self) -> &TrackingSet {
        &self.tracking
    }

    /// Run one cycle, writing the feed for every new observation to `out`.
    ///
    /// A failed list, describe or log call aborts the cycle. Each job is
    /// marked as reported right after its lines are written, so jobs ahead of
    /// the failure stay reported and the failed one is retried next cycle.
    pub async fn run_cycle<W: Write>(&mut self, out: &mut W) -> WatchResult<CycleReport> {
        let scanned = self
            .scanner
            .collect(&self.config.queue, &self.statuses)
            .await?;
        let mut report = CycleReport {
            scanned: scanned.len(),
            ..CycleReport::default()
        };

        let snapshot = self.filter.apply(scanned);
        report.matched = snapshot.len();

        let fresh = self.tracking.diff(&snapshot);
        debug!(
            matched = report.matched,
            fresh = fresh.len(),
            tracked = self.tracking.len(),
            "diffed snapshot"
        );

        for job in &fresh {
            let lines = self.describe(job).await?;
            for line in &lines {
                writeln!(out, "{line}")?;
            }
            out.flush()?;

            self.tracking.insert(job);
            report.reported += 1;
        }

        info!(
            queue = %self.config.queue,
            scanned = report.scanned,
            matched = report.matched,
            reported = report.reported,
            "cycle complete"
        );
        Ok(report)
    }

    /// Enrich and render one job.
    ///
    /// A job without a container or without a log stream still renders; a
    /// failing describe or log call does not.
    async fn describe(&mut self, job: &JobRecord) -> WatchResult<Vec<String>> {
        let log_stream = if job.status.wants_detail() {
            self.enricher.resolve_log_stream(&job.id).await?
        } else {
            None
        };

        let log_tail = match (&log_stream, job.status.wants_log_tail()) {
            (Some(stream), true) => self.tails.tail(stream).await?,
            _ => Vec::new(),
        };

        Ok(self
            .renderer
            .render(job, log_stream.as_deref(), &log_tail))
    }

    /// Run a single cycle, or cycles separated by the configured interval
    /// in watch mode.
    pub async fn run<W: Write>(&mut self, out: &mut W) -> WatchResult<()> {
        loop {
            self.run_cycle(out).await?;
            if !self.config.watch {
                return Ok(());
            }
            tokio::time::sleep(self.config.interval).await;
        }
    }
}
