//! jobwatch — live activity feed for a managed job queue
//!
//! This crate repeatedly snapshots the jobs of a remote queue, works out which
//! observations are new since the previous snapshots, and prints one line per
//! new observation: status, id, name, run time, failure reason, a link to the
//! job's log and, for failed jobs, the tail of that log.
//!
//! # Overview
//!
//! - [`QueueService`] / [`LogService`] — injected collaborators for the remote
//!   queue and log store
//! - [`QueueScanner`] — paginated listing across a set of [`JobStatus`]es
//! - [`SnapshotFilter`] — creation-time cutoff and shell-glob name filter
//! - [`TrackingSet`] — observations already reported, and the per-cycle diff
//! - [`DetailEnricher`] — memoized log-stream lookup for running/failed jobs
//! - [`LogTailFetcher`] — recent log lines for failed jobs
//! - [`ReportRenderer`] — feed line formatting
//! - [`WatchLoop`] — one cycle, or a cycle every interval in watch mode
//! - [`WatchError`] with recoverable and cycle-fatal variants
//!
//! # Cycle
//!
//! ```text
//!   scan() ──→ filter() ──→ diff() ──→ resolve_log_stream() ──→ tail() ──→ render()
//!   (paged)     (pure)      (set)       (running/failed)        (failed)    (pure)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use jobwatch::{FileBackend, WatchConfig, WatchLoop};
//!
//! let backend = Arc::new(FileBackend::new("jobs.json"));
//! let mut config = WatchConfig::new("gpu-queue");
//! config.watch = true;
//! let mut watcher = WatchLoop::new(config, backend.clone(), backend)?;
//! watcher.run(&mut std::io::stdout()).await?;
//! ```

pub mod cli;
pub mod config;
pub mod enrich;
pub mod error;
pub mod file_backend;
pub mod filter;
pub mod humanize;
pub mod job;
pub mod logs;
pub mod palette;
pub mod render;
pub mod scanner;
pub mod service;
pub mod tracking;
pub mod watch;

pub use config::WatchConfig;
pub use enrich::DetailEnricher;
pub use error::{WatchError, WatchResult};
pub use file_backend::FileBackend;
pub use filter::SnapshotFilter;
pub use job::{JobId, JobRecord, JobStatus, ObservationKey, parse_status};
pub use logs::LogTailFetcher;
pub use render::ReportRenderer;
pub use scanner::QueueScanner;
pub use service::{ContainerDetail, JobDetail, JobPage, LogEvent, LogService, QueueService};
pub use tracking::TrackingSet;
pub use watch::{CycleReport, WatchLoop};
