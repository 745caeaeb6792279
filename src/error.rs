//! Watch error types.
//!
//! Errors are categorized by how far they reach:
//!
//! | Category | Variants | Effect |
//! |----------|----------|--------|
//! | **Cycle-fatal** | `RemoteQuery`, `Timeout` | Abort the cycle (and the process) |
//! | **Per-job, recovered** | `LogStreamUnavailable`, `DetailShapeMismatch` | Job reported without its log link or tail |
//! | **Input** | `InvalidStatus`, `InvalidPattern`, `InvalidSince`, `Configuration` | Rejected before the first cycle |
//! | **Local** | `Io`, `Decode` | Feed output or backend document failure |

use thiserror::Error;

/// Errors that can occur while watching a job queue.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WatchError {
    // ── Remote collaborator failures ─────────────────────────────────
    /// Listing or describing jobs failed.
    #[error("Remote query failed: {0}")]
    RemoteQuery(String),

    /// A collaborator call exceeded its time budget.
    #[error("Timed out: {0}")]
    Timeout(String),

    // ── Recovered per job ────────────────────────────────────────────
    /// The log stream does not exist or the reference is malformed.
    #[error("Log stream unavailable: {0}")]
    LogStreamUnavailable(String),

    /// Job detail lacks the container/log-stream fields (array or multi-node job).
    #[error("Job detail has no log stream: {0}")]
    DetailShapeMismatch(String),

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Invalid job status: {0}")]
    InvalidStatus(String),

    #[error("Invalid job name pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid time expression: {0}")]
    InvalidSince(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // ── Local ────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Malformed backend document: {0}")]
    Decode(#[from] serde_json::Error),
}

impl WatchError {
    /// Returns `true` if the error only degrades a single job's report.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::LogStreamUnavailable(_) | Self::DetailShapeMismatch(_)
        )
    }
}

/// Result type for watch operations.
pub type WatchResult<T> = Result<T, WatchError>;
