//! Formatting of job events into feed lines.
//!
//! A reported job renders as:
//!
//! ```text
//!   [container reason]
//!   STATUS    <id> <name> ["completed in …"] ["<status reason>"] [<log link>]
//!    <log line>
//!    <log line>
//! ```

use colored::Colorize;

use crate::job::{JobRecord, JobStatus};
use crate::palette::{LOG_LINE_COLOR, status_color};

/// Width of the status column.
const STATUS_WIDTH: usize = 9;

/// Renders job events. Pure: no I/O, deterministic for given inputs.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    colorize: bool,
    region: Option<String>,
    log_group: String,
}

impl ReportRenderer {
    pub fn new(log_group: impl Into<String>) -> Self {
        Self {
            colorize: true,
            region: None,
            log_group: log_group.into(),
        }
    }

    /// Render console links for this region instead of bare stream names.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_color(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    /// Where an operator can read a log stream.
    pub fn log_link(&self, log_stream: &str) -> String {
        match &self.region {
            Some(region) => format!(
                "https://{region}.console.aws.amazon.com/cloudwatch/home?region={region}\
                 #logEventViewer:group={};stream={log_stream}",
                self.log_group
            ),
            None => format!("log={log_stream}"),
        }
    }

    /// The one-line summary of a job event.
    pub fn summary(&self, record: &JobRecord, log_stream: Option<&str>) -> String {
        let status = format!("{:<STATUS_WIDTH$}", record.status);
        let status = if self.colorize {
            status.color(status_color(record.status)).to_string()
        } else {
            status
        };

        let mut line = format!("{status} {} {}", record.id, record.name);
        if let Some(ms) = record.duration_ms() {
            line.push_str(&format!(
                " \"completed in {}\"",
                crate::humanize::format_timespan(ms)
            ));
        }
        if let Some(reason) = record.status_reason.as_deref() {
            if record.status != JobStatus::Succeeded {
                line.push_str(&format!(" \"{reason}\""));
            }
        }
        if let Some(stream) = log_stream {
            line.push(' ');
            line.push_str(&self.log_link(stream));
        }
        line
    }

    /// All lines for one job event. A non-empty log tail is followed by a
    /// blank line.
    pub fn render(
        &self,
        record: &JobRecord,
        log_stream: Option<&str>,
        log_tail: &[String],
    ) -> Vec<String> {
        let mut lines = Vec::with_capacity(3 + log_tail.len());
        if let Some(reason) = record.container_reason() {
            lines.push(reason.to_string());
        }
        lines.push(self.summary(record, log_stream));
        lines.extend(log_tail.iter().map(|message| {
            let line = format!(" {message}");
            if self.colorize {
                line.color(LOG_LINE_COLOR).to_string()
            } else {
                line
            }
        }));
        if !log_tail.is_empty() {
            lines.push(String::new());
        }
        lines
    }
}
