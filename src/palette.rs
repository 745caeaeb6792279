//! Status colors for the activity feed.

use colored::Color;

use crate::job::JobStatus;

/// Display color for a job status.
pub fn status_color(status: JobStatus) -> Color {
    match status {
        JobStatus::Submitted | JobStatus::Pending => Color::BrightBlack,
        JobStatus::Runnable => Color::BrightBlue,
        JobStatus::Starting | JobStatus::Running => Color::Yellow,
        JobStatus::Succeeded => Color::Green,
        JobStatus::Failed => Color::Red,
    }
}

/// Color for log tail lines.
pub const LOG_LINE_COLOR: Color = Color::BrightBlack;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states_are_distinct() {
        assert_eq!(status_color(JobStatus::Succeeded), Color::Green);
        assert_eq!(status_color(JobStatus::Failed), Color::Red);
        assert_ne!(
            status_color(JobStatus::Succeeded),
            status_color(JobStatus::Failed)
        );
    }

    #[test]
    fn test_waiting_states_are_dim() {
        assert_eq!(status_color(JobStatus::Submitted), LOG_LINE_COLOR);
        assert_eq!(status_color(JobStatus::Pending), LOG_LINE_COLOR);
    }
}
