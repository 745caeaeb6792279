//! Human-friendly time spans and "since" expressions.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::{WatchError, WatchResult};

/// Units used by [`format_timespan`], largest first, in milliseconds.
const SPAN_UNITS: [(i64, &str, &str); 6] = [
    (52 * 7 * 24 * 3_600_000, "year", "years"),
    (7 * 24 * 3_600_000, "week", "weeks"),
    (24 * 3_600_000, "day", "days"),
    (3_600_000, "hour", "hours"),
    (60_000, "minute", "minutes"),
    (1_000, "second", "seconds"),
];

/// At most this many units appear in a formatted span.
const MAX_SPAN_UNITS: usize = 3;

/// Format a duration in milliseconds, e.g. `1 minute and 5.3 seconds`.
///
/// Spans under a minute are shown as fractional seconds; longer spans are
/// broken into whole years, weeks, days, hours and minutes plus the remaining
/// seconds. Zero-valued units are skipped.
pub fn format_timespan(millis: i64) -> String {
    let millis = millis.max(0);
    if millis < 60_000 {
        return pluralize(&round_number(millis as f64 / 1_000.0), "second", "seconds");
    }

    let mut remaining = millis;
    let mut parts = Vec::new();
    for (divider, singular, plural) in SPAN_UNITS {
        let count = if divider == 1_000 {
            round_number(remaining as f64 / 1_000.0)
        } else {
            let whole = remaining / divider;
            remaining %= divider;
            whole.to_string()
        };
        if count != "0" {
            parts.push(pluralize(&count, singular, plural));
        }
    }
    parts.truncate(MAX_SPAN_UNITS);
    concatenate(&parts)
}

fn round_number(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn pluralize(count: &str, singular: &str, plural: &str) -> String {
    if count == "1" {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

fn concatenate(parts: &[String]) -> String {
    match parts {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

/// Resolve a time expression relative to `now` into epoch milliseconds.
///
/// Accepted forms:
/// - `now`, `today`, `yesterday`
/// - `10 minutes ago`, `an hour ago`, `3d ago`, or the compact `90m`
/// - RFC 3339 (`2024-05-01T12:00:00Z`)
/// - `2024-05-01`, `2024-05-01 12:00`, `2024-05-01 12:00:30` in `now`'s zone
pub fn parse_since<Tz: TimeZone>(expr: &str, now: &DateTime<Tz>) -> WatchResult<i64> {
    let text = expr.trim().to_ascii_lowercase();
    let invalid = || WatchError::InvalidSince(expr.to_string());

    match text.as_str() {
        "" => return Err(invalid()),
        "now" => return Ok(now.timestamp_millis()),
        "today" => return start_of_day(now, 0).ok_or_else(invalid),
        "yesterday" => return start_of_day(now, 1).ok_or_else(invalid),
        _ => {}
    }

    if let Some(offset) = parse_relative(&text) {
        return now
            .clone()
            .checked_sub_signed(offset)
            .map(|at| at.timestamp_millis())
            .ok_or_else(invalid);
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(expr.trim()) {
        return Ok(at.timestamp_millis());
    }

    let tz = now.timezone();
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(expr.trim(), format) {
            return tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|at| at.timestamp_millis())
                .ok_or_else(invalid);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(expr.trim(), "%Y-%m-%d") {
        return tz
            .from_local_datetime(&date.and_time(chrono::NaiveTime::MIN))
            .earliest()
            .map(|at| at.timestamp_millis())
            .ok_or_else(invalid);
    }

    Err(invalid())
}

fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>, days_back: i64) -> Option<i64> {
    let date = now.date_naive() - Duration::days(days_back);
    now.timezone()
        .from_local_datetime(&date.and_time(chrono::NaiveTime::MIN))
        .earliest()
        .map(|at| at.timestamp_millis())
}

/// `<n> <unit> [ago]`, `<n><unit>`, or `a/an <unit> ago`.
fn parse_relative(text: &str) -> Option<Duration> {
    let body = text.strip_suffix("ago").unwrap_or(text).trim();
    let compact: String = body.split_whitespace().collect();
    let compact = compact
        .strip_prefix("an")
        .or_else(|| compact.strip_prefix('a'))
        .filter(|rest| unit_millis(rest).is_some())
        .map(|rest| format!("1{rest}"))
        .unwrap_or(compact);

    let split = compact.find(|c: char| !c.is_ascii_digit())?;
    let (count, unit) = compact.split_at(split);
    let count: i64 = count.parse().ok()?;
    Some(Duration::milliseconds(count.checked_mul(unit_millis(unit)?)?))
}

fn unit_millis(unit: &str) -> Option<i64> {
    let millis = match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => 1_000,
        "m" | "min" | "mins" | "minute" | "minutes" => 60_000,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3_600_000,
        "d" | "day" | "days" => 24 * 3_600_000,
        "w" | "wk" | "wks" | "week" | "weeks" => 7 * 24 * 3_600_000,
        _ => return None,
    };
    Some(millis)
}
