//! Time filter resolution for the dashboard's time window.
//!
//! Converts a symbolic time-filter token (preset or custom range string) into
//! a concrete [`TimeRange`]. Resolution is pure apart from reading the clock
//! and never fails: malformed tokens fall back to the 24-hour preset.

use chrono::{DateTime, Duration, Local, NaiveDate, SecondsFormat, TimeZone};

/// Tokens offered by the time filter dropdown.
///
/// "Select Custom Range" is a UI sentinel: picking it opens the custom-range
/// input rather than resolving directly.
pub const TIME_FILTER_OPTIONS: [&str; 4] =
    ["Last 1h", "Last 24h", "Last 7d", "Select Custom Range"];

/// The dropdown entry that transitions into custom-range entry.
pub const CUSTOM_RANGE_SENTINEL: &str = "Select Custom Range";

/// Separator that marks a token as a custom range ("<date> to <date>").
const CUSTOM_SEPARATOR: &str = " to ";

// ============================================================================
// TimeRange
// ============================================================================

/// A concrete time window derived from a filter token.
///
/// Recomputed from "now" on each resolution call; never cached here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    /// Window start, local time
    pub start_time: DateTime<Local>,
    /// Window end, local time
    pub end_time: DateTime<Local>,
    /// `end_time - start_time` in milliseconds.
    ///
    /// Negative for an inverted custom range; passed through unguarded.
    pub duration_ms: i64,
}

impl TimeRange {
    /// Resolve a filter token against the current clock.
    pub fn resolve(token: &str) -> Self {
        Self::resolve_at(token, Local::now())
    }

    /// Resolve a filter token against a supplied "now" (deterministic tests).
    pub fn resolve_at(token: &str, now: DateTime<Local>) -> Self {
        match token {
            "Last 1h" => Self::preset(now, Duration::hours(1)),
            "Last 24h" => Self::preset(now, Duration::hours(24)),
            "Last 7d" => Self::preset(now, Duration::days(7)),
            _ => {
                if let Some((start_str, end_str)) = token.split_once(CUSTOM_SEPARATOR) {
                    if let Some(range) = Self::custom(start_str, end_str) {
                        return range;
                    }
                }
                // Fallback for unrecognized, malformed, or empty tokens
                Self::preset(now, Duration::hours(24))
            }
        }
    }

    fn preset(now: DateTime<Local>, back: Duration) -> Self {
        let start_time = now - back;
        Self {
            start_time,
            end_time: now,
            duration_ms: back.num_milliseconds(),
        }
    }

    /// Build a range spanning whole local days. None if either date fails to
    /// parse or cannot be mapped to a local timestamp.
    fn custom(start_str: &str, end_str: &str) -> Option<Self> {
        let start_date = parse_date(start_str)?;
        let end_date = parse_date(end_str)?;

        let start_time = local_at(start_date, 0, 0, 0, 0)?;
        let end_time = local_at(end_date, 23, 59, 59, 999)?;

        Some(Self {
            start_time,
            end_time,
            duration_ms: (end_time - start_time).num_milliseconds(),
        })
    }

    /// ISO-8601 start timestamp with millisecond precision.
    pub fn start_iso(&self) -> String {
        self.start_time.to_rfc3339_opts(SecondsFormat::Millis, false)
    }

    /// ISO-8601 end timestamp with millisecond precision.
    pub fn end_iso(&self) -> String {
        self.end_time.to_rfc3339_opts(SecondsFormat::Millis, false)
    }
}

// ============================================================================
// Date parsing
// ============================================================================

/// Parse a date string in the formats the backend's users actually type.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    ["%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Map a date + wall-clock time to a local timestamp.
///
/// DST gaps can make a wall-clock time unrepresentable; we take the earliest
/// valid interpretation and give up (caller falls back) if there is none.
fn local_at(date: NaiveDate, h: u32, m: u32, s: u32, ms: u32) -> Option<DateTime<Local>> {
    let naive = date.and_hms_milli_opt(h, m, s, ms)?;
    Local.from_local_datetime(&naive).earliest()
}
