//! Traffic-light tone classification.
//!
//! Tones are derived on the fly from a journey's status or from a metric
//! percentage; they are never stored.

use crate::models::Metric;

// ============================================================================
// Tone
// ============================================================================

/// Traffic-light classification for statuses and metric thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Green,
    Amber,
    Red,
}

impl Tone {
    /// Lowercase label, as used in log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Green => "green",
            Tone::Amber => "amber",
            Tone::Red => "red",
        }
    }
}

// ============================================================================
// Classification functions
// ============================================================================

/// Tone for a journey status. Total: unknown statuses classify red.
pub fn tone_from_status(status: &str) -> Tone {
    match status {
        "Stable" => Tone::Green,
        "Degraded" => Tone::Amber,
        _ => Tone::Red,
    }
}

/// Coerce a wire metric to a percentage number.
///
/// Numbers pass through; strings are stripped of `%`, trimmed, and parsed.
/// Anything unparseable (including the empty string) is 0. Never fails.
pub fn to_pct(value: &Metric) -> f64 {
    match value {
        Metric::Number(n) => *n,
        Metric::Text(s) => s.replace('%', "").trim().parse().unwrap_or(0.0),
    }
}

/// Tone for a success-rate percentage: higher is better.
pub fn success_tone(pct: f64) -> Tone {
    if pct > 75.0 {
        Tone::Green
    } else if pct >= 50.0 {
        Tone::Amber
    } else {
        Tone::Red
    }
}

/// Tone for a failure-ratio percentage: polarity inverted, higher is worse.
pub fn failure_tone(pct: f64) -> Tone {
    if pct > 60.0 {
        Tone::Red
    } else if pct >= 40.0 {
        Tone::Amber
    } else {
        Tone::Green
    }
}
