//! Snapshot data models for the journey health dashboard.
//!
//! This module defines the wire-shaped types deserialized from the backend's
//! dashboard endpoint: sections (categories) containing journey items with
//! their status and performance metrics.

use serde::{Deserialize, Serialize};

/// A full dashboard snapshot: ordered list of category sections.
///
/// Order is significant for rendering and is preserved as received.
pub type Snapshot = Vec<Section>;

// ============================================================================
// Metric
// ============================================================================

/// A metric value as it arrives on the wire.
///
/// The backend is loose about number formatting: a success rate may arrive as
/// `82`, `82.5`, or `"82%"`. Deserialization accepts both shapes; conversion
/// to a plain percentage lives in [`crate::view_state::to_pct`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    /// A plain JSON number
    Number(f64),
    /// A string, possibly suffixed with `%`
    Text(String),
}

impl Default for Metric {
    fn default() -> Self {
        Metric::Number(0.0)
    }
}

impl From<f64> for Metric {
    fn from(v: f64) -> Self {
        Metric::Number(v)
    }
}

impl From<&str> for Metric {
    fn from(v: &str) -> Self {
        Metric::Text(v.to_string())
    }
}

// ============================================================================
// JourneyItem
// ============================================================================

/// A tracked business flow with a status and performance metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyItem {
    /// Journey display name (e.g., "Gold Loan")
    pub name: String,
    /// Domain status: "Stable", "Degraded", "Critical"; other values possible
    #[serde(default)]
    pub status: String,
    /// Session volume
    #[serde(default)]
    pub volume: Metric,
    /// Success rate (percentage)
    #[serde(default)]
    pub success: Metric,
    /// Abandon rate (percentage)
    #[serde(default)]
    pub abandoned: Metric,
    /// Failure ratio (percentage)
    #[serde(default)]
    pub failure: Metric,
    /// Optional journey subtype label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// Optional journey type label
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    /// Optional journey group label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl JourneyItem {
    /// Create an item with a name and status; metrics default to zero.
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
            volume: Metric::default(),
            success: Metric::default(),
            abandoned: Metric::default(),
            failure: Metric::default(),
            subtype: None,
            type_: None,
            group: None,
        }
    }

    /// Uppercased meta label shown under the journey name.
    ///
    /// First non-empty of subtype, type, group; falls back to "ASSETS".
    pub fn meta_label(&self) -> String {
        [&self.subtype, &self.type_, &self.group]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .map(|s| s.to_uppercase())
            .unwrap_or_else(|| "ASSETS".to_string())
    }
}

// ============================================================================
// Section
// ============================================================================

/// A named category grouping of journey items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Category name (e.g., "Assets", "Cards")
    #[serde(default)]
    pub category: String,
    /// Journeys in this category, in render order
    #[serde(default)]
    pub items: Vec<JourneyItem>,
}

impl Section {
    /// Key used for visibility bookkeeping; empty categories map to "UNKNOWN".
    pub fn key(&self) -> &str {
        if self.category.is_empty() {
            "UNKNOWN"
        } else {
            &self.category
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_deserialize_number() {
        let m: Metric = serde_json::from_str("82.5").unwrap();
        assert_eq!(m, Metric::Number(82.5));
    }

    #[test]
    fn test_metric_deserialize_string() {
        let m: Metric = serde_json::from_str("\"82%\"").unwrap();
        assert_eq!(m, Metric::Text("82%".to_string()));
    }

    #[test]
    fn test_metric_default_is_zero() {
        assert_eq!(Metric::default(), Metric::Number(0.0));
    }

    #[test]
    fn test_journey_item_deserialize_full() {
        let json = r#"{
            "name": "Gold Loan",
            "status": "Stable",
            "volume": 4000,
            "success": "82%",
            "abandoned": "10%",
            "failure": 8,
            "subtype": "Secured"
        }"#;
        let item: JourneyItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.name, "Gold Loan");
        assert_eq!(item.status, "Stable");
        assert_eq!(item.volume, Metric::Number(4000.0));
        assert_eq!(item.success, Metric::Text("82%".to_string()));
        assert_eq!(item.failure, Metric::Number(8.0));
        assert_eq!(item.subtype, Some("Secured".to_string()));
    }

    #[test]
    fn test_journey_item_missing_fields_default() {
        let item: JourneyItem = serde_json::from_str(r#"{"name": "UPI"}"#).unwrap();
        assert_eq!(item.status, "");
        assert_eq!(item.volume, Metric::Number(0.0));
        assert!(item.subtype.is_none());
    }

    #[test]
    fn test_journey_item_ignores_unknown_fields() {
        let item: JourneyItem =
            serde_json::from_str(r#"{"name": "UPI", "region": "south"}"#).unwrap();
        assert_eq!(item.name, "UPI");
    }

    #[test]
    fn test_journey_item_type_field_rename() {
        let item: JourneyItem =
            serde_json::from_str(r#"{"name": "UPI", "type": "Payments"}"#).unwrap();
        assert_eq!(item.type_, Some("Payments".to_string()));
    }

    #[test]
    fn test_meta_label_fallback_chain() {
        let mut item = JourneyItem::new("UPI", "Stable");
        assert_eq!(item.meta_label(), "ASSETS");

        item.group = Some("payments".to_string());
        assert_eq!(item.meta_label(), "PAYMENTS");

        item.type_ = Some("retail".to_string());
        assert_eq!(item.meta_label(), "RETAIL");

        item.subtype = Some("instant".to_string());
        assert_eq!(item.meta_label(), "INSTANT");
    }

    #[test]
    fn test_meta_label_skips_empty_strings() {
        let mut item = JourneyItem::new("UPI", "Stable");
        item.subtype = Some(String::new());
        item.group = Some("loans".to_string());
        assert_eq!(item.meta_label(), "LOANS");
    }

    #[test]
    fn test_section_key_fallback() {
        let section = Section {
            category: String::new(),
            items: vec![],
        };
        assert_eq!(section.key(), "UNKNOWN");

        let section = Section {
            category: "Assets".to_string(),
            items: vec![],
        };
        assert_eq!(section.key(), "Assets");
    }

    #[test]
    fn test_snapshot_deserialize_preserves_order() {
        let json = r#"[
            {"category": "Assets", "items": [{"name": "Gold Loan"}]},
            {"category": "Cards", "items": []}
        ]"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].category, "Assets");
        assert_eq!(snapshot[1].category, "Cards");
        assert_eq!(snapshot[0].items[0].name, "Gold Loan");
    }
}
