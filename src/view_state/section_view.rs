//! Per-section view derivation: default item, extras, badges, aggregates.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::models::{JourneyItem, Section};
use crate::view_state::{tone_from_status, Tone};

/// Preferred default item per uppercase category.
///
/// Extending the table is a data change only; the selection logic below never
/// needs to know which categories exist.
pub static PREFERRED_ITEM_BY_CATEGORY: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| {
        HashMap::from([
            ("ASSETS", "Gold Loan"),
            ("CARDS", "Forex Card"),
            ("LIABILITIES", "Savings Account"),
            ("THIRD PARTY", "Insurance Buy"),
        ])
    });

// ============================================================================
// SectionView
// ============================================================================

/// Pre-computed render data for one category section.
#[derive(Debug, Clone)]
pub struct SectionView<'a> {
    /// Category title as received
    pub category: &'a str,
    /// Visibility key for this section
    pub key: &'a str,
    /// Total item count (badge value)
    pub count: usize,
    /// The single item shown while collapsed; None for an empty section
    pub default_item: Option<&'a JourneyItem>,
    /// Remaining items, shown only when expanded
    pub extra_items: Vec<&'a JourneyItem>,
    /// Whether green items in this section carry a HEALTHY badge
    pub shows_healthy_badge: bool,
}

impl<'a> SectionView<'a> {
    /// Whether an item of this section renders the HEALTHY badge.
    pub fn item_is_healthy(&self, item: &JourneyItem) -> bool {
        self.shows_healthy_badge && tone_from_status(&item.status) == Tone::Green
    }
}

/// Derive a section view using the built-in preferred-item table.
pub fn section_view(section: &Section) -> SectionView<'_> {
    section_view_with(section, &PREFERRED_ITEM_BY_CATEGORY)
}

/// Derive a section view against a caller-supplied preferred-item table.
///
/// The default item is the preferred name's exact match if present, else the
/// first item in source order, else absent. Every other item is an extra.
pub fn section_view_with<'a>(
    section: &'a Section,
    preferred: &HashMap<&str, &str>,
) -> SectionView<'a> {
    let cat_key = section.category.trim().to_uppercase();
    let preferred_name = preferred.get(cat_key.as_str()).copied();

    let default_idx = preferred_name
        .and_then(|name| section.items.iter().position(|item| item.name == name))
        .or(if section.items.is_empty() { None } else { Some(0) });

    let default_item = default_idx.map(|i| &section.items[i]);
    let extra_items = section
        .items
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != default_idx)
        .map(|(_, item)| item)
        .collect();

    let upper = section.category.to_uppercase();
    let shows_healthy_badge = upper.contains("LIABILITIES") || upper.contains("THIRD PARTY");

    SectionView {
        category: &section.category,
        key: section.key(),
        count: section.items.len(),
        default_item,
        extra_items,
        shows_healthy_badge,
    }
}

// ============================================================================
// StatusTotals
// ============================================================================

/// Aggregate counts for the summary cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTotals {
    /// Items with status == "Stable"
    pub stable: u32,
    /// Items with status == "Degraded"
    pub degraded: u32,
    /// Items with status == "Critical"
    pub critical: u32,
}

/// Count statuses across every item of every section, open or closed.
///
/// Statuses outside the three domain values still tone red elsewhere but are
/// counted nowhere here, matching the upstream dashboard.
pub fn status_totals(snapshot: &[Section]) -> StatusTotals {
    let mut totals = StatusTotals::default();
    for item in snapshot.iter().flat_map(|s| s.items.iter()) {
        match item.status.as_str() {
            "Stable" => totals.stable += 1,
            "Degraded" => totals.degraded += 1,
            "Critical" => totals.critical += 1,
            _ => {}
        }
    }
    totals
}
