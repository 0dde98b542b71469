//! Pure view-model derivation over a dashboard snapshot.
//!
//! Everything here is recomputed from the raw snapshot on each render: tone
//! classification, default-item selection, healthy badges, and the aggregate
//! status counters. No caching, no side effects.

mod section_view;
mod tone;
mod visibility;

pub use section_view::{
    section_view, section_view_with, status_totals, SectionView, StatusTotals,
    PREFERRED_ITEM_BY_CATEGORY,
};
pub use tone::{failure_tone, success_tone, to_pct, tone_from_status, Tone};
pub use visibility::SectionVisibility;
