//! Per-category expand/collapse state.
//!
//! Owned by the presentation layer and mutated only through [`toggle`];
//! data refreshes add new keys but never rewrite existing ones.
//!
//! [`toggle`]: SectionVisibility::toggle

use std::collections::HashMap;

/// Map of category key to expanded flag.
#[derive(Debug, Clone, Default)]
pub struct SectionVisibility {
    open: HashMap<String, bool>,
}

impl SectionVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register categories, defaulting newcomers to collapsed.
    ///
    /// Idempotent and additive: keys already present keep their state.
    pub fn ensure_defaults<'a>(&mut self, categories: impl IntoIterator<Item = &'a str>) {
        for key in categories {
            self.open.entry(key.to_string()).or_insert(false);
        }
    }

    /// Flip exactly one key. An unseen key toggles from the closed default.
    pub fn toggle(&mut self, key: &str) {
        let entry = self.open.entry(key.to_string()).or_insert(false);
        *entry = !*entry;
    }

    /// Stored state, or closed when the key is absent.
    pub fn is_open(&self, key: &str) -> bool {
        self.open.get(key).copied().unwrap_or(false)
    }

    /// Number of tracked categories.
    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_initializes_closed() {
        let mut vis = SectionVisibility::new();
        vis.ensure_defaults(["ASSETS", "CARDS"]);
        assert!(!vis.is_open("ASSETS"));
        assert!(!vis.is_open("CARDS"));
        assert_eq!(vis.len(), 2);
    }

    #[test]
    fn test_ensure_defaults_preserves_existing_state() {
        let mut vis = SectionVisibility::new();
        vis.ensure_defaults(["ASSETS"]);
        vis.toggle("ASSETS");
        assert!(vis.is_open("ASSETS"));

        // Repeated ensure_defaults must not reset the open entry
        vis.ensure_defaults(["ASSETS", "CARDS"]);
        assert!(vis.is_open("ASSETS"));
        assert!(!vis.is_open("CARDS"));
    }

    #[test]
    fn test_toggle_flips_only_target() {
        let mut vis = SectionVisibility::new();
        vis.ensure_defaults(["ASSETS", "CARDS", "LIABILITIES"]);
        vis.toggle("CARDS");
        assert!(!vis.is_open("ASSETS"));
        assert!(vis.is_open("CARDS"));
        assert!(!vis.is_open("LIABILITIES"));

        vis.toggle("CARDS");
        assert!(!vis.is_open("CARDS"));
    }

    #[test]
    fn test_toggle_unseen_key_opens() {
        let mut vis = SectionVisibility::new();
        vis.toggle("ASSETS");
        assert!(vis.is_open("ASSETS"));
    }

    #[test]
    fn test_is_open_absent_key_defaults_closed() {
        let vis = SectionVisibility::new();
        assert!(!vis.is_open("NEVER SEEN"));
    }

    #[test]
    fn test_keys_accumulate_monotonically() {
        let mut vis = SectionVisibility::new();
        vis.ensure_defaults(["ASSETS"]);
        vis.ensure_defaults(["CARDS"]);
        // A refresh that drops a category does not remove its entry
        vis.ensure_defaults(["CARDS"]);
        assert_eq!(vis.len(), 2);
    }
}
