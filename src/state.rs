//! Shared header state: selected tab and active time filter.
//!
//! Constructed once by the app and passed by reference to whatever needs it;
//! deliberately not a global.

/// Tabs shown in the observability header.
pub const NAV_TABS: [&str; 5] = ["Overview", "Journeys", "Services", "API Explorer", "Alerts"];

/// Ambient header selections shared across the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderContext {
    /// Active nav tab label
    pub selected_tab: String,
    /// Active time-filter token (preset or "<date> to <date>")
    pub time_filter: String,
}

impl Default for HeaderContext {
    fn default() -> Self {
        Self {
            selected_tab: "Overview".to_string(),
            time_filter: "Last 24h".to_string(),
        }
    }
}

impl HeaderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the active tab.
    pub fn select_tab(&mut self, label: &str) {
        self.selected_tab = label.to_string();
    }

    /// Replace the active time-filter token.
    pub fn set_time_filter(&mut self, token: impl Into<String>) {
        self.time_filter = token.into();
    }

    /// Index of the selected tab in [`NAV_TABS`], if it is one of them.
    pub fn selected_tab_index(&self) -> Option<usize> {
        NAV_TABS.iter().position(|t| *t == self.selected_tab)
    }
}
