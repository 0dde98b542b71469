//! Application state and keyboard handling.
//!
//! `App` owns the header context, the section visibility store, and the
//! polling engine, and translates key events into state changes. Rendering
//! reads from it but never mutates it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::Snapshot;
use crate::refresh::{AutoRefresh, Fetcher, RefreshState};
use crate::state::{HeaderContext, NAV_TABS};
use crate::time_filter::{CUSTOM_RANGE_SENTINEL, TIME_FILTER_OPTIONS};
use crate::view_state::SectionVisibility;

/// Factory producing a fetch callback for a given time-filter token.
///
/// Committing a new filter swaps the callback (through the engine's
/// indirection cell) and updates the dependency set; the two triggers stay
/// distinct on purpose.
pub type FetcherFactory = Box<dyn Fn(String) -> Fetcher<Snapshot> + Send>;

/// What the keyboard is currently driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Section navigation and global keys
    #[default]
    Normal,
    /// Time-filter dropdown is open
    FilterMenu,
    /// Typing a custom "<date> to <date>" range
    CustomRange,
}

/// Top-level application state.
pub struct App {
    /// Shared header selections (tab + time filter)
    pub context: HeaderContext,
    /// Per-category expand/collapse flags
    pub visibility: SectionVisibility,
    /// Polling engine for the dashboard snapshot
    pub engine: AutoRefresh<Snapshot>,
    /// Builds a fetch callback for a new filter token
    fetcher_factory: FetcherFactory,
    /// Index of the keyboard-selected section
    pub selected_section: usize,
    /// Active input mode
    pub input_mode: InputMode,
    /// Cursor position inside the filter dropdown
    pub filter_cursor: usize,
    /// Custom-range input buffer
    pub custom_input: String,
    /// Redraw flag; set on any state change
    pub needs_redraw: bool,
    /// Set when the user asked to exit
    pub should_quit: bool,
}

impl App {
    /// Create the app around an already-started polling engine.
    pub fn new(engine: AutoRefresh<Snapshot>, fetcher_factory: FetcherFactory) -> Self {
        Self {
            context: HeaderContext::new(),
            visibility: SectionVisibility::new(),
            engine,
            fetcher_factory,
            selected_section: 0,
            input_mode: InputMode::Normal,
            filter_cursor: 0,
            custom_input: String::new(),
            needs_redraw: true,
            should_quit: false,
        }
    }

    /// Snapshot of the engine's refresh state for this frame.
    pub fn refresh_state(&self) -> RefreshState<Snapshot> {
        self.engine.state()
    }

    /// Register the snapshot's categories and clamp the section cursor.
    ///
    /// Called once per frame before rendering; newly appeared categories
    /// default to collapsed, existing flags are untouched.
    pub fn sync_with_snapshot(&mut self, snapshot: &Snapshot) {
        self.visibility
            .ensure_defaults(snapshot.iter().map(|s| s.key()));
        if !snapshot.is_empty() && self.selected_section >= snapshot.len() {
            self.selected_section = snapshot.len() - 1;
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Handle one key event against the current snapshot.
    pub fn handle_key(&mut self, key: KeyEvent, snapshot: &Snapshot) {
        self.mark_dirty();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key, snapshot),
            InputMode::FilterMenu => self.handle_filter_menu_key(key),
            InputMode::CustomRange => self.handle_custom_range_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent, snapshot: &Snapshot) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_section = self.selected_section.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_section + 1 < snapshot.len() {
                    self.selected_section += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(section) = snapshot.get(self.selected_section) {
                    self.visibility.toggle(section.key());
                }
            }
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => self.cycle_tab(1),
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => self.cycle_tab(-1),
            KeyCode::Char('t') => {
                self.filter_cursor = TIME_FILTER_OPTIONS
                    .iter()
                    .position(|o| *o == self.context.time_filter)
                    .unwrap_or(0);
                self.input_mode = InputMode::FilterMenu;
            }
            KeyCode::Char('r') => self.engine.refresh_now(),
            _ => {}
        }
    }

    fn handle_filter_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Up | KeyCode::Char('k') => {
                self.filter_cursor = self.filter_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.filter_cursor + 1 < TIME_FILTER_OPTIONS.len() {
                    self.filter_cursor += 1;
                }
            }
            KeyCode::Enter => {
                let option = TIME_FILTER_OPTIONS[self.filter_cursor];
                if option == CUSTOM_RANGE_SENTINEL {
                    // Sentinel: collect a "<date> to <date>" string instead
                    self.custom_input.clear();
                    self.input_mode = InputMode::CustomRange;
                } else {
                    self.commit_filter(option.to_string());
                    self.input_mode = InputMode::Normal;
                }
            }
            _ => {}
        }
    }

    fn handle_custom_range_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.custom_input.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                if !self.custom_input.trim().is_empty() {
                    let token = self.custom_input.trim().to_string();
                    self.commit_filter(token);
                }
                self.custom_input.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.custom_input.pop();
            }
            KeyCode::Char(c) => self.custom_input.push(c),
            _ => {}
        }
    }

    /// Apply a new time-filter token: swap the fetch callback, then restart
    /// the polling cycle through the dependency set.
    fn commit_filter(&mut self, token: String) {
        tracing::info!(filter = %token, "time filter changed");
        self.context.set_time_filter(token.clone());
        self.engine.set_fetcher((self.fetcher_factory)(token.clone()));
        self.engine.set_dependencies(vec![token]);
    }

    fn cycle_tab(&mut self, step: isize) {
        let len = NAV_TABS.len() as isize;
        let current = self.context.selected_tab_index().unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.context.select_tab(NAV_TABS[next]);
    }
}
