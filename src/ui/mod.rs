//! Dashboard rendering.
//!
//! Pure consumers of the app state: every frame re-derives the view model
//! from the latest snapshot and draws it. No component here mutates state.

pub mod footer;
pub mod header;
pub mod sections;
pub mod summary;

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, InputMode};
use crate::models::Snapshot;
use crate::refresh::RefreshState;
use crate::view_state::{status_totals, Tone};

// ============================================================================
// Theme
// ============================================================================

/// Color palette for dashboard rendering.
#[derive(Debug, Clone)]
pub struct Theme {
    pub green: Color,
    pub amber: Color,
    pub red: Color,
    pub dim: Color,
    pub border: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            green: Color::Rgb(4, 181, 117),
            amber: Color::Yellow,
            red: Color::Red,
            dim: Color::DarkGray,
            border: Color::DarkGray,
            accent: Color::White,
        }
    }
}

impl Theme {
    /// Color for a traffic-light tone.
    pub fn tone(&self, tone: Tone) -> Color {
        match tone {
            Tone::Green => self.green,
            Tone::Amber => self.amber,
            Tone::Red => self.red,
        }
    }
}

// ============================================================================
// Top-level render
// ============================================================================

/// Render one frame of the dashboard.
pub fn render(frame: &mut Frame, app: &App, state: &RefreshState<Snapshot>) {
    let theme = Theme::default();

    let [header_area, content_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(frame.area());

    header::render(frame, header_area, app, &theme);
    render_content(frame, content_area, app, state, &theme);
    footer::render(frame, footer_area, app, &theme);

    if app.input_mode == InputMode::FilterMenu {
        let screen = frame.area();
        header::render_filter_dropdown(frame, screen, app, &theme);
    }
}

/// Content region: loading line, error line, or the dashboard body.
fn render_content(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    state: &RefreshState<Snapshot>,
    theme: &Theme,
) {
    if state.loading {
        let loading = Paragraph::new("Loading dashboard...")
            .style(Style::default().fg(theme.dim))
            .alignment(Alignment::Center);
        frame.render_widget(loading, area);
        return;
    }

    if let Some(error) = &state.error {
        let line = Paragraph::new(error.clone())
            .style(Style::default().fg(theme.red))
            .alignment(Alignment::Center);
        frame.render_widget(line, area);
        return;
    }

    let Some(snapshot) = &state.data else {
        let empty = Paragraph::new("No data yet")
            .style(Style::default().fg(theme.dim))
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    };

    let [refresh_area, title_area, summary_area, grid_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(5),
        Constraint::Min(0),
    ])
    .areas(area);

    if let Some(stamp) = state.last_refresh_time {
        let info = Paragraph::new(format!("Last updated: {}", stamp.format("%H:%M:%S")))
            .style(Style::default().fg(theme.dim))
            .alignment(Alignment::Right);
        frame.render_widget(info, refresh_area);
    }

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Journey Health Overview",
            Style::default().fg(theme.accent).bold(),
        )),
        Line::from(Span::styled(
            "Technical Operations Intelligence View",
            Style::default().fg(theme.dim),
        )),
    ]);
    frame.render_widget(title, title_area);

    summary::render(frame, summary_area, &status_totals(snapshot), theme);
    sections::render(frame, grid_area, app, snapshot, theme);
}
