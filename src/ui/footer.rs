//! Footer: key hints and the custom-range input line.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, InputMode};
use crate::ui::Theme;

/// Render the footer divider and hint/input line.
pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let [divider_area, line_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    let divider = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(divider, divider_area);

    let line = match app.input_mode {
        InputMode::CustomRange => Line::from(vec![
            Span::styled(" Custom range: ", Style::default().fg(theme.accent)),
            Span::styled(app.custom_input.clone(), Style::default().fg(theme.accent).bold()),
            Span::styled("\u{2588}", Style::default().fg(theme.accent)),
            Span::styled(
                "  e.g. 2026-02-01 to 2026-02-28 \u{00B7} Enter apply \u{00B7} Esc cancel",
                Style::default().fg(theme.dim),
            ),
        ]),
        InputMode::FilterMenu => Line::from(Span::styled(
            " \u{2191}\u{2193} choose \u{00B7} Enter apply \u{00B7} Esc close",
            Style::default().fg(theme.dim),
        )),
        InputMode::Normal => Line::from(Span::styled(
            " q quit \u{00B7} \u{2191}\u{2193} select \u{00B7} Enter expand \u{00B7} \u{2190}\u{2192} tabs \u{00B7} t time range \u{00B7} r refresh",
            Style::default().fg(theme.dim),
        )),
    };

    frame.render_widget(Paragraph::new(line), line_area);
}
