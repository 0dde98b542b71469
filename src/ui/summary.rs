//! Summary cards: stable / degraded / critical journey counts.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::ui::Theme;
use crate::view_state::StatusTotals;

/// Render the three aggregate cards side by side.
pub fn render(frame: &mut Frame, area: Rect, totals: &StatusTotals, theme: &Theme) {
    let [stable, degraded, critical] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(area);

    render_card(
        frame,
        stable,
        "Stable Journeys",
        totals.stable,
        "Across All Regions",
        theme.green,
        theme,
    );
    render_card(
        frame,
        degraded,
        "Degraded Journeys",
        totals.degraded,
        "Investigation Active",
        theme.amber,
        theme,
    );
    render_card(
        frame,
        critical,
        "Critical Journeys",
        totals.critical,
        "SLA Breached",
        theme.red,
        theme,
    );
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: u32,
    sub: &str,
    tone: ratatui::style::Color,
    theme: &Theme,
) {
    let card = Paragraph::new(vec![
        Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(tone).bold(),
        )),
        Line::from(Span::styled(sub, Style::default().fg(theme.dim))),
    ])
    .block(
        Block::bordered()
            .title(Span::styled(title, Style::default().fg(theme.accent)))
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(card, area);
}
