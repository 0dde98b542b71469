//! Observability header: brand, nav tabs, live indicator, time filter.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::state::NAV_TABS;
use crate::time_filter::TIME_FILTER_OPTIONS;
use crate::ui::Theme;

/// Render the header rows: brand/live/filter line, tabs line, divider.
pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let [brand_area, tabs_area, divider_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    // Left: brand. Right: live dot and the active time filter.
    let brand = Paragraph::new(Line::from(vec![
        Span::styled(" PULSE ", Style::default().fg(theme.accent).bold().reversed()),
        Span::styled("  journey operations", Style::default().fg(theme.dim)),
    ]));
    frame.render_widget(brand, brand_area);

    let live = Paragraph::new(Line::from(vec![
        Span::styled("\u{25CF} Live", Style::default().fg(theme.green)),
        Span::styled("   ", Style::default()),
        Span::styled(app.context.time_filter.as_str(), Style::default().fg(theme.accent)),
        Span::styled(" [t] ", Style::default().fg(theme.dim)),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(live, brand_area);

    // Nav tabs, active one highlighted
    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in NAV_TABS.iter().enumerate() {
        let style = if app.context.selected_tab == *tab {
            Style::default().fg(theme.accent).bold().underlined()
        } else {
            Style::default().fg(theme.dim)
        };
        spans.push(Span::styled(*tab, style));
        if i + 1 < NAV_TABS.len() {
            spans.push(Span::styled("  \u{00B7}  ", Style::default().fg(theme.border)));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), tabs_area);

    let divider = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(divider, divider_area);
}

/// Time-filter dropdown overlay, anchored below the header's right edge.
pub fn render_filter_dropdown(frame: &mut Frame, screen: Rect, app: &App, theme: &Theme) {
    let width: u16 = 26;
    let height = TIME_FILTER_OPTIONS.len() as u16 + 2;
    let x = screen.width.saturating_sub(width + 1);
    let area = Rect {
        x,
        y: 1,
        width: width.min(screen.width),
        height: height.min(screen.height),
    };

    frame.render_widget(Clear, area);

    let lines: Vec<Line> = TIME_FILTER_OPTIONS
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let marker = if *option == app.context.time_filter {
                "\u{2713} "
            } else {
                "  "
            };
            let style = if i == app.filter_cursor {
                Style::default().fg(theme.accent).bold().reversed()
            } else {
                Style::default().fg(theme.accent)
            };
            Line::from(Span::styled(format!("{}{}", marker, option), style))
        })
        .collect();

    let dropdown = Paragraph::new(lines).block(
        Block::bordered()
            .title("Time Range")
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(dropdown, area);
}
