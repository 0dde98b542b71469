//! Category section cards and journey tiles.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::models::{JourneyItem, Snapshot};
use crate::ui::Theme;
use crate::view_state::{
    failure_tone, section_view, success_tone, to_pct, tone_from_status, SectionView,
};

/// Rows a journey tile occupies.
const TILE_HEIGHT: u16 = 2;
/// Border rows plus the head row inside a section card.
const CARD_CHROME: u16 = 2;

/// Render the section grid, keeping the selected card in view.
pub fn render(frame: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot, theme: &Theme) {
    if snapshot.is_empty() || area.height == 0 {
        return;
    }

    let views: Vec<SectionView> = snapshot.iter().map(section_view).collect();
    let heights: Vec<u16> = views
        .iter()
        .map(|v| card_height(v, app.visibility.is_open(v.key)))
        .collect();

    let start = first_visible(&heights, app.selected_section, area.height);

    let constraints: Vec<Constraint> = heights[start..]
        .iter()
        .map(|h| Constraint::Length(*h))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let slots = Layout::vertical(constraints).split(area);

    for (offset, view) in views[start..].iter().enumerate() {
        let slot = slots[offset];
        if slot.height == 0 {
            continue;
        }
        let index = start + offset;
        render_section_card(frame, slot, app, view, index == app.selected_section, theme);
    }
}

/// Height of a section card given its expanded state.
fn card_height(view: &SectionView, open: bool) -> u16 {
    let tiles = if open {
        1 + view.extra_items.len() as u16
    } else {
        u16::from(view.default_item.is_some())
    };
    CARD_CHROME + tiles.max(1) * TILE_HEIGHT
}

/// First section index to draw so the selected card fits in `avail` rows.
fn first_visible(heights: &[u16], selected: usize, avail: u16) -> usize {
    let selected = selected.min(heights.len().saturating_sub(1));
    let mut start = 0;
    while start < selected {
        let used: u16 = heights[start..=selected]
            .iter()
            .fold(0u16, |acc, h| acc.saturating_add(*h));
        if used <= avail {
            break;
        }
        start += 1;
    }
    start
}

fn render_section_card(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    view: &SectionView,
    selected: bool,
    theme: &Theme,
) {
    let open = app.visibility.is_open(view.key);
    let chevron = if open { "\u{25BE}" } else { "\u{25B8}" };
    let border_color = if selected { theme.accent } else { theme.border };

    let block = Block::bordered()
        .title(Line::from(vec![
            Span::styled(
                format!(" {} ", view.category),
                Style::default().fg(theme.accent).bold(),
            ),
            Span::styled(format!("({}) ", view.count), Style::default().fg(theme.dim)),
            Span::styled(chevron, Style::default().fg(theme.dim)),
        ]))
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    match view.default_item {
        Some(item) => {
            tile_lines(&mut lines, item, view, theme);
            if open {
                for item in &view.extra_items {
                    tile_lines(&mut lines, item, view, theme);
                }
            }
        }
        None => lines.push(Line::from(Span::styled(
            "no journeys in this category",
            Style::default().fg(theme.dim),
        ))),
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Append the two rendered rows for one journey tile.
fn tile_lines(lines: &mut Vec<Line<'static>>, item: &JourneyItem, view: &SectionView, theme: &Theme) {
    let tone = tone_from_status(&item.status);

    let mut head = vec![
        Span::styled(
            item.name.clone(),
            Style::default().fg(theme.tone(tone)).bold(),
        ),
        Span::styled(format!("  {}", item.meta_label()), Style::default().fg(theme.dim)),
    ];
    if view.item_is_healthy(item) {
        head.push(Span::styled(
            "  HEALTHY",
            Style::default().fg(theme.green).bold(),
        ));
    }
    lines.push(Line::from(head));

    let volume = to_pct(&item.volume);
    let success = to_pct(&item.success);
    let abandoned = to_pct(&item.abandoned);
    let failure = to_pct(&item.failure);

    lines.push(Line::from(vec![
        Span::styled("  VOL ", Style::default().fg(theme.dim)),
        Span::styled(format_volume(volume), Style::default().fg(theme.accent)),
        Span::styled("  SUCCESS ", Style::default().fg(theme.dim)),
        Span::styled(
            format!("{}%", success),
            Style::default().fg(theme.tone(success_tone(success))),
        ),
        Span::styled("  ABANDON ", Style::default().fg(theme.dim)),
        Span::styled(format!("{}%", abandoned), Style::default().fg(theme.accent)),
        Span::styled("  FAIL ", Style::default().fg(theme.dim)),
        Span::styled(
            format!("{}%", failure),
            Style::default().fg(theme.tone(failure_tone(failure))),
        ),
    ]));
}

/// Group an integer-valued volume with thousands separators.
fn format_volume(volume: f64) -> String {
    let negative = volume < 0.0;
    let whole = volume.abs().trunc() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_volume_grouping() {
        assert_eq!(format_volume(0.0), "0");
        assert_eq!(format_volume(999.0), "999");
        assert_eq!(format_volume(4000.0), "4,000");
        assert_eq!(format_volume(12840.0), "12,840");
        assert_eq!(format_volume(1_234_567.0), "1,234,567");
        assert_eq!(format_volume(-4000.0), "-4,000");
    }

    #[test]
    fn test_first_visible_when_everything_fits() {
        assert_eq!(first_visible(&[5, 5, 5], 2, 20), 0);
    }

    #[test]
    fn test_first_visible_scrolls_to_selection() {
        // Three cards of 5 rows in a 10-row area: selecting the last card
        // pushes the first one off screen
        assert_eq!(first_visible(&[5, 5, 5], 2, 10), 1);
        assert_eq!(first_visible(&[5, 5, 5], 0, 10), 0);
    }

    #[test]
    fn test_first_visible_oversized_selection() {
        // A card taller than the viewport still becomes the start
        assert_eq!(first_visible(&[4, 30, 4], 1, 10), 1);
    }

    #[test]
    fn test_card_height_tracks_open_state() {
        let section = crate::models::Section {
            category: "Assets".to_string(),
            items: vec![
                JourneyItem::new("Gold Loan", "Stable"),
                JourneyItem::new("Home Loan", "Stable"),
                JourneyItem::new("Auto Loan", "Stable"),
            ],
        };
        let view = section_view(&section);
        assert_eq!(card_height(&view, false), CARD_CHROME + TILE_HEIGHT);
        assert_eq!(card_height(&view, true), CARD_CHROME + 3 * TILE_HEIGHT);
    }

    #[test]
    fn test_card_height_empty_section() {
        let section = crate::models::Section {
            category: "Assets".to_string(),
            items: vec![],
        };
        let view = section_view(&section);
        // One row reserved for the placeholder text
        assert_eq!(card_height(&view, false), CARD_CHROME + TILE_HEIGHT);
    }
}
