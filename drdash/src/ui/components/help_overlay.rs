//! Key hint bar shown on the last row of the dashboard.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{palette::tailwind, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A `(key, description)` pair, rendered as `key:description`.
pub type Hint = (&'static str, &'static str);

/// Keys the dashboard reacts to, in the order they are shown.
pub const DASHBOARD_HINTS: [Hint; 3] = [("↑/k", "up"), ("↓/j", "down"), ("q", "quit")];

/// Draws the hints into `area` as `key:desc │ key:desc │ ...`.
///
/// Hints that do not fit are cut at the right edge; the bar never wraps.
pub fn draw_help_bar(buf: &mut Buffer, area: Rect, hints: &[Hint]) {
    let key_style = Style::default()
        .fg(tailwind::YELLOW.c400)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(tailwind::GRAY.c400);
    let separator = Span::styled(" │ ", Style::default().fg(tailwind::GRAY.c600));

    let spans: Vec<Span> = hints
        .iter()
        .enumerate()
        .flat_map(|(i, (key, desc))| {
            let lead = (i > 0).then(|| separator.clone());
            lead.into_iter().chain([
                Span::styled(*key, key_style),
                Span::styled(format!(":{desc}"), desc_style),
            ])
        })
        .collect();

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Left)
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::text::buffer_lines;

    #[test]
    fn test_help_bar_text() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        draw_help_bar(&mut buf, area, &DASHBOARD_HINTS);

        assert_eq!(buffer_lines(&buf), ["↑/k:up │ ↓/j:down │ q:quit"]);
    }

    #[test]
    fn test_help_bar_is_cut_not_wrapped() {
        let area = Rect::new(0, 0, 8, 1);
        let mut buf = Buffer::empty(area);
        draw_help_bar(&mut buf, area, &DASHBOARD_HINTS);

        assert_eq!(buffer_lines(&buf), ["↑/k:up │"]);
    }
}
