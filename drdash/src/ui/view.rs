//! The dashboard screen.
//!
//! Layout:
//! ```text
//! ┌ Hub (primary) ─────────────────────┐
//! │ Status / Namespaces / DRPCs        │  (content height)
//! └────────────────────────────────────┘
//! ┌ DR1 (secondary) ─┐┌ DR2 (secondary) ─┐
//! │ Status           ││ Status           │  (rest)
//! │ Namespaces       ││ Namespaces       │
//! └──────────────────┘└──────────────────┘
//! help bar
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::{
    dashboard::{DashboardState, Viewport},
    status::TargetStatus,
    target::{Target, TargetId},
    ui::{
        colors,
        components::{draw_help_bar, DASHBOARD_HINTS},
        layout::{dashboard_split, member_columns, HELP_BAR_HEIGHT, PANEL_BORDER},
        text::buffer_lines,
    },
};

/// Size used by [`render`] before the terminal has reported one.
pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 80,
    height: 24,
};

/// Renders the whole snapshot to plain text.
///
/// Pure: draws [`DashboardView`] into an off-screen buffer sized from the
/// state's viewport and returns its rows joined by newlines.
pub fn render(state: &DashboardState) -> String {
    let viewport = if state.viewport().is_empty() {
        DEFAULT_VIEWPORT
    } else {
        state.viewport()
    };
    let area = Rect::new(0, 0, viewport.width, viewport.height);
    let mut buf = Buffer::empty(area);
    DashboardView::new(state).render(area, &mut buf);
    buffer_lines(&buf).join("\n")
}

/// Read-only view over a [`DashboardState`].
pub struct DashboardView<'a> {
    state: &'a DashboardState,
}

impl<'a> DashboardView<'a> {
    pub fn new(state: &'a DashboardState) -> Self {
        Self { state }
    }

    fn draw_region(&self, buf: &mut Buffer, area: Rect, id: TargetId, target: &Target) {
        let selected = self
            .state
            .selected()
            .is_some_and(|t| t.name == target.name);
        let border_style = if selected {
            Style::default()
                .fg(colors::HEADER)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::GRAY)
        };
        let block = Block::default()
            .title(format!(" {} ({}) ", target.name, target.role))
            .borders(Borders::ALL)
            .border_style(border_style);

        Paragraph::new(self.region_lines(id, target))
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }

    fn region_lines(&self, id: TargetId, target: &Target) -> Vec<Line<'static>> {
        let fallback = TargetStatus::default();
        let status = self.state.status(id).unwrap_or(&fallback);
        status_lines(status, target.is_primary())
    }
}

impl Widget for DashboardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let registry = self.state.registry();

        let (primary_id, primary) = registry.primary();
        let members: Vec<(TargetId, &Target)> = registry.secondaries().collect();

        // members keep room for their own content; the primary grows into the rest
        let column_widths = member_columns(Rect::new(area.x, area.y, area.width, 1), members.len());
        let members_height = members
            .iter()
            .zip(column_widths.iter())
            .map(|((id, target), column)| {
                region_height(self.region_lines(*id, target), column.width)
            })
            .max()
            .unwrap_or(0);
        let primary_height = region_height(self.region_lines(primary_id, primary), area.width)
            .min(area.height.saturating_sub(HELP_BAR_HEIGHT + members_height));

        let [primary_area, members_area, help_area] = dashboard_split(area, primary_height);

        self.draw_region(buf, primary_area, primary_id, primary);

        let columns = member_columns(members_area, members.len());
        for ((id, target), column) in members.into_iter().zip(columns.iter()) {
            self.draw_region(buf, *column, id, target);
        }

        draw_help_bar(buf, help_area, &DASHBOARD_HINTS);
    }
}

/// Rows a region needs at `width` once its lines are wrapped, borders included.
fn region_height(lines: Vec<Line<'static>>, width: u16) -> u16 {
    let inner = width.saturating_sub(PANEL_BORDER);
    let rows = if inner == 0 {
        lines.len()
    } else {
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .line_count(inner)
    };
    u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .saturating_add(PANEL_BORDER)
}

fn status_lines(status: &TargetStatus, primary: bool) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            label("Status: "),
            Span::styled(
                status.health.to_string(),
                Style::default()
                    .fg(colors::health(status.health))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![label("Namespaces: "), value(list(&status.namespaces))]),
    ];

    // secondaries have no DRPC inventory, not even an empty row
    if primary {
        lines.push(Line::from(vec![label("DRPCs: "), value(list(&status.resources))]));
    }
    if let Some(at) = status.polled_at {
        lines.push(Line::from(vec![
            label("Updated: "),
            Span::styled(
                at.format("%H:%M:%S").to_string(),
                Style::default().fg(colors::PENDING),
            ),
        ]));
    }
    if let Some(err) = &status.error {
        lines.push(Line::from(vec![
            label("Error: "),
            Span::styled(err.clone(), Style::default().fg(colors::ERROR)),
        ]));
    }

    lines
}

fn label(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(colors::GRAY))
}

fn value(text: String) -> Span<'static> {
    Span::styled(text, Style::default().fg(colors::HEADER))
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
