//! Layout calculation for the dashboard regions.

use std::rc::Rc;

use ratatui::layout::{Constraint, Layout, Rect};

/// Border overhead for each region (top + bottom border).
pub const PANEL_BORDER: u16 = 2;

pub const HELP_BAR_HEIGHT: u16 = 1;

/// Splits the screen into `[primary, members, help bar]`.
///
/// The primary region gets exactly `primary_height` rows; the members row
/// takes whatever is left above the help bar.
pub fn dashboard_split(area: Rect, primary_height: u16) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(primary_height),
        Constraint::Fill(1),
        Constraint::Length(HELP_BAR_HEIGHT),
    ])
    .areas(area)
}

/// Splits the members row into `count` equal columns.
pub fn member_columns(area: Rect, count: usize) -> Rc<[Rect]> {
    let ratio = count.max(1) as u32;
    Layout::horizontal((0..count).map(|_| Constraint::Ratio(1, ratio))).split(area)
}
