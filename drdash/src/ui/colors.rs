//! Dashboard palette.
//!
//! A subset of the kubectl highlight colors, so the dashboard looks at home
//! next to the rest of the tooling. Every widget takes its colors from here.

use ratatui::style::Color;

use crate::status::Health;

/// Healthy targets.
pub const INFO: Color = Color::Rgb(0x60, 0x8B, 0x4E);      // #608B4E - green
/// Failed targets and their error rows.
pub const ERROR: Color = Color::Rgb(0xD1, 0x69, 0x69);     // #D16969 - red
/// Values and the selected region's border.
pub const HEADER: Color = Color::Rgb(0x56, 0x9C, 0xD6);    // #569CD6 - blue
/// Timestamps.
pub const PENDING: Color = Color::Rgb(0xC5, 0x86, 0xC0);   // #C586C0 - purple
/// Labels, unselected borders and targets not polled yet.
pub const GRAY: Color = Color::Rgb(0x66, 0x66, 0x66);      // #666666 - dark gray

/// Color for a health value.
pub fn health(health: Health) -> Color {
    match health {
        Health::Healthy => INFO,
        Health::Error => ERROR,
        Health::Unknown => GRAY,
    }
}
