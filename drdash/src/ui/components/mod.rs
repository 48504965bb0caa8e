//! Reusable UI components.

mod help_overlay;

pub use help_overlay::{draw_help_bar, Hint, DASHBOARD_HINTS};
