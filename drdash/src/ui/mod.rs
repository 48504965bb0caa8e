//! Terminal UI for the DR dashboard.
//!
//! ## Modules
//!
//! - `view` - the dashboard widget and the pure text renderer
//! - `components` - reusable widgets (help bar)
//! - `events` - crossterm input to dashboard events
//! - `layout` - region layout calculation
//! - `terminal` - raw mode setup, teardown and the panic hook
//! - `text` - buffer to plain text conversion
//! - `colors` - palette

pub mod colors;
pub mod components;
pub mod events;
pub mod layout;
pub mod terminal;
pub mod text;
pub mod view;

pub use view::{render, DashboardView};
