//! tutodash-tui: Ratatui front end for the tutorial dashboard.
//!
//! All state and transitions live in `tutodash_core::Dashboard`; this crate
//! only maps key events to controller actions and renders the result.

pub mod app;
pub mod ui;

pub use app::{App, FormField, Mode};
