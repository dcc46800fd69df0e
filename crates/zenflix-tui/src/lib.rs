//! Terminal UI for zenflix.
//!
//! View-state loaders (hero, rows, details), presentational cards, page
//! composition, and the `ratatui` + `crossterm` event loop.

/// Terminal application: event loop and rendering.
pub mod app;
/// Card view model.
pub mod card;
/// Details page loader.
pub mod details;
/// Hard-coded sample data for secondary pages.
pub mod fixtures;
/// Featured banner loader.
pub mod hero;
/// Load generations for discarding stale completions.
pub mod load;
/// Page composition.
pub mod page;
/// In-app routing.
pub mod route;
/// Horizontally scrollable row loader.
pub mod row;

pub use app::{BrowserOptions, run_browser};

#[cfg(test)]
mod testing;
