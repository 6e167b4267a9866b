//! Plain-text rendering
//!
//! Text views of the feed and dashboard for clients that do not ask for JSON.

pub mod renderer;

pub use renderer::{render_dashboard, render_feed};
