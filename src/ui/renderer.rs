//! Top-level rendering coordinator.
//!
//! Rendering is two steps:
//!
//! 1. **View Model Computation**: `AppState` becomes a `UIViewModel`
//! 2. **Component Rendering**: components paint the view model into one buffer
//!
//! The buffer is printed in a single write so Zellij never sees a half-drawn frame.
//!
//! # Example
//!
//! ```rust
//! use reelfinder::app::AppState;
//! use reelfinder::omdb::{OmdbClient, DEFAULT_BASE_URL};
//! use reelfinder::ui::{render_to_string, Theme};
//!
//! let state = AppState::new(OmdbClient::new("key", DEFAULT_BASE_URL), Theme::default());
//! let frame = render_to_string(&state, 24, 80);
//! assert!(frame.contains("Reelfinder"));
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_to_string(state, rows, cols));
}

/// Renders one frame into a string of ANSI-positioned output.
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    let mut out = String::with_capacity(rows * cols * 2);
    components::render_frame(&mut out, &viewmodel, &state.theme, rows, cols);
    out
}
