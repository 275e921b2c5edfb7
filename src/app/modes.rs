//! Input focus state.
//!
//! The plugin has one screen with two focus targets. The focus decides how plain
//! character keys are interpreted:
//!
//! - **Typing**: characters edit the search query
//! - **Browsing**: characters are commands (`h/j/k/l`, `m`, `q`, `/`)
//!
//! While the detail overlay is open it takes precedence over both; see
//! [`crate::widgets::DetailOverlay::captures_escape`].
//!
//! # Example
//!
//! ```rust
//! use reelfinder::app::InputMode;
//!
//! let mode = InputMode::default();
//! assert_eq!(mode, InputMode::Typing);
//! ```

/// Which part of the screen receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// The search form has focus.
    ///
    /// Accepts character input, backspace, `Enter` (submit), `Tab` (browse results)
    /// and `Ctrl+t` (cycle kind filter).
    #[default]
    Typing,

    /// The result grid has focus.
    ///
    /// Accepts arrows or `h/j/k/l` for movement, `Enter` to open a card or load more,
    /// `m` to load more, `/` or `Tab` to return to typing, `q` to close the plugin.
    Browsing,
}
