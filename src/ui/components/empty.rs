//! Empty state component renderer.
//!
//! Shown in place of the result grid before the first search and after a search that
//! matched nothing.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::layout::GRID_TOP;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the centered two-line empty state message.
///
/// # Layout
///
/// ```text
/// [grid top + 2]  MESSAGE
/// [grid top + 3]  subtitle
/// ```
///
/// The message uses `empty_state_fg`; the subtitle uses `text_dim` with dim styling.
///
/// # Example
///
/// ```rust
/// use reelfinder::ui::components::empty::render_empty_state;
/// use reelfinder::ui::viewmodel::EmptyState;
/// use reelfinder::ui::Theme;
///
/// let empty = EmptyState {
///     message: "No movies found. Try a different search term.".to_string(),
///     subtitle: "Ctrl+t changes the kind filter".to_string(),
/// };
/// let mut out = String::new();
/// render_empty_state(&mut out, &empty, &Theme::default(), 80);
/// assert!(out.contains("No movies found"));
/// ```
pub fn render_empty_state(out: &mut String, empty: &EmptyState, theme: &Theme, cols: usize) {
    let row = GRID_TOP + 2;
    centered_line(out, row, &empty.message, &Theme::fg(&theme.colors.empty_state_fg), cols);

    let subtitle_style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    centered_line(out, row + 1, &empty.subtitle, &subtitle_style, cols);
}

fn centered_line(out: &mut String, row: usize, text: &str, style: &str, cols: usize) {
    let text = truncate(text, cols);
    let len = text_width(&text);
    let padding = cols.saturating_sub(len) / 2;

    position_cursor(out, row, 1);
    out.push_str(style);
    out.push_str(&" ".repeat(padding));
    out.push_str(&text);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + len)));
    out.push_str(Theme::reset());
}
