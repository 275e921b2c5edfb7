//! Header component renderer.
//!
//! Renders the plugin title bar with centered text, theme-aware colors and optional
//! background styling.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar at `row`.
///
/// The title is bold and centered; the rest of the line is padded so a configured
/// `header_bg` spans the full width.
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Example
///
/// ```rust
/// use reelfinder::ui::components::header::render_header;
/// use reelfinder::ui::viewmodel::HeaderInfo;
/// use reelfinder::ui::Theme;
///
/// let mut out = String::new();
/// let header = HeaderInfo { title: " Reelfinder ".to_string() };
/// let next_row = render_header(&mut out, 2, &header, &Theme::default(), 80);
/// assert_eq!(next_row, 3);
/// assert!(out.contains("Reelfinder"));
/// ```
pub fn render_header(
    out: &mut String,
    row: usize,
    header: &HeaderInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    let title = truncate(&header.title, cols);
    let title_len = text_width(&title);
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }

    out.push_str(&" ".repeat(padding));
    out.push_str(&title);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + title_len)));

    out.push_str(Theme::reset());
    row + 1
}
