//! Search bar and status line renderers.

use crate::ui::helpers::{pad_right, position_cursor, text_width, truncate};
use crate::ui::layout::{self, STATUS_ROW};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Block cursor drawn after the query while the box has focus.
const CURSOR: char = '▏';

/// Renders the 3-line search input box.
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────────────────────┐
/// [margin] │ Search: alien▏       ⠹ [movies] │
/// [margin] └──────────────────────────────────┘
/// ```
///
/// The border uses `search_bar_border` when focused and `border` otherwise. The kind
/// filter label is right-aligned in the accent color, preceded by the spinner glyph
/// while a fresh search is in flight. Long queries keep their tail visible.
///
/// # Returns
///
/// The row just below the box.
pub fn render_search_bar(out: &mut String, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let rect = layout::search_box_rect(cols);
    let inner_width = rect.width.saturating_sub(2);
    let border_color = if search.focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };
    let border = Theme::fg(border_color);

    position_cursor(out, rect.row, rect.col);
    out.push_str(&border);
    out.push('┌');
    out.push_str(&"─".repeat(inner_width));
    out.push('┐');
    out.push_str(Theme::reset());

    let badge = match search.spinner {
        Some(glyph) => format!("{glyph} [{}] ", search.kind_label),
        None => format!("[{}] ", search.kind_label),
    };
    let prefix = " Search: ";
    let cursor = usize::from(search.focused);
    let query_room = inner_width
        .saturating_sub(text_width(prefix) + text_width(&badge) + cursor);
    let query = tail(&search.query, query_room);

    position_cursor(out, rect.row + 1, rect.col);
    out.push_str(&border);
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    let mut text = format!("{prefix}{query}");
    if search.focused {
        text.push(CURSOR);
    }
    out.push_str(&pad_right(&text, inner_width.saturating_sub(text_width(&badge))));
    out.push_str(&Theme::fg(&theme.colors.accent));
    out.push_str(&truncate(&badge, inner_width));
    out.push_str(&border);
    out.push('│');
    out.push_str(Theme::reset());

    position_cursor(out, rect.row + 2, rect.col);
    out.push_str(&border);
    out.push('└');
    out.push_str(&"─".repeat(inner_width));
    out.push('┘');
    out.push_str(Theme::reset());

    rect.row + rect.height
}

/// Renders the one-line result summary under the search box.
pub fn render_status(out: &mut String, status: Option<&str>, theme: &Theme, cols: usize) {
    let Some(status) = status else {
        return;
    };
    let width = cols.saturating_sub(layout::GRID_MARGIN * 2);
    position_cursor(out, STATUS_ROW, 1 + layout::GRID_MARGIN);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&pad_right(&truncate(status, width), width));
    out.push_str(Theme::reset());
}

/// Last `width` characters of `text`, prefixed with `…` when cut.
fn tail(text: &str, width: usize) -> String {
    let len = text_width(text);
    if len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut shown = String::from('…');
    shown.extend(text.chars().skip(len - (width - 1)));
    shown
}
