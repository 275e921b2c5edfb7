//! Composable UI component renderers.
//!
//! Each component paints one region of the frame into a `String` buffer.
//!
//! # Components
//!
//! - [`header`]: Title bar with result counts
//! - [`search`]: Search input box and the status line under it
//! - [`grid`]: Result cards and the load-more tile
//! - [`empty`]: Welcome and no-results messages
//! - [`overlay`]: Detail overlay box
//! - [`notice`]: Transient error/warning line
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Status]
//! [Card grid / empty state]
//! [Notice]
//! [Border]
//! [Footer]
//! ```
//!
//! The overlay is painted last, on top of everything except the footer.

pub mod empty;
pub mod footer;
pub mod grid;
pub mod header;
pub mod notice;
pub mod overlay;
pub mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::layout::{self, HEADER_ROW};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Paints a whole frame for a terminal `rows` by `cols`.
pub fn render_frame(out: &mut String, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = header::render_header(out, HEADER_ROW, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    debug_assert_eq!(current_row, layout::SEARCH_TOP);
    search::render_search_bar(out, &vm.search_bar, theme, cols);
    search::render_status(out, vm.status.as_deref(), theme, cols);

    if let Some(empty) = &vm.empty_state {
        empty::render_empty_state(out, empty, theme, cols);
    } else {
        grid::render_cards(out, &vm.cards, theme);
    }

    let footer_row = rows;
    let border_row = rows.saturating_sub(1);
    let notice_row = rows.saturating_sub(2);

    if let Some(notice) = &vm.notice {
        if notice_row > layout::STATUS_ROW {
            notice::render_notice(out, notice_row, notice, theme, cols);
        }
    }
    if border_row > layout::STATUS_ROW {
        render_border(out, border_row, &theme.colors.border, cols);
    }
    footer::render_footer(out, footer_row, &vm.footer, theme, cols);

    if let Some(view) = &vm.overlay {
        overlay::render_overlay(out, view, theme);
    }
}
