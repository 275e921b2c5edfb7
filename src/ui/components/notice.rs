//! Transient notice line above the footer.

use crate::app::state::NoticeLevel;
use crate::ui::helpers::{pad_right, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NoticeView;

/// Renders a notice at `row`, colored by its level.
pub fn render_notice(out: &mut String, row: usize, notice: &NoticeView, theme: &Theme, cols: usize) {
    let (color, marker) = match notice.level {
        NoticeLevel::Info => (&theme.colors.notice_info, "ℹ"),
        NoticeLevel::Warning => (&theme.colors.notice_warning, "!"),
        NoticeLevel::Error => (&theme.colors.notice_error, "✗"),
    };
    let width = cols.saturating_sub(2);
    let text = truncate(&format!("{marker} {}", notice.message), width);

    position_cursor(out, row, 2);
    out.push_str(&Theme::fg(color));
    out.push_str(&pad_right(&text, width));
    out.push_str(Theme::reset());
}
