//! Detail overlay renderer.
//!
//! Draws a bordered box over whatever the grid painted. Every interior cell is
//! rewritten so nothing from underneath shows through.
//!
//! ```text
//! ┌─ The Dark Knight ───────────────────┐
//! │ The Dark Knight                 ▲    │
//! │ 2008 · movie · PG-13 · 152 min       │
//! │                                      │
//! │ Director  Christopher Nolan          │
//! │ ...                                  │
//! │ j/k: scroll  Esc/q: close            │
//! └──────────────────────────────────▼──┘
//! ```

use crate::ui::helpers::{pad_right, position_cursor, text_width, truncate};
use crate::ui::layout::{overlay_body_height, overlay_inner_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{OverlayBody, OverlayLine, OverlayView};

/// Renders the overlay box, its body and the hint line.
pub fn render_overlay(out: &mut String, overlay: &OverlayView, theme: &Theme) {
    let rect = overlay.rect;
    if rect.width < 4 || rect.height < 3 {
        return;
    }
    let inner = overlay_inner_width(&rect);
    let border = Theme::fg(&theme.colors.overlay_border);
    let fill = theme
        .colors
        .overlay_bg
        .as_deref()
        .map(Theme::bg)
        .unwrap_or_default();

    let (more_above, more_below) = match &overlay.body {
        OverlayBody::Showing { more_above, more_below, .. } => (*more_above, *more_below),
        OverlayBody::Loading { .. } => (false, false),
    };

    // Top border with the title.
    let title = truncate(&overlay.title, rect.width.saturating_sub(4));
    let mut top = format!("┌─{title}");
    let top_fill = rect.width.saturating_sub(text_width(&top) + 1);
    top.push_str(&edge(top_fill, more_above, '▲'));
    top.push('┐');
    position_cursor(out, rect.row, rect.col);
    out.push_str(&fill);
    out.push_str(&border);
    out.push_str(&top);
    out.push_str(Theme::reset());

    let body_rows = overlay_body_height(&rect);
    let lines = body_lines(&overlay.body, inner, body_rows);
    for (offset, line) in lines.iter().enumerate() {
        let row = rect.row + 1 + offset;
        position_cursor(out, row, rect.col);
        out.push_str(&fill);
        out.push_str(&border);
        out.push_str("│ ");
        render_line(out, line, inner, theme, &fill);
        out.push_str(&fill);
        out.push_str(&border);
        out.push_str(" │");
        out.push_str(Theme::reset());
    }

    let hint_row = rect.row + 1 + body_rows;
    position_cursor(out, hint_row, rect.col);
    out.push_str(&fill);
    out.push_str(&border);
    out.push_str("│ ");
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&pad_right(&truncate(&overlay.hint, inner), inner));
    out.push_str(&border);
    out.push_str(" │");
    out.push_str(Theme::reset());

    position_cursor(out, rect.bottom(), rect.col);
    out.push_str(&fill);
    out.push_str(&border);
    out.push('└');
    out.push_str(&edge(rect.width.saturating_sub(2), more_below, '▼'));
    out.push('┘');
    out.push_str(Theme::reset());
}

/// A horizontal border run of `width`, with `marker` near its right end when set.
fn edge(width: usize, marked: bool, marker: char) -> String {
    if !marked || width < 4 {
        return "─".repeat(width);
    }
    let mut run = "─".repeat(width - 3);
    run.push(marker);
    run.push_str("──");
    run
}

/// Exactly `rows` body lines: the content followed by blanks.
fn body_lines(body: &OverlayBody, width: usize, rows: usize) -> Vec<OverlayLine> {
    let mut lines = match body {
        OverlayBody::Loading { spinner, id } => {
            let glyph = spinner.unwrap_or(' ');
            vec![
                OverlayLine::Blank,
                OverlayLine::Text(truncate(&format!("{glyph} Loading details for {id}…"), width)),
            ]
        }
        OverlayBody::Showing { lines, .. } => lines.clone(),
    };
    lines.truncate(rows);
    lines.resize(rows, OverlayLine::Blank);
    lines
}

fn render_line(out: &mut String, line: &OverlayLine, width: usize, theme: &Theme, fill: &str) {
    let normal = Theme::fg(&theme.colors.text_normal);
    match line {
        OverlayLine::Heading(text) => {
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.header_fg));
            out.push_str(&pad_right(&truncate(text, width), width));
        }
        OverlayLine::Meta(text) => {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
            out.push_str(&pad_right(&truncate(text, width), width));
        }
        OverlayLine::Field { label, value } => {
            let label = truncate(label, width);
            out.push_str(&Theme::fg(&theme.colors.accent));
            out.push_str(&label);
            out.push_str(&normal);
            let rest = width.saturating_sub(text_width(&label));
            out.push_str(&pad_right(&truncate(value, rest), rest));
        }
        OverlayLine::Text(text) => {
            out.push_str(&normal);
            out.push_str(&pad_right(&truncate(text, width), width));
        }
        OverlayLine::Blank => out.push_str(&" ".repeat(width)),
    }
    out.push_str(Theme::reset());
    out.push_str(fill);
}
