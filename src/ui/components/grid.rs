//! Result grid renderer.
//!
//! Cards are three lines tall and laid out by [`crate::ui::layout`]; this module only
//! paints what the view model already positioned.
//!
//! ```text
//!  The Dark Knight
//!  2008 · movie
//!  tt0468569
//! ```

use crate::ui::helpers::{pad_right, position_cursor, render_highlighted_text, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardContent, CardView};

/// Renders every visible card and the load-more tile.
pub fn render_cards(out: &mut String, cards: &[CardView], theme: &Theme) {
    for card in cards {
        render_card(out, card, theme);
    }
}

fn render_card(out: &mut String, card: &CardView, theme: &Theme) {
    let base = if card.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    let width = card.rect.width;
    let inner = width.saturating_sub(2);

    match &card.content {
        CardContent::Item {
            title,
            highlight_ranges,
            subtitle,
            detail,
        } => {
            position_cursor(out, card.rect.row, card.rect.col);
            out.push_str(&base);
            out.push_str(Theme::bold());
            out.push(' ');
            let restore = format!("{base}{}", Theme::bold());
            render_highlighted_text(out, title, highlight_ranges, theme, card.is_selected, &restore);
            out.push_str(&" ".repeat(width.saturating_sub(text_width(title) + 1)));
            out.push_str(Theme::reset());

            let secondary = if card.is_selected {
                base.clone()
            } else {
                Theme::fg(&theme.colors.text_dim)
            };
            for (offset, line) in [subtitle, detail].into_iter().enumerate() {
                position_cursor(out, card.rect.row + 1 + offset, card.rect.col);
                out.push_str(&secondary);
                out.push(' ');
                out.push_str(&pad_right(&truncate(line, inner), width.saturating_sub(1)));
                out.push_str(Theme::reset());
            }
        }
        CardContent::LoadMore { spinner } => {
            let label = match spinner {
                Some(glyph) => format!("{glyph} Loading more…"),
                None => "+ Load more".to_string(),
            };
            let label = truncate(&label, inner);
            let padding = width.saturating_sub(text_width(&label)) / 2;
            let border = if card.is_selected {
                base.clone()
            } else {
                Theme::fg(&theme.colors.card_border)
            };

            for offset in 0..card.rect.height {
                position_cursor(out, card.rect.row + offset, card.rect.col);
                out.push_str(&border);
                if offset == card.rect.height / 2 {
                    out.push_str(&" ".repeat(padding));
                    if !card.is_selected {
                        out.push_str(&Theme::fg(&theme.colors.accent));
                    }
                    out.push_str(&label);
                    out.push_str(&" ".repeat(width.saturating_sub(padding + text_width(&label))));
                } else {
                    out.push_str(&"┄".repeat(width));
                }
                out.push_str(Theme::reset());
            }
        }
    }
}
