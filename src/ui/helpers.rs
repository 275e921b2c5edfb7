//! Shared rendering utilities and helpers.
//!
//! Everything here writes into a `String` frame buffer rather than stdout, so a whole
//! frame can be built, inspected in tests, and printed once. Widths are counted in
//! `char`s; the palette and glyphs used by the plugin are all single-width.

use crate::ui::theme::Theme;

/// Appends an ANSI cursor move to `row`, `col` (both 1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    out.push_str(&format!("\u{1b}[{row};{col}H"));
}

/// Display width of `text`.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` characters, ending in `…` when shortened.
///
/// ```rust
/// use reelfinder::ui::helpers::truncate;
///
/// assert_eq!(truncate("The Lord of the Rings", 10), "The Lord …");
/// assert_eq!(truncate("Alien", 10), "Alien");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Pads `text` with spaces on the right up to `width` characters.
#[must_use]
pub fn pad_right(text: &str, width: usize) -> String {
    let len = text_width(text);
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Greedy word wrap to `width` characters.
///
/// Words longer than a line are split. Empty input produces no lines.
///
/// ```rust
/// use reelfinder::ui::helpers::wrap_text;
///
/// assert_eq!(wrap_text("a dream within a dream", 10), vec!["a dream", "within a", "dream"]);
/// ```
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            text_width(&word)
        } else {
            text_width(&current) + 1 + text_width(&word)
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Writes `text` with highlighted character ranges for fuzzy matches.
///
/// Ranges are `(start, end)` character indices with exclusive end. Ranges outside the
/// text are clipped. When `is_selected` is set the text is written plain so the
/// selection colors stay intact; `restore` is re-applied after every highlight.
pub fn render_highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
    restore: &str,
) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }
        out.extend(&chars[current_pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(restore);
        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate("Amélie", 6), "Amélie");
        assert_eq!(truncate("Amélie Poulain", 6), "Améli…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn wrapping_splits_long_words() {
        assert_eq!(wrap_text("supercalifragilistic is long", 8), vec![
            "supercal", "ifragili", "stic is", "long"
        ]);
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn highlighting_clips_out_of_range() {
        let theme = Theme::default();
        let mut out = String::new();
        render_highlighted_text(&mut out, "Alien", &[(0, 1), (4, 9), (7, 8)], &theme, false, "");
        assert!(out.starts_with(&Theme::fg(&theme.colors.match_highlight_fg)));
        assert!(out.contains("lie"));
        assert!(out.ends_with(Theme::reset()));

        let mut plain = String::new();
        render_highlighted_text(&mut plain, "Alien", &[(0, 1)], &theme, true, "");
        assert_eq!(plain, "Alien");
    }

    #[test]
    fn cursor_positioning() {
        let mut out = String::new();
        position_cursor(&mut out, 3, 7);
        assert_eq!(out, "\u{1b}[3;7H");
        assert_eq!(pad_right("ab", 4), "ab  ");
    }
}
