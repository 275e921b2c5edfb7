//! Screen geometry shared by view model computation and mouse hit-testing.
//!
//! All rows and columns are 1-based, matching ANSI cursor addressing.
//!
//! ```text
//! row 1            (blank)
//! row 2            header
//! row 3            border
//! rows 4-6         search box
//! row 7            status line
//! rows 8..=rows-3  result grid
//! row rows-2       notice
//! row rows-1       border
//! row rows         footer
//! ```

pub const HEADER_ROW: usize = 2;
pub const SEARCH_TOP: usize = 4;
pub const SEARCH_HEIGHT: usize = 3;
pub const STATUS_ROW: usize = 7;
pub const GRID_TOP: usize = 8;

pub const CARD_WIDTH: usize = 30;
/// Three content lines plus one spacer line.
pub const CARD_HEIGHT: usize = 4;
pub const CARD_GAP: usize = 2;
pub const GRID_MARGIN: usize = 2;

const OVERLAY_MAX_WIDTH: usize = 84;

/// A screen rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    #[must_use]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row
            && row < self.row + self.height
            && col >= self.col
            && col < self.col + self.width
    }

    #[must_use]
    pub const fn bottom(&self) -> usize {
        self.row + self.height - 1
    }
}

/// Cards per grid row for a terminal `cols` wide. Always at least one.
#[must_use]
pub fn grid_columns(cols: usize) -> usize {
    let usable = cols.saturating_sub(GRID_MARGIN * 2) + CARD_GAP;
    (usable / (CARD_WIDTH + CARD_GAP)).max(1)
}

/// Width of a card, shrunk on terminals narrower than one full card.
#[must_use]
pub fn card_width(cols: usize) -> usize {
    CARD_WIDTH.min(cols.saturating_sub(GRID_MARGIN * 2)).max(1)
}

/// Last row the grid may draw on.
#[must_use]
pub const fn grid_bottom(rows: usize) -> usize {
    rows.saturating_sub(3)
}

/// Grid rows that fit on screen. Always at least one.
#[must_use]
pub const fn grid_visible_rows(rows: usize) -> usize {
    let height = grid_bottom(rows).saturating_sub(GRID_TOP) + 1;
    let visible = height / CARD_HEIGHT;
    if visible == 0 {
        1
    } else {
        visible
    }
}

/// First grid row to draw so that `selected` stays on screen.
#[must_use]
pub fn first_visible_row(selected: usize, columns: usize, visible_rows: usize) -> usize {
    let selected_row = selected / columns.max(1);
    selected_row.saturating_sub(visible_rows.saturating_sub(1))
}

/// Position of slot `index` when the grid is scrolled to `first_row`, if visible.
#[must_use]
pub fn slot_rect(index: usize, first_row: usize, rows: usize, cols: usize) -> Option<Rect> {
    let columns = grid_columns(cols);
    let grid_row = index / columns;
    if grid_row < first_row || grid_row >= first_row + grid_visible_rows(rows) {
        return None;
    }
    let grid_col = index % columns;
    Some(Rect {
        row: GRID_TOP + (grid_row - first_row) * CARD_HEIGHT,
        col: 1 + GRID_MARGIN + grid_col * (CARD_WIDTH + CARD_GAP),
        width: card_width(cols),
        height: CARD_HEIGHT - 1,
    })
}

/// Slot under a screen position, given `slot_count` slots and the current selection.
#[must_use]
pub fn slot_at(
    row: usize,
    col: usize,
    slot_count: usize,
    selected: usize,
    rows: usize,
    cols: usize,
) -> Option<usize> {
    let columns = grid_columns(cols);
    let first_row = first_visible_row(selected, columns, grid_visible_rows(rows));
    let start = first_row * columns;
    let end = slot_count.min(start + columns * grid_visible_rows(rows));
    (start..end).find(|&index| {
        slot_rect(index, first_row, rows, cols).is_some_and(|rect| rect.contains(row, col))
    })
}

/// Whether a screen position falls inside the search box.
#[must_use]
pub const fn in_search_box(row: usize) -> bool {
    row >= SEARCH_TOP && row < SEARCH_TOP + SEARCH_HEIGHT
}

/// The search input box spanning the width between the grid margins.
#[must_use]
pub const fn search_box_rect(cols: usize) -> Rect {
    Rect {
        row: SEARCH_TOP,
        col: 1 + GRID_MARGIN,
        width: cols.saturating_sub(GRID_MARGIN * 2),
        height: SEARCH_HEIGHT,
    }
}

/// Centered box for the detail overlay, clear of the notice row and footer.
#[must_use]
pub fn overlay_rect(rows: usize, cols: usize) -> Rect {
    let width = cols.saturating_sub(4).min(OVERLAY_MAX_WIDTH).max(20.min(cols));
    let height = rows.saturating_sub(6).max(5.min(rows));
    Rect {
        row: (rows.saturating_sub(height)) / 2 + 1,
        col: (cols.saturating_sub(width)) / 2 + 1,
        width,
        height,
    }
}

/// Text columns inside the overlay border, with one space of padding each side.
#[must_use]
pub const fn overlay_inner_width(rect: &Rect) -> usize {
    rect.width.saturating_sub(4)
}

/// Scrollable body lines inside the overlay: border top and bottom plus a hint line.
#[must_use]
pub const fn overlay_body_height(rect: &Rect) -> usize {
    rect.height.saturating_sub(3)
}
