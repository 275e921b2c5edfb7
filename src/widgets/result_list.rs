//! Result grid widget.
//!
//! Holds the cards for the current session plus a trailing "load more" slot while more
//! pages exist. The selection index walks over both, so `selected == items.len()` means
//! the load-more tile is focused.

use super::spinner::LoadingIndicator;
use super::Intent;
use crate::domain::SearchResultItem;

/// Grid cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Default)]
pub struct ResultList {
    items: Vec<SearchResultItem>,
    has_more: bool,
    busy: bool,
    /// Set once any search finished, so an empty list can say "no results".
    completed: bool,
    selected: usize,
    spinner: LoadingIndicator,
}

impl ResultList {
    #[must_use]
    pub fn items(&self) -> &[SearchResultItem] {
        &self.items
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    #[must_use]
    pub const fn has_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub const fn spinner(&self) -> &LoadingIndicator {
        &self.spinner
    }

    /// Cards plus the load-more tile when shown.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.items.len() + usize::from(self.has_more)
    }

    /// Whether the load-more tile is the focused slot.
    #[must_use]
    pub fn load_more_selected(&self) -> bool {
        self.has_more && self.selected == self.items.len()
    }

    /// Replaces the contents with a fresh first page and resets the cursor.
    pub fn set_items(&mut self, items: Vec<SearchResultItem>, has_more: bool) {
        self.items = items;
        self.has_more = has_more;
        self.completed = true;
        self.selected = 0;
    }

    /// Appends a later page. The cursor moves to the first new card.
    pub fn append_items(&mut self, items: Vec<SearchResultItem>, has_more: bool) {
        let first_new = self.items.len();
        let appended = !items.is_empty();
        self.items.extend(items);
        self.has_more = has_more;
        if appended {
            self.selected = first_new;
        }
        self.clamp_selection();
    }

    /// Drops all cards, as after a failed fresh search.
    pub fn clear(&mut self) {
        self.items.clear();
        self.has_more = false;
        self.completed = true;
        self.selected = 0;
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        self.spinner.set_visible(busy);
    }

    pub fn tick(&mut self) -> bool {
        self.spinner.tick()
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index;
        self.clamp_selection();
    }

    /// Moves the cursor in a grid `columns` wide. Returns `true` if it moved.
    pub fn move_selection(&mut self, direction: Direction, columns: usize) -> bool {
        let slots = self.slot_count();
        if slots == 0 {
            return false;
        }
        let columns = columns.max(1);
        let before = self.selected;
        self.selected = match direction {
            Direction::Left => self.selected.saturating_sub(1),
            Direction::Right => (self.selected + 1).min(slots - 1),
            Direction::Up => self.selected.checked_sub(columns).unwrap_or(self.selected),
            Direction::Down => {
                let target = self.selected + columns;
                if target < slots {
                    target
                } else if self.selected / columns < (slots - 1) / columns {
                    // Partial last row: land on its final slot.
                    slots - 1
                } else {
                    self.selected
                }
            }
        };
        self.selected != before
    }

    /// Activates the focused slot.
    ///
    /// A card yields [`Intent::DetailRequested`]; the load-more tile behaves like
    /// [`Self::request_more`].
    #[must_use]
    pub fn activate(&self) -> Option<Intent> {
        if self.load_more_selected() {
            return self.request_more();
        }
        self.items
            .get(self.selected)
            .map(|item| Intent::DetailRequested { id: item.id.clone() })
    }

    /// Asks for the next page. Ignored while a page is loading or when none remain.
    #[must_use]
    pub fn request_more(&self) -> Option<Intent> {
        (self.has_more && !self.busy).then_some(Intent::LoadMoreRequested)
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.slot_count().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MediaKind;

    fn items(n: usize) -> Vec<SearchResultItem> {
        (0..n)
            .map(|i| SearchResultItem {
                id: format!("tt{i:07}"),
                title: format!("Movie {i}"),
                year: "1999".into(),
                poster: None,
                kind: MediaKind::Movie,
            })
            .collect()
    }

    #[test]
    fn grid_navigation_stays_in_bounds() {
        let mut list = ResultList::default();
        list.set_items(items(5), false);

        assert!(!list.move_selection(Direction::Up, 3));
        assert!(!list.move_selection(Direction::Left, 3));
        assert!(list.move_selection(Direction::Down, 3));
        assert_eq!(list.selected(), 3);
        assert!(list.move_selection(Direction::Right, 3));
        assert_eq!(list.selected(), 4);
        assert!(!list.move_selection(Direction::Right, 3));
        assert!(!list.move_selection(Direction::Down, 3));
        assert!(list.move_selection(Direction::Up, 3));
        assert_eq!(list.selected(), 1);
    }

    #[test]
    fn down_into_partial_row_lands_on_last_slot() {
        let mut list = ResultList::default();
        list.set_items(items(4), false);
        list.select(2);
        assert!(list.move_selection(Direction::Down, 3));
        assert_eq!(list.selected(), 3);
    }

    #[test]
    fn activation_emits_detail_or_load_more() {
        let mut list = ResultList::default();
        list.set_items(items(2), true);
        assert_eq!(
            list.activate(),
            Some(Intent::DetailRequested { id: "tt0000000".into() })
        );

        list.select(2);
        assert!(list.load_more_selected());
        assert_eq!(list.activate(), Some(Intent::LoadMoreRequested));

        list.set_busy(true);
        assert_eq!(list.activate(), None);
        assert!(list.spinner().is_visible());
    }

    #[test]
    fn no_load_more_without_further_pages() {
        let mut list = ResultList::default();
        list.set_items(items(3), false);
        assert_eq!(list.request_more(), None);
        assert_eq!(list.slot_count(), 3);
    }

    #[test]
    fn append_focuses_first_new_card() {
        let mut list = ResultList::default();
        list.set_items(items(2), true);
        list.select(2);
        list.append_items(items(2), false);
        assert_eq!(list.items().len(), 4);
        assert_eq!(list.selected(), 2);
        assert!(!list.has_more());
    }

    #[test]
    fn clearing_marks_completion() {
        let mut list = ResultList::default();
        assert!(!list.has_completed());
        list.set_items(items(3), true);
        list.clear();
        assert!(list.has_completed());
        assert_eq!(list.slot_count(), 0);
        assert_eq!(list.activate(), None);
    }
}
