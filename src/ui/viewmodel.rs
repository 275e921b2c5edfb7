//! View model types representing renderable UI state.
//!
//! View models are immutable snapshots computed by `AppState::compute_viewmodel()` and
//! consumed by the renderer. They contain display-ready data (truncated titles,
//! highlight ranges, wrapped overlay text, screen rectangles) and no business logic.
//!
//! # Example
//!
//! ```rust
//! use reelfinder::ui::viewmodel::{FooterInfo, HeaderInfo};
//!
//! let header = HeaderInfo { title: " Reelfinder ".to_string() };
//! let footer = FooterInfo { keybindings: "Enter: search".to_string() };
//! assert!(header.title.contains("Reelfinder"));
//! assert!(!footer.keybindings.is_empty());
//! ```

use super::layout::Rect;
use crate::app::state::NoticeLevel;

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    /// One-line summary under the search box; `None` before the first search.
    pub status: Option<String>,
    /// Cards and load-more tile currently on screen.
    pub cards: Vec<CardView>,
    /// Shown instead of the grid when there is nothing to list.
    pub empty_state: Option<EmptyState>,
    pub overlay: Option<OverlayView>,
    pub notice: Option<NoticeView>,
    pub footer: FooterInfo,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Search input box contents.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
    /// Active kind filter label, e.g. `"movies"`.
    pub kind_label: String,
    /// Whether the box has keyboard focus (draws a cursor and the accent border).
    pub focused: bool,
    /// Spinner glyph while a fresh search is in flight.
    pub spinner: Option<char>,
}

/// One grid slot.
#[derive(Debug, Clone)]
pub struct CardView {
    pub rect: Rect,
    pub is_selected: bool,
    pub content: CardContent,
}

#[derive(Debug, Clone)]
pub enum CardContent {
    Item {
        title: String,
        /// Character ranges of `title` matching the submitted query.
        highlight_ranges: Vec<(usize, usize)>,
        /// Year and kind, e.g. `"2010 · movie"`.
        subtitle: String,
        /// IMDb id plus a marker when the item has no poster.
        detail: String,
    },
    LoadMore {
        /// Spinner glyph while the next page is loading.
        spinner: Option<char>,
    },
}

#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// The detail overlay box.
#[derive(Debug, Clone)]
pub struct OverlayView {
    pub rect: Rect,
    pub title: String,
    pub body: OverlayBody,
    pub hint: String,
}

#[derive(Debug, Clone)]
pub enum OverlayBody {
    Loading { spinner: Option<char>, id: String },
    Showing {
        /// Lines currently in view, already scrolled and clipped.
        lines: Vec<OverlayLine>,
        more_above: bool,
        more_below: bool,
    },
}

/// A wrapped line of the overlay body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayLine {
    Heading(String),
    Meta(String),
    Field { label: String, value: String },
    Text(String),
    Blank,
}

#[derive(Debug, Clone)]
pub struct NoticeView {
    pub level: NoticeLevel,
    pub message: String,
}
