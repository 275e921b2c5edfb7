//! Stateful presentational widgets.
//!
//! Each widget owns only its own display state. None of them know about the coordinator,
//! the HTTP client or each other. When the user asks for something that needs
//! coordination, a widget returns an [`Intent`] and the coordinator in
//! [`crate::app::handler`] decides what happens next.
//!
//! ```text
//! SearchForm ──SearchSubmitted──┐
//! ResultList ──LoadMoreRequested─┼──▶ handle_event ──▶ OmdbClient / widgets
//! ResultList ──DetailRequested───┤
//! DetailOverlay ─DetailFetchRequested┘
//! ```
//!
//! # Modules
//!
//! - [`search_form`]: Query input with kind filter and validation
//! - [`result_list`]: Accumulated result cards, grid cursor and load-more affordance
//! - [`detail_overlay`]: Hidden / loading / showing state machine with scoped Escape
//! - [`spinner`]: Loading indicator

pub mod detail_overlay;
pub mod result_list;
pub mod search_form;
pub mod spinner;

pub use detail_overlay::{DetailOverlay, EscapeCapture, OverlayPhase};
pub use result_list::{Direction, ResultList};
pub use search_form::SearchForm;
pub use spinner::LoadingIndicator;

use crate::domain::{KindFilter, Ticket};

/// Requests widgets send to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// The search form was submitted with a validated, trimmed query.
    SearchSubmitted {
        query: String,
        kind_filter: KindFilter,
    },
    /// The user asked for the next page of results.
    LoadMoreRequested,
    /// A result card was activated.
    DetailRequested { id: String },
    /// The overlay entered its loading state and needs the record for `id`.
    DetailFetchRequested { id: String, ticket: Ticket },
}
