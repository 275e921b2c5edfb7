//! Detail overlay widget.
//!
//! A modal box over the result grid with three phases:
//!
//! ```text
//! Hidden ──open──▶ Loading ──deliver──▶ Showing
//!    ▲               │  ▲                  │
//!    └────fail───────┘  └──────open────────┘
//!    ▲                                     │
//!    └───────────────close (any)───────────┘
//! ```
//!
//! Each `open` carries a fresh [`Ticket`]. `deliver` and `fail` only act when their ticket
//! is the one the overlay is loading, so a late answer for an earlier id is never shown.

use super::spinner::LoadingIndicator;
use super::Intent;
use crate::domain::{MovieDetail, Ticket};

/// Proof that the overlay currently owns the Escape key.
///
/// Created on `open` and stored inside the non-hidden phases; dropping the phase releases
/// it. Key routing asks [`DetailOverlay::captures_escape`] instead of a global listener.
#[derive(Debug)]
pub struct EscapeCapture {
    id: String,
}

impl EscapeCapture {
    fn acquire(id: &str) -> Self {
        tracing::trace!(id, "overlay captured escape");
        Self { id: id.to_string() }
    }
}

impl Drop for EscapeCapture {
    fn drop(&mut self) {
        tracing::trace!(id = %self.id, "overlay released escape");
    }
}

#[derive(Debug, Default)]
pub enum OverlayPhase {
    #[default]
    Hidden,
    Loading {
        id: String,
        ticket: Ticket,
        capture: EscapeCapture,
    },
    Showing {
        detail: Box<MovieDetail>,
        /// First visible line of the body.
        scroll: usize,
        capture: EscapeCapture,
    },
}

#[derive(Debug, Default)]
pub struct DetailOverlay {
    phase: OverlayPhase,
    spinner: LoadingIndicator,
}

impl DetailOverlay {
    #[must_use]
    pub const fn phase(&self) -> &OverlayPhase {
        &self.phase
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self.phase, OverlayPhase::Hidden)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, OverlayPhase::Loading { .. })
    }

    #[must_use]
    pub const fn spinner(&self) -> &LoadingIndicator {
        &self.spinner
    }

    /// Whether Escape should close the overlay rather than reach the rest of the UI.
    #[must_use]
    pub fn captures_escape(&self) -> bool {
        self.escape_capture().is_some()
    }

    fn escape_capture(&self) -> Option<&EscapeCapture> {
        match &self.phase {
            OverlayPhase::Hidden => None,
            OverlayPhase::Loading { capture, .. } | OverlayPhase::Showing { capture, .. } => {
                Some(capture)
            }
        }
    }

    /// Id the overlay is loading, if any.
    #[must_use]
    pub fn loading_id(&self) -> Option<&str> {
        match &self.phase {
            OverlayPhase::Loading { id, .. } => Some(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn detail(&self) -> Option<&MovieDetail> {
        match &self.phase {
            OverlayPhase::Showing { detail, .. } => Some(detail),
            _ => None,
        }
    }

    #[must_use]
    pub const fn scroll(&self) -> usize {
        match &self.phase {
            OverlayPhase::Showing { scroll, .. } => *scroll,
            _ => 0,
        }
    }

    /// Enters the loading phase for `id`, discarding whatever was shown before.
    pub fn open(&mut self, id: &str, ticket: Ticket) -> Intent {
        self.phase = OverlayPhase::Loading {
            id: id.to_string(),
            ticket,
            capture: EscapeCapture::acquire(id),
        };
        self.spinner.show();
        Intent::DetailFetchRequested {
            id: id.to_string(),
            ticket,
        }
    }

    /// Hides the overlay from any phase. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        self.phase = OverlayPhase::Hidden;
        self.spinner.hide();
        was_open
    }

    /// Shows `detail` if the overlay is still loading `ticket`.
    pub fn deliver(&mut self, ticket: Ticket, detail: MovieDetail) -> bool {
        if !self.awaits(ticket) {
            return false;
        }
        let capture = EscapeCapture::acquire(&detail.id);
        self.phase = OverlayPhase::Showing {
            detail: Box::new(detail),
            scroll: 0,
            capture,
        };
        self.spinner.hide();
        true
    }

    /// Closes the overlay if it is still loading `ticket`.
    pub fn fail(&mut self, ticket: Ticket) -> bool {
        if !self.awaits(ticket) {
            return false;
        }
        self.close()
    }

    /// Scrolls the body by `delta` lines, staying within `0..=max_scroll`.
    pub fn scroll_by(&mut self, delta: isize, max_scroll: usize) -> bool {
        if let OverlayPhase::Showing { scroll, .. } = &mut self.phase {
            let next = scroll.saturating_add_signed(delta).min(max_scroll);
            if next != *scroll {
                *scroll = next;
                return true;
            }
        }
        false
    }

    pub fn tick(&mut self) -> bool {
        self.spinner.tick()
    }

    fn awaits(&self, ticket: Ticket) -> bool {
        matches!(&self.phase, OverlayPhase::Loading { ticket: t, .. } if *t == ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MediaKind;

    fn detail(id: &str) -> MovieDetail {
        MovieDetail {
            id: id.into(),
            title: format!("Title {id}"),
            year: "2010".into(),
            poster: None,
            kind: MediaKind::Movie,
            rated: None,
            released: None,
            runtime: None,
            genre: None,
            director: None,
            writer: None,
            actors: None,
            plot: Some("A thief who steals corporate secrets.".into()),
            language: None,
            country: None,
            awards: None,
            ratings: vec![],
            imdb_rating: None,
            imdb_votes: None,
        }
    }

    #[test]
    fn open_requests_a_fetch_and_captures_escape() {
        let mut overlay = DetailOverlay::default();
        assert!(!overlay.captures_escape());

        let intent = overlay.open("tt001", Ticket(1));
        assert_eq!(
            intent,
            Intent::DetailFetchRequested { id: "tt001".into(), ticket: Ticket(1) }
        );
        assert!(overlay.is_loading());
        assert!(overlay.captures_escape());
        assert!(overlay.spinner().is_visible());
    }

    #[test]
    fn superseded_response_is_ignored() {
        let mut overlay = DetailOverlay::default();
        let _ = overlay.open("tt001", Ticket(1));
        let _ = overlay.open("tt002", Ticket(2));

        assert!(!overlay.deliver(Ticket(1), detail("tt001")));
        assert_eq!(overlay.loading_id(), Some("tt002"));

        assert!(overlay.deliver(Ticket(2), detail("tt002")));
        assert_eq!(overlay.detail().map(|d| d.id.as_str()), Some("tt002"));
        assert!(!overlay.spinner().is_visible());
    }

    #[test]
    fn responses_after_close_have_no_effect() {
        let mut overlay = DetailOverlay::default();
        let _ = overlay.open("tt001", Ticket(5));
        assert!(overlay.close());
        assert!(!overlay.captures_escape());

        assert!(!overlay.deliver(Ticket(5), detail("tt001")));
        assert!(!overlay.fail(Ticket(5)));
        assert!(!overlay.is_open());
    }

    #[test]
    fn failure_hides_the_overlay() {
        let mut overlay = DetailOverlay::default();
        let _ = overlay.open("tt001", Ticket(3));
        assert!(!overlay.fail(Ticket(2)));
        assert!(overlay.fail(Ticket(3)));
        assert!(!overlay.is_open());
    }

    #[test]
    fn reopening_from_showing_clears_prior_detail() {
        let mut overlay = DetailOverlay::default();
        let _ = overlay.open("tt001", Ticket(1));
        overlay.deliver(Ticket(1), detail("tt001"));
        let _ = overlay.open("tt002", Ticket(2));
        assert!(overlay.detail().is_none());
        assert!(overlay.captures_escape());
    }

    #[test]
    fn scrolling_is_bounded() {
        let mut overlay = DetailOverlay::default();
        assert!(!overlay.scroll_by(1, 5));

        let _ = overlay.open("tt001", Ticket(1));
        overlay.deliver(Ticket(1), detail("tt001"));
        assert!(!overlay.scroll_by(-1, 5));
        assert!(overlay.scroll_by(10, 5));
        assert_eq!(overlay.scroll(), 5);
        assert!(overlay.scroll_by(-2, 5));
        assert_eq!(overlay.scroll(), 3);
    }
}
