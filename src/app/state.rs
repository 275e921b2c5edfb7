//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of everything the coordinator decides on: the
//! current [`SearchSession`], the search/load-more [`RequestGuard`], the ticket counter
//! and the widgets. Widgets never see each other; the handler moves data between them.
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] is a pure function of the state and the terminal
//! size. It handles grid windowing, fuzzy match highlighting of the submitted query in
//! result titles, overlay text wrapping and scroll clipping.
//!
//! # Example
//!
//! ```rust
//! use reelfinder::app::AppState;
//! use reelfinder::omdb::{OmdbClient, DEFAULT_BASE_URL};
//! use reelfinder::ui::Theme;
//!
//! let client = OmdbClient::new("key", DEFAULT_BASE_URL);
//! let state = AppState::new(client, Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.cards.is_empty());
//! ```

use super::actions::Action;
use super::modes::InputMode;
use crate::domain::{MovieDetail, RequestGuard, Result, SearchSession, TicketCounter};
use crate::omdb::OmdbClient;
use crate::ui::helpers::{text_width, truncate, wrap_text};
use crate::ui::layout;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardContent, CardView, EmptyState, FooterInfo, HeaderInfo, NoticeView, OverlayBody,
    OverlayLine, OverlayView, SearchBarInfo, UIViewModel,
};
use crate::widgets::{DetailOverlay, LoadingIndicator, ResultList, SearchForm};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Interval between animation ticks while anything is loading or a notice is up.
pub const TICK_SECONDS: f64 = 0.12;

/// Default lifetime of a notice.
pub const DEFAULT_NOTICE_SECONDS: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A non-blocking message shown above the footer until it expires.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Seconds left before the notice disappears.
    pub remaining: f64,
}

/// Last known terminal size, recorded on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { rows: 24, cols: 80 }
    }
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    pub input_mode: InputMode,

    pub search_form: SearchForm,
    pub results: ResultList,
    pub overlay: DetailOverlay,
    /// Shown in the search box while a page-1 search is in flight.
    pub search_spinner: LoadingIndicator,

    /// `None` until the first search is submitted.
    pub session: Option<SearchSession>,
    /// Guards the search/load-more operation class.
    pub search_guard: RequestGuard,
    pub tickets: TicketCounter,

    /// The configured client, or why it could not be built.
    pub client: Result<OmdbClient>,

    pub notice: Option<Notice>,
    pub notice_seconds: f64,
    /// Whether a host timer is outstanding.
    pub tick_scheduled: bool,

    pub viewport: Viewport,
    pub theme: Theme,
}

impl AppState {
    #[must_use]
    pub fn new(client: Result<OmdbClient>, theme: Theme) -> Self {
        Self {
            input_mode: InputMode::Typing,
            search_form: SearchForm::default(),
            results: ResultList::default(),
            overlay: DetailOverlay::default(),
            search_spinner: LoadingIndicator::default(),
            session: None,
            search_guard: RequestGuard::Idle,
            tickets: TicketCounter::default(),
            client,
            notice: None,
            notice_seconds: DEFAULT_NOTICE_SECONDS,
            tick_scheduled: false,
            viewport: Viewport::default(),
            theme,
        }
    }

    /// Replaces the current notice.
    pub fn post_notice(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NoticeLevel::Error => tracing::warn!(message = %message, "error notice"),
            NoticeLevel::Warning | NoticeLevel::Info => {
                tracing::debug!(level = ?level, message = %message, "notice");
            }
        }
        self.notice = Some(Notice {
            level,
            message,
            remaining: self.notice_seconds,
        });
    }

    /// Whether anything on screen needs periodic redraws.
    #[must_use]
    pub fn needs_tick(&self) -> bool {
        self.search_spinner.is_visible()
            || self.results.spinner().is_visible()
            || self.overlay.spinner().is_visible()
            || self.notice.is_some()
    }

    /// Queues a host timer if one is needed and none is outstanding.
    pub fn schedule_tick(&mut self, actions: &mut Vec<Action>) {
        if self.needs_tick() && !self.tick_scheduled {
            self.tick_scheduled = true;
            actions.push(Action::ScheduleTick {
                seconds: TICK_SECONDS,
            });
        }
    }

    /// Advances spinners and ages the notice by `elapsed` seconds.
    ///
    /// Returns `true` if anything visible changed.
    pub fn advance_clock(&mut self, elapsed: f64) -> bool {
        let mut changed = false;
        changed |= self.search_spinner.tick();
        changed |= self.results.tick();
        changed |= self.overlay.tick();

        if let Some(notice) = &mut self.notice {
            notice.remaining -= elapsed;
            if notice.remaining <= 0.0 {
                tracing::trace!(message = %notice.message, "notice expired");
                self.notice = None;
                changed = true;
            }
        }
        changed
    }

    /// Cards per row at the current viewport width.
    #[must_use]
    pub fn grid_columns(&self) -> usize {
        layout::grid_columns(self.viewport.cols)
    }

    /// Largest valid overlay scroll offset at the current viewport size.
    #[must_use]
    pub fn overlay_max_scroll(&self) -> usize {
        let Some(detail) = self.overlay.detail() else {
            return 0;
        };
        let rect = layout::overlay_rect(self.viewport.rows, self.viewport.cols);
        let lines = detail_lines(detail, layout::overlay_inner_width(&rect));
        lines.len().saturating_sub(layout::overlay_body_height(&rect))
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Windowing
    ///
    /// The grid shows as many card rows as fit between the status line and the notice
    /// row, scrolled just enough to keep the selected slot visible. The load-more tile
    /// is the trailing slot while more pages exist.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let overlay = self.compute_overlay(rows, cols);
        let (cards, empty_state) = if self.results.slot_count() == 0 {
            (vec![], self.compute_empty_state())
        } else {
            (self.compute_cards(rows, cols), None)
        };

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            status: self.compute_status(),
            cards,
            empty_state,
            overlay,
            notice: self.notice.as_ref().map(|n| NoticeView {
                level: n.level,
                message: n.message.clone(),
            }),
            footer: self.compute_footer(),
        }
    }

    fn compute_cards(&self, rows: usize, cols: usize) -> Vec<CardView> {
        let columns = layout::grid_columns(cols);
        let visible_rows = layout::grid_visible_rows(rows);
        let selected = self.results.selected();
        let first_row = layout::first_visible_row(selected, columns, visible_rows);
        let start = first_row * columns;
        let end = self
            .results
            .slot_count()
            .min(start + columns * visible_rows);

        let query = self.session.as_ref().map(|s| s.query.as_str());
        let matcher = query.map(|_| SkimMatcherV2::default());
        let title_width = layout::card_width(cols).saturating_sub(2);

        (start..end)
            .filter_map(|index| {
                let rect = layout::slot_rect(index, first_row, rows, cols)?;
                let content = match self.results.items().get(index) {
                    Some(item) => {
                        let title = truncate(&item.title, title_width);
                        let highlight_ranges = match (query, matcher.as_ref()) {
                            (Some(q), Some(m)) => {
                                clip_ranges(compute_highlight_ranges(&item.title, q, m), &title)
                            }
                            _ => vec![],
                        };
                        let mut detail = item.id.clone();
                        if item.poster.is_none() {
                            detail.push_str("  · no poster");
                        }
                        CardContent::Item {
                            title,
                            highlight_ranges,
                            subtitle: format!("{} · {}", item.year, item.kind),
                            detail,
                        }
                    }
                    None => CardContent::LoadMore {
                        spinner: self.results.spinner().glyph(),
                    },
                };
                Some(CardView {
                    rect,
                    is_selected: index == selected && self.input_mode == InputMode::Browsing,
                    content,
                })
            })
            .collect()
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if self.search_guard.is_pending() {
            return None;
        }
        if self.results.has_completed() {
            Some(EmptyState {
                message: "No movies found. Try a different search term.".to_string(),
                subtitle: "Ctrl+t changes the kind filter".to_string(),
            })
        } else {
            Some(EmptyState {
                message: "Search OMDb for movies and series".to_string(),
                subtitle: "Type a title and press Enter".to_string(),
            })
        }
    }

    fn compute_overlay(&self, rows: usize, cols: usize) -> Option<OverlayView> {
        if !self.overlay.is_open() {
            return None;
        }
        let rect = layout::overlay_rect(rows, cols);

        if let Some(id) = self.overlay.loading_id() {
            return Some(OverlayView {
                rect,
                title: " Loading ".to_string(),
                body: OverlayBody::Loading {
                    spinner: self.overlay.spinner().glyph(),
                    id: id.to_string(),
                },
                hint: "Esc: close".to_string(),
            });
        }

        let detail = self.overlay.detail()?;
        let lines = detail_lines(detail, layout::overlay_inner_width(&rect));
        let body_height = layout::overlay_body_height(&rect);
        let max_scroll = lines.len().saturating_sub(body_height);
        let scroll = self.overlay.scroll().min(max_scroll);

        Some(OverlayView {
            rect,
            title: format!(" {} ", truncate(&detail.title, rect.width.saturating_sub(6))),
            body: OverlayBody::Showing {
                lines: lines.iter().skip(scroll).take(body_height).cloned().collect(),
                more_above: scroll > 0,
                more_below: scroll < max_scroll,
            },
            hint: if max_scroll > 0 {
                "j/k: scroll  Esc/q: close".to_string()
            } else {
                "Esc/q: close".to_string()
            },
        })
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match &self.session {
            Some(session) if session.total_results > 0 => format!(
                " Reelfinder ({} of {}) ",
                self.results.items().len(),
                session.total_results
            ),
            _ => " Reelfinder ".to_string(),
        };
        HeaderInfo { title }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        SearchBarInfo {
            query: self.search_form.query().to_string(),
            kind_label: self.search_form.kind_filter().label().to_string(),
            focused: self.input_mode == InputMode::Typing && !self.overlay.is_open(),
            spinner: self.search_spinner.glyph(),
        }
    }

    fn compute_status(&self) -> Option<String> {
        let session = self.session.as_ref()?;
        if let RequestGuard::Pending { fresh: true, .. } = self.search_guard {
            return Some(format!("Searching for \"{}\"…", session.query));
        }
        let kind = session
            .kind_filter
            .query_value()
            .map(|k| format!(" ({k})"))
            .unwrap_or_default();
        Some(if session.items.is_empty() {
            format!("No results for \"{}\"{kind}", session.query)
        } else {
            format!(
                "Showing {} of {} results for \"{}\"{kind}",
                session.items.len(),
                session.total_results,
                session.query
            )
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.overlay.is_open() {
            "Esc/q: close  j/k: scroll  click outside: close"
        } else {
            match self.input_mode {
                InputMode::Typing => {
                    "Enter: search  Ctrl+t: kind  Tab: results  Esc: back"
                }
                InputMode::Browsing if self.results.has_more() => {
                    "←↓↑→/hjkl: move  Enter: open  m: more  /: search  q: quit"
                }
                InputMode::Browsing => "←↓↑→/hjkl: move  Enter: open  /: search  q: quit",
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Lays out a detail record as wrapped overlay lines for a body `width` wide.
#[must_use]
pub fn detail_lines(detail: &MovieDetail, width: usize) -> Vec<OverlayLine> {
    let width = width.max(10);
    let mut lines = Vec::new();

    for chunk in wrap_text(&detail.title, width) {
        lines.push(OverlayLine::Heading(chunk));
    }
    lines.push(OverlayLine::Meta(truncate(&detail.meta_line(), width)));
    if let Some(released) = &detail.released {
        lines.push(OverlayLine::Meta(truncate(&format!("Released {released}"), width)));
    }
    lines.push(OverlayLine::Blank);

    let label_width = detail
        .credits()
        .iter()
        .map(|(label, _)| text_width(label))
        .max()
        .unwrap_or(0)
        + 2;
    for (label, value) in detail.credits() {
        push_field(&mut lines, label, value, label_width, width);
    }

    if let Some(plot) = &detail.plot {
        lines.push(OverlayLine::Blank);
        lines.push(OverlayLine::Heading("Plot".to_string()));
        lines.extend(wrap_text(plot, width).into_iter().map(OverlayLine::Text));
    }

    let mut ratings: Vec<(&str, &str)> = detail
        .ratings
        .iter()
        .map(|r| (r.source.as_str(), r.value.as_str()))
        .collect();
    if ratings.is_empty() {
        if let Some(imdb) = &detail.imdb_rating {
            ratings.push(("IMDb", imdb.as_str()));
        }
    }
    if !ratings.is_empty() {
        lines.push(OverlayLine::Blank);
        lines.push(OverlayLine::Heading("Ratings".to_string()));
        let source_width = ratings.iter().map(|(s, _)| text_width(s)).max().unwrap_or(0) + 2;
        for (source, value) in ratings {
            push_field(&mut lines, source, value, source_width, width);
        }
        if let Some(votes) = &detail.imdb_votes {
            lines.push(OverlayLine::Text(truncate(&format!("{votes} IMDb votes"), width)));
        }
    }

    lines
}

fn push_field(
    lines: &mut Vec<OverlayLine>,
    label: &str,
    value: &str,
    label_width: usize,
    width: usize,
) {
    let value_width = width.saturating_sub(label_width).max(1);
    let mut wrapped = wrap_text(value, value_width).into_iter();
    lines.push(OverlayLine::Field {
        label: format!("{label:<label_width$}"),
        value: wrapped.next().unwrap_or_default(),
    });
    for rest in wrapped {
        lines.push(OverlayLine::Text(format!("{}{rest}", " ".repeat(label_width))));
    }
}

/// Character ranges of `text` matched by `query`, with consecutive indices merged.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Drops ranges that fall into the part of a title lost to truncation.
fn clip_ranges(ranges: Vec<(usize, usize)>, shown: &str) -> Vec<(usize, usize)> {
    let visible = if shown.ends_with('…') {
        text_width(shown) - 1
    } else {
        text_width(shown)
    };
    ranges
        .into_iter()
        .filter(|(start, _)| *start < visible)
        .map(|(start, end)| (start, end.min(visible)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{KindFilter, MediaKind, Rating, SearchResultItem, Ticket};
    use crate::omdb::DEFAULT_BASE_URL;

    fn state() -> AppState {
        AppState::new(OmdbClient::new("key", DEFAULT_BASE_URL), Theme::default())
    }

    fn item(id: &str, title: &str) -> SearchResultItem {
        SearchResultItem {
            id: id.into(),
            title: title.into(),
            year: "2008".into(),
            poster: None,
            kind: MediaKind::Movie,
        }
    }

    fn detail() -> MovieDetail {
        MovieDetail {
            id: "tt0468569".into(),
            title: "The Dark Knight".into(),
            year: "2008".into(),
            poster: None,
            kind: MediaKind::Movie,
            rated: Some("PG-13".into()),
            released: Some("18 Jul 2008".into()),
            runtime: Some("152 min".into()),
            genre: Some("Action, Crime, Drama".into()),
            director: Some("Christopher Nolan".into()),
            writer: None,
            actors: Some("Christian Bale, Heath Ledger, Aaron Eckhart, Michael Caine".into()),
            plot: Some("When the menace known as the Joker wreaks havoc and chaos on the people of Gotham, Batman must accept one of the greatest psychological and physical tests of his ability to fight injustice.".into()),
            language: None,
            country: None,
            awards: None,
            ratings: vec![Rating { source: "Internet Movie Database".into(), value: "9.0/10".into() }],
            imdb_rating: Some("9.0".into()),
            imdb_votes: Some("2,900,000".into()),
        }
    }

    #[test]
    fn welcome_state_before_first_search() {
        let vm = state().compute_viewmodel(24, 80);
        let empty = vm.empty_state.unwrap();
        assert!(empty.message.contains("Search OMDb"));
        assert!(vm.status.is_none());
        assert!(vm.search_bar.focused);
    }

    #[test]
    fn empty_result_message_after_completed_search() {
        let mut s = state();
        s.session = Some(SearchSession::start("zzzz".into(), KindFilter::All));
        s.results.clear();
        let vm = s.compute_viewmodel(24, 80);
        assert_eq!(
            vm.empty_state.unwrap().message,
            "No movies found. Try a different search term."
        );
    }

    #[test]
    fn cards_include_load_more_tile_and_highlights() {
        let mut s = state();
        let mut session = SearchSession::start("dark".into(), KindFilter::All);
        session.replace(vec![item("tt1", "The Dark Knight"), item("tt2", "Dark City")], 40);
        s.results.set_items(session.items.clone(), session.has_more);
        s.session = Some(session);
        s.input_mode = InputMode::Browsing;

        let vm = s.compute_viewmodel(24, 100);
        assert_eq!(vm.cards.len(), 3);
        assert!(vm.cards[0].is_selected);
        assert!(matches!(vm.cards[2].content, CardContent::LoadMore { spinner: None }));
        match &vm.cards[1].content {
            CardContent::Item { highlight_ranges, subtitle, detail, .. } => {
                assert_eq!(highlight_ranges, &vec![(0, 4)]);
                assert_eq!(subtitle, "2008 · movie");
                assert!(detail.contains("no poster"));
            }
            CardContent::LoadMore { .. } => panic!("expected item"),
        }
        assert_eq!(vm.header.title, " Reelfinder (2 of 40) ");
        assert_eq!(vm.status.as_deref(), Some("Showing 2 of 40 results for \"dark\""));
    }

    #[test]
    fn highlight_ranges_merge_consecutive_indices() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(compute_highlight_ranges("Batman Begins", "bat", &matcher), vec![(0, 3)]);
        assert!(compute_highlight_ranges("Alien", "xyz", &matcher).is_empty());
        assert_eq!(clip_ranges(vec![(0, 2), (8, 12)], "Batman B…"), vec![(0, 2)]);
    }

    #[test]
    fn overlay_detail_is_wrapped_and_scrollable() {
        let mut s = state();
        let _ = s.overlay.open("tt0468569", Ticket(1));
        assert!(matches!(
            s.compute_viewmodel(24, 80).overlay.unwrap().body,
            OverlayBody::Loading { .. }
        ));

        s.overlay.deliver(Ticket(1), detail());
        s.viewport = Viewport { rows: 14, cols: 60 };
        let max = s.overlay_max_scroll();
        assert!(max > 0);

        let vm = s.compute_viewmodel(14, 60);
        let overlay = vm.overlay.unwrap();
        assert_eq!(overlay.title, " The Dark Knight ");
        match overlay.body {
            OverlayBody::Showing { lines, more_above, more_below } => {
                assert_eq!(lines[0], OverlayLine::Heading("The Dark Knight".into()));
                assert!(!more_above);
                assert!(more_below);
            }
            OverlayBody::Loading { .. } => panic!("expected detail"),
        }
    }

    #[test]
    fn detail_lines_indent_wrapped_fields() {
        let lines = detail_lines(&detail(), 40);
        let actors = lines
            .iter()
            .position(|l| matches!(l, OverlayLine::Field { label, .. } if label.starts_with("Actors")))
            .unwrap();
        assert!(matches!(&lines[actors + 1], OverlayLine::Text(t) if t.starts_with("          ")));
        assert!(lines.contains(&OverlayLine::Heading("Ratings".into())));
        assert!(lines.contains(&OverlayLine::Text("2,900,000 IMDb votes".into())));
    }

    #[test]
    fn notices_expire_with_elapsed_time() {
        let mut s = state();
        s.notice_seconds = 0.3;
        s.post_notice(NoticeLevel::Error, "boom");
        let mut actions = vec![];
        s.schedule_tick(&mut actions);
        s.schedule_tick(&mut actions);
        assert_eq!(actions.len(), 1);

        assert!(!s.advance_clock(0.12));
        assert!(s.notice.is_some());
        assert!(s.advance_clock(0.2));
        assert!(s.notice.is_none());
        assert!(!s.needs_tick());
    }
}
