//! Event handling and the application coordinator.
//!
//! [`handle_event`] is the only place that mutates [`AppState`]. It turns host input
//! into widget calls, turns widget [`Intent`]s into HTTP requests, and routes responses
//! back to the widget that asked for them.
//!
//! # Operation Classes
//!
//! Two independent state machines, each `Idle -> Pending -> Idle`:
//!
//! - **search / load-more**: guarded by [`AppState::search_guard`]. A request arriving
//!   while one is pending is dropped, not queued.
//! - **detail fetch**: owned by the overlay. A new `open` supersedes the previous one;
//!   late answers are matched against the overlay's ticket and discarded if stale.
//!
//! Every failure resets its guard and becomes a notice. Nothing is retried.
//!
//! # Example
//!
//! ```rust
//! use reelfinder::app::{handle_event, AppState, Event};
//! use reelfinder::omdb::{OmdbClient, DEFAULT_BASE_URL};
//! use reelfinder::ui::Theme;
//!
//! let mut state = AppState::new(OmdbClient::new("key", DEFAULT_BASE_URL), Theme::default());
//! for c in "alien".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (should_render, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(should_render);
//! assert!(!actions.is_empty());
//! # Ok::<(), reelfinder::ReelfinderError>(())
//! ```

use super::actions::Action;
use super::modes::InputMode;
use super::state::{AppState, NoticeLevel};
use crate::domain::{KindFilter, RequestGuard, Result, SearchSession};
use crate::omdb::{parse_detail, parse_search, RequestContext, RequestOp};
use crate::ui::layout;
use crate::widgets::{Direction, Intent};

/// Inputs to the coordinator, already mapped from host events by the plugin shim.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Appends a character to the search query.
    Char(char),
    /// Removes the last character from the search query.
    Backspace,
    /// Submits the search form.
    Submit,
    /// Cycles the kind filter.
    CycleKind,
    /// Gives the search form keyboard focus.
    FocusSearch,
    /// Gives the result grid keyboard focus.
    FocusResults,
    /// Moves the grid selection.
    Move(Direction),
    /// Opens the selected card, or loads more when the tile is selected.
    Activate,
    /// Asks for the next page regardless of selection.
    LoadMore,
    /// Scrolls the detail overlay body by a signed number of lines.
    ScrollDetail(isize),
    /// Explicit overlay close control.
    CloseDetail,
    /// Escape key; the overlay gets it first if it holds the capture.
    Escape,
    /// Hides the plugin pane.
    CloseFocus,
    /// Left click at a 1-based screen position.
    Click { line: usize, col: usize },
    /// A finished host HTTP request.
    WebResponse {
        status: u16,
        body: Vec<u8>,
        context: RequestContext,
    },
    /// Host timer fired after `elapsed` seconds.
    Tick { elapsed: f64 },
    /// Outcome of the `WebAccess` permission request.
    PermissionsResult { granted: bool },
}

impl Event {
    /// Short name for logging. Response bodies are deliberately not included.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Char(_) => "char",
            Self::Backspace => "backspace",
            Self::Submit => "submit",
            Self::CycleKind => "cycle_kind",
            Self::FocusSearch => "focus_search",
            Self::FocusResults => "focus_results",
            Self::Move(_) => "move",
            Self::Activate => "activate",
            Self::LoadMore => "load_more",
            Self::ScrollDetail(_) => "scroll_detail",
            Self::CloseDetail => "close_detail",
            Self::Escape => "escape",
            Self::CloseFocus => "close_focus",
            Self::Click { .. } => "click",
            Self::WebResponse { .. } => "web_response",
            Self::Tick { .. } => "tick",
            Self::PermissionsResult { .. } => "permissions_result",
        }
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the UI should re-render, plus the side effects to run in order.
///
/// # Errors
///
/// Currently infallible in practice: every domain failure is converted into a notice
/// at this boundary. The `Result` is kept for the plugin shim's error logging path.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event = event.name()).entered();

    let mut actions = Vec::new();
    let should_render = dispatch(state, event, &mut actions);
    state.schedule_tick(&mut actions);

    Ok((should_render, actions))
}

#[allow(clippy::too_many_lines)]
fn dispatch(state: &mut AppState, event: &Event, actions: &mut Vec<Action>) -> bool {
    match event {
        Event::WebResponse {
            status,
            body,
            context,
        } => handle_response(state, *status, body, context),
        Event::Tick { elapsed } => {
            state.tick_scheduled = false;
            state.advance_clock(*elapsed)
        }
        Event::PermissionsResult { granted } => {
            if *granted {
                tracing::debug!("web access granted");
                false
            } else {
                state.post_notice(
                    NoticeLevel::Warning,
                    "Web access was denied; searches cannot reach OMDb",
                );
                true
            }
        }
        Event::CloseFocus => {
            actions.push(Action::CloseFocus);
            false
        }
        Event::Escape => handle_escape(state, actions),
        Event::Click { line, col } => handle_click(state, *line, *col, actions),
        _ if state.overlay.is_open() => handle_overlay_input(state, event),
        Event::Char(c) => {
            if state.input_mode != InputMode::Typing {
                return false;
            }
            state.search_form.insert_char(*c)
        }
        Event::Backspace => state.input_mode == InputMode::Typing && state.search_form.backspace(),
        Event::CycleKind => {
            let kind = state.search_form.cycle_kind();
            tracing::debug!(kind = kind.label(), "kind filter changed");
            true
        }
        Event::Submit => match state.search_form.submit() {
            Ok(intent) => {
                dispatch_intent(state, intent, actions);
                true
            }
            Err(e) => {
                state.post_notice(NoticeLevel::Warning, e.to_string());
                true
            }
        },
        Event::FocusSearch => {
            state.input_mode = InputMode::Typing;
            true
        }
        Event::FocusResults => {
            if state.results.slot_count() == 0 {
                return false;
            }
            state.input_mode = InputMode::Browsing;
            true
        }
        Event::Move(direction) => {
            if state.input_mode != InputMode::Browsing {
                return false;
            }
            let columns = state.grid_columns();
            state.results.move_selection(*direction, columns)
        }
        Event::Activate => {
            if state.input_mode != InputMode::Browsing {
                return false;
            }
            state.results.activate().map_or(false, |intent| {
                dispatch_intent(state, intent, actions);
                true
            })
        }
        Event::LoadMore => state.results.request_more().map_or_else(
            || {
                tracing::debug!("load more unavailable");
                false
            },
            |intent| {
                dispatch_intent(state, intent, actions);
                true
            },
        ),
        Event::ScrollDetail(_) | Event::CloseDetail => false,
    }
}

fn handle_overlay_input(state: &mut AppState, event: &Event) -> bool {
    match event {
        Event::CloseDetail => state.overlay.close(),
        Event::ScrollDetail(delta) => {
            let max_scroll = state.overlay_max_scroll();
            state.overlay.scroll_by(*delta, max_scroll)
        }
        other => {
            tracing::trace!(event = other.name(), "ignored while overlay is open");
            false
        }
    }
}

fn handle_escape(state: &mut AppState, actions: &mut Vec<Action>) -> bool {
    if state.overlay.captures_escape() {
        return state.overlay.close();
    }
    match state.input_mode {
        InputMode::Browsing => {
            state.input_mode = InputMode::Typing;
            true
        }
        InputMode::Typing if state.results.slot_count() > 0 => {
            state.input_mode = InputMode::Browsing;
            true
        }
        InputMode::Typing => {
            actions.push(Action::CloseFocus);
            false
        }
    }
}

fn handle_click(state: &mut AppState, line: usize, col: usize, actions: &mut Vec<Action>) -> bool {
    let viewport = state.viewport;

    if state.overlay.is_open() {
        let rect = layout::overlay_rect(viewport.rows, viewport.cols);
        if rect.contains(line, col) {
            return false;
        }
        tracing::debug!(line, col, "click outside overlay");
        return state.overlay.close();
    }

    if layout::in_search_box(line) {
        state.input_mode = InputMode::Typing;
        return true;
    }

    let Some(slot) = layout::slot_at(
        line,
        col,
        state.results.slot_count(),
        state.results.selected(),
        viewport.rows,
        viewport.cols,
    ) else {
        return false;
    };

    state.input_mode = InputMode::Browsing;
    state.results.select(slot);
    if let Some(intent) = state.results.activate() {
        dispatch_intent(state, intent, actions);
    }
    true
}

/// Routes a widget request to the matching coordinator operation.
fn dispatch_intent(state: &mut AppState, intent: Intent, actions: &mut Vec<Action>) {
    tracing::debug!(intent = ?intent, "intent");
    match intent {
        Intent::SearchSubmitted { query, kind_filter } => {
            submit_search(state, query, kind_filter, actions);
        }
        Intent::LoadMoreRequested => request_more(state, actions),
        Intent::DetailRequested { id } => {
            let ticket = state.tickets.issue();
            let intent = state.overlay.open(&id, ticket);
            dispatch_intent(state, intent, actions);
        }
        Intent::DetailFetchRequested { id, ticket } => match &state.client {
            Ok(client) => actions.push(Action::WebRequest(client.detail_request(ticket, &id))),
            Err(e) => {
                let message = e.to_string();
                state.overlay.fail(ticket);
                state.post_notice(NoticeLevel::Error, message);
            }
        },
    }
}

/// Starts a fresh page-1 search. Dropped while another search or load-more is pending.
fn submit_search(
    state: &mut AppState,
    query: String,
    kind_filter: KindFilter,
    actions: &mut Vec<Action>,
) {
    if state.search_guard.is_pending() {
        tracing::debug!(query = %query, "search already pending, dropping submit");
        return;
    }

    let request = match &state.client {
        Ok(client) => {
            let ticket = state.tickets.issue();
            state.search_guard = RequestGuard::Pending {
                ticket,
                fresh: true,
            };
            client.search_request(ticket, &query, kind_filter, 1)
        }
        Err(e) => {
            let message = e.to_string();
            state.post_notice(NoticeLevel::Error, message);
            return;
        }
    };

    tracing::info!(query = %query, kind = kind_filter.label(), "searching");
    state.session = Some(SearchSession::start(query, kind_filter));
    state.search_spinner.show();
    actions.push(Action::WebRequest(request));
}

/// Requests the page after the current one. Ignored while pending or when none remain.
fn request_more(state: &mut AppState, actions: &mut Vec<Action>) {
    if state.search_guard.is_pending() {
        tracing::debug!("search pending, dropping load more");
        return;
    }
    let Some(session) = state.session.as_mut().filter(|s| s.has_more) else {
        tracing::debug!("no further pages");
        return;
    };
    let Ok(client) = &state.client else {
        return;
    };

    session.page += 1;
    let ticket = state.tickets.issue();
    state.search_guard = RequestGuard::Pending {
        ticket,
        fresh: false,
    };
    tracing::info!(query = %session.query, page = session.page, "loading more");
    actions.push(Action::WebRequest(client.search_request(
        ticket,
        &session.query,
        session.kind_filter,
        session.page,
    )));
    state.results.set_busy(true);
}

fn handle_response(state: &mut AppState, status: u16, body: &[u8], context: &RequestContext) -> bool {
    tracing::debug!(
        status,
        ticket = %context.ticket,
        request_trace_id = context.trace_id.as_deref().unwrap_or(""),
        "response received"
    );
    match &context.op {
        RequestOp::Search { page, .. } => handle_search_response(state, status, body, context, *page),
        RequestOp::Detail { id } => handle_detail_response(state, status, body, context, id),
    }
}

fn handle_search_response(
    state: &mut AppState,
    status: u16,
    body: &[u8],
    context: &RequestContext,
    page: u32,
) -> bool {
    let Some(fresh) = state.search_guard.awaiting(context.ticket) else {
        tracing::debug!(ticket = %context.ticket, "stale search response discarded");
        return false;
    };
    state.search_guard = RequestGuard::Idle;
    let Some(session) = state.session.as_mut() else {
        return false;
    };
    let outcome = parse_search(status, body, page);

    if fresh {
        state.search_spinner.hide();
        match outcome {
            Ok(result) => {
                tracing::info!(
                    items = result.items.len(),
                    total = result.total_results,
                    "search completed"
                );
                session.replace(result.items, result.total_results);
                state.results.set_items(session.items.clone(), session.has_more);
                if !session.items.is_empty() {
                    state.input_mode = InputMode::Browsing;
                }
            }
            Err(e) => {
                session.replace(Vec::new(), 0);
                state.results.clear();
                state.post_notice(NoticeLevel::Error, format!("Search failed: {e}"));
            }
        }
    } else {
        state.results.set_busy(false);
        match outcome {
            Ok(result) => {
                tracing::info!(page, items = result.items.len(), "page appended");
                session.append(result.items.clone(), result.total_results);
                state.results.append_items(result.items, session.has_more);
            }
            Err(e) => {
                session.page = session.page.saturating_sub(1).max(1);
                state.post_notice(
                    NoticeLevel::Error,
                    format!("Could not load more results: {e}"),
                );
            }
        }
    }
    true
}

fn handle_detail_response(
    state: &mut AppState,
    status: u16,
    body: &[u8],
    context: &RequestContext,
    id: &str,
) -> bool {
    match parse_detail(status, body) {
        Ok(detail) => {
            if state.overlay.deliver(context.ticket, detail) {
                tracing::info!(id, "detail shown");
                true
            } else {
                tracing::debug!(id, ticket = %context.ticket, "stale detail response discarded");
                false
            }
        }
        Err(e) => {
            if state.overlay.fail(context.ticket) {
                state.post_notice(
                    NoticeLevel::Error,
                    format!("Failed to load movie details ({e}). Please try again."),
                );
                true
            } else {
                tracing::debug!(id, error = %e, "stale detail failure discarded");
                false
            }
        }
    }
}
