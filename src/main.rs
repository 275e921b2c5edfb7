//! Zellij plugin wrapper and entry point.
//!
//! The thin integration layer between the Reelfinder library and the Zellij plugin
//! system: it maps host events to library [`Event`]s, runs [`handle_event`], and turns
//! the returned [`Action`]s into host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess` (OMDb is reached through the host)
//! 3. **Subscribe**: Key, Mouse, `WebRequestResult`, Timer, `PermissionRequestResult`
//! 4. **Update**: Map events, delegate to the library, execute actions
//! 5. **Render**: Record the pane size and print one frame
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+t`: Cycle the kind filter
//!
//! While typing:
//! - Characters edit the query, `Backspace` deletes
//! - `Enter`: Search
//! - `Tab`/`Down`: Browse results
//! - `Esc`: Browse results, or close the plugin when there are none
//!
//! While browsing:
//! - `h`/`j`/`k`/`l` or arrows: Move
//! - `Enter`: Open details (or load more on the tile)
//! - `m`: Load more
//! - `/`/`Tab`: Back to typing
//! - `q`: Close plugin
//!
//! With the detail overlay open:
//! - `j`/`k`/arrows: Scroll, `PageDown`/`PageUp` by a screen
//! - `Esc`/`q`: Close

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use reelfinder::app::Viewport;
use reelfinder::omdb::{RequestContext, RequestOp};
use reelfinder::widgets::Direction;
use reelfinder::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Lines scrolled by `PageUp`/`PageDown` in the overlay.
const PAGE_SCROLL: isize = 10;

/// Plugin state wrapper.
struct State {
    app: reelfinder::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: reelfinder::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, initializes state, requests `WebAccess` and subscribes.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        reelfinder::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            base_url = %config.base_url,
            search_type = config.search_type.label(),
            has_api_key = !config.api_key.is_empty(),
            "parsed configuration"
        );
        self.app = reelfinder::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a host event, runs the handler and executes resulting actions.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(mouse) => match Self::map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(elapsed) => Event::Tick { elapsed },
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Event::PermissionsResult {
                    granted: matches!(status, PermissionStatus::Granted),
                }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    Self::execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Records the pane size for hit-testing and prints one frame.
    fn render(&mut self, rows: usize, cols: usize) {
        self.app.viewport = Viewport { rows, cols };
        reelfinder::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(_) => "Mouse".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events, by overlay state and focus.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('t') => Some(Event::CycleKind),
                _ => None,
            };
        }
        if key.has_modifiers(&[KeyModifier::Alt]) {
            return None;
        }

        if self.app.overlay.is_open() {
            return match key.bare_key {
                BareKey::Esc => Some(Event::Escape),
                BareKey::Char('q') => Some(Event::CloseDetail),
                BareKey::Down | BareKey::Char('j') => Some(Event::ScrollDetail(1)),
                BareKey::Up | BareKey::Char('k') => Some(Event::ScrollDetail(-1)),
                BareKey::PageDown => Some(Event::ScrollDetail(PAGE_SCROLL)),
                BareKey::PageUp => Some(Event::ScrollDetail(-PAGE_SCROLL)),
                _ => None,
            };
        }

        Some(match self.app.input_mode {
            InputMode::Typing => match key.bare_key {
                BareKey::Enter => Event::Submit,
                BareKey::Esc => Event::Escape,
                BareKey::Tab | BareKey::Down => Event::FocusResults,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            },
            InputMode::Browsing => match key.bare_key {
                BareKey::Left | BareKey::Char('h') => Event::Move(Direction::Left),
                BareKey::Down | BareKey::Char('j') => Event::Move(Direction::Down),
                BareKey::Up | BareKey::Char('k') => Event::Move(Direction::Up),
                BareKey::Right | BareKey::Char('l') => Event::Move(Direction::Right),
                BareKey::Enter => Event::Activate,
                BareKey::Char('m') => Event::LoadMore,
                BareKey::Char('/') | BareKey::Tab => Event::FocusSearch,
                BareKey::Char('q') => Event::CloseFocus,
                BareKey::Esc => Event::Escape,
                _ => return None,
            },
        })
    }

    /// Maps left clicks to 1-based screen positions. Other mouse input is ignored.
    fn map_mouse_event(mouse: Mouse) -> Option<Event> {
        match mouse {
            Mouse::LeftClick(line, col) => {
                let line = usize::try_from(line).ok()?;
                Some(Event::Click {
                    line: line + 1,
                    col: col + 1,
                })
            }
            _ => None,
        }
    }

    /// Rebuilds the request context the host echoed back.
    fn map_web_result(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(context) = RequestContext::from_map(context) else {
            tracing::debug!(status, "web result with unrecognized context dropped");
            return None;
        };
        tracing::debug!(
            status,
            body_len = body.len(),
            ticket = %context.ticket,
            "web request result"
        );
        Some(Event::WebResponse {
            status,
            body,
            context,
        })
    }

    /// Executes an action returned from event handling.
    ///
    /// # Actions
    ///
    /// - `CloseFocus`: Hide the plugin pane
    /// - `WebRequest`: GET through the host; the context comes back with the result
    /// - `ScheduleTick`: Arm a host timer
    ///
    /// Request URLs carry the API key, so only the action kind is recorded on the span.
    #[tracing::instrument(level = "debug", skip_all, fields(action = action.kind()))]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::WebRequest(request) => {
                match &request.context.op {
                    RequestOp::Search { query, page, .. } => {
                        tracing::debug!(query = %query, page, "issuing search request");
                    }
                    RequestOp::Detail { id } => {
                        tracing::debug!(id = %id, "issuing detail request");
                    }
                }
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    request.context.to_map(),
                );
            }
            Action::ScheduleTick { seconds } => set_timeout(*seconds),
        }
    }
}
