//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The plugin
//! shim in `main.rs` executes them in order against the Zellij host API.
//!
//! # Example
//!
//! ```rust
//! use reelfinder::app::Action;
//!
//! let actions = vec![Action::ScheduleTick { seconds: 0.12 }];
//! assert!(matches!(actions[0], Action::ScheduleTick { .. }));
//! ```

use crate::omdb::HttpRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly asks to leave (e.g., pressing `q` while browsing).
    CloseFocus,

    /// Performs an HTTP GET on the host.
    ///
    /// The answer comes back later as a `WebRequestResult` carrying the request's
    /// context map.
    WebRequest(HttpRequest),

    /// Asks the host for a timer event after `seconds`.
    ///
    /// Drives spinner animation and notice expiry. At most one tick is outstanding.
    ScheduleTick {
        /// Delay before the timer fires.
        seconds: f64,
    },
}

impl Action {
    /// Short name for span fields. Never includes the request URL.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CloseFocus => "close_focus",
            Self::WebRequest(_) => "web_request",
            Self::ScheduleTick { .. } => "schedule_tick",
        }
    }
}
