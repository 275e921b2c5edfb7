//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the widget, OMDb and domain layers.
//!
//! # Architecture
//!
//! ```text
//! Host Input → Events → handle_event → State Mutations → Actions → Host Calls
//!                            ↑                                        ↓
//!                            └──────── WebResponse / Tick ────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and the request coordinator
//! - [`modes`]: Keyboard focus state
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::{AppState, Notice, NoticeLevel, Viewport};
