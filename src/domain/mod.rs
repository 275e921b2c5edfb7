//! Domain layer for the Reelfinder plugin.
//!
//! Core types independent of Zellij APIs and of the OMDb wire format.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Search results, detail records and kind filters
//! - [`session`]: Search session, pagination rule and in-flight guards

pub mod error;
pub mod movie;
pub mod session;

pub use error::{ReelfinderError, Result};
pub use movie::{KindFilter, MediaKind, MovieDetail, Rating, SearchResultItem};
pub use session::{has_more_pages, RequestGuard, SearchSession, Ticket, TicketCounter, PAGE_SIZE};
