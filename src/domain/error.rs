//! Error types for the Reelfinder plugin.
//!
//! This module defines the centralized error type [`ReelfinderError`] and a type alias
//! [`Result`] used throughout the plugin. Every failure is caught at the coordinator
//! boundary and turned into a user-visible notice, so none of these ever reach the
//! Zellij runtime.

use thiserror::Error;

/// The main error type for Reelfinder operations.
///
/// # Examples
///
/// ```
/// use reelfinder::ReelfinderError;
///
/// let err = ReelfinderError::NotFound("Movie not found!".to_string());
/// assert_eq!(err.to_string(), "Movie not found!");
/// ```
#[derive(Debug, Error)]
pub enum ReelfinderError {
    /// The request never produced a usable upstream answer.
    ///
    /// Covers unreachable hosts, non-success HTTP statuses and payloads that are not
    /// valid JSON or that carry malformed counters.
    #[error("Network error: {0}")]
    Transport(String),

    /// The upstream answered well-formed but negative.
    ///
    /// OMDb reports this with `"Response": "False"` and an `Error` string such as
    /// `"Movie not found!"` or `"Too many results."`. The message is kept verbatim.
    #[error("{0}")]
    NotFound(String),

    /// Input was rejected before any request was made (e.g. an empty query).
    #[error("{0}")]
    Validation(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for Reelfinder operations.
pub type Result<T> = std::result::Result<T, ReelfinderError>;
