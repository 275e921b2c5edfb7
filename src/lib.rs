//! Reelfinder: a Zellij plugin for searching movies and series on OMDb.
//!
//! Reelfinder provides:
//! - Title search with a kind filter (movies, series, episodes)
//! - A paginated card grid with an explicit load-more tile
//! - A detail overlay with the full plot, credits and ratings
//! - Stale-response protection for every request the host runs on its behalf

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Coordinator
//! │  - Event handling and request guards                │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Widgets       │   │ OMDb Client   │
//! │ (ui/)         │   │ (widgets/)    │   │ (omdb/)       │
//! │ - Rendering   │   │ - Search form │   │ - URLs        │
//! │ - Theming     │   │ - Result grid │   │ - Contexts    │
//! │ - Layout      │   │ - Overlay     │   │ - Decoding    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Movies, sessions, tickets (domain/)              │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing into a JSONL span journal  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/reelfinder.wasm" {
//!         api_key "your-omdb-key"
//!         search_type "movie"
//!         theme "catppuccin-latte"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use reelfinder::{handle_event, initialize, Action, Config, Event};
//!
//! let mut map = BTreeMap::new();
//! map.insert("api_key".to_string(), "demo".to_string());
//! let mut state = initialize(&Config::from_zellij(&map));
//!
//! for c in "heat".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(actions.iter().any(|a| matches!(a, Action::WebRequest(_))));
//! # Ok::<(), reelfinder::ReelfinderError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator with 24-bit color

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod omdb;
pub mod widgets;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, NoticeLevel};
pub use domain::{KindFilter, ReelfinderError, Result};
pub use ui::Theme;

use omdb::{OmdbClient, DEFAULT_BASE_URL};
use std::collections::BTreeMap;
use widgets::SearchForm;

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// OMDb API key. Searches report a configuration error while it is blank.
    pub api_key: String,

    /// OMDb endpoint. Default: `https://www.omdbapi.com/`
    pub base_url: String,

    /// Initial kind filter (`movie`, `series`, `episode`, anything else means all).
    pub search_type: KindFilter,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` means the host home directory.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for the span journal. Default: `"info"`
    pub trace_level: Option<String>,

    /// How long notices stay up, in seconds. Default: 4
    pub notice_seconds: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            search_type: KindFilter::All,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            notice_seconds: app::state::DEFAULT_NOTICE_SECONDS,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Blank values count as unset. An unparsable or non-positive `notice_seconds`
    /// falls back to the default.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use reelfinder::{Config, KindFilter};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "abc123".to_string());
    /// map.insert("search_type".to_string(), "series".to_string());
    /// map.insert("notice_seconds".to_string(), "2.5".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_key, "abc123");
    /// assert_eq!(config.search_type, KindFilter::Series);
    /// assert!((config.notice_seconds - 2.5).abs() < f64::EPSILON);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let defaults = Self::default();

        Self {
            api_key: get("api_key").unwrap_or_default(),
            base_url: get("base_url").unwrap_or(defaults.base_url),
            search_type: get("search_type")
                .map_or(KindFilter::All, |raw| KindFilter::from_config(&raw)),
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level"),
            notice_seconds: get("notice_seconds")
                .and_then(|raw| raw.parse::<f64>().ok())
                .filter(|secs| secs.is_finite() && *secs > 0.0)
                .unwrap_or(defaults.notice_seconds),
        }
    }
}

/// Builds the initial application state from configuration.
///
/// Configuration problems (missing key, unreadable theme) never abort loading; they
/// surface as notices and the affected part falls back or stays disabled.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing reelfinder plugin");

    let mut problems = Vec::new();
    let theme = match (&config.theme_file, &config.theme_name) {
        (Some(file), _) => Theme::from_file(infrastructure::expand_tilde(file)).unwrap_or_else(|e| {
            tracing::warn!(theme_file = %file, error = %e, "theme file unusable, using default");
            problems.push(e.to_string());
            Theme::default()
        }),
        (None, Some(name)) => Theme::from_name(name).unwrap_or_else(|| {
            tracing::debug!(theme_name = %name, "unknown theme, using default");
            Theme::default()
        }),
        (None, None) => Theme::default(),
    };

    let client = OmdbClient::new(&config.api_key, &config.base_url);
    if let Err(e) = &client {
        tracing::warn!(error = %e, "OMDb client unavailable");
        problems.push(e.to_string());
    }

    let mut state = AppState::new(client, theme);
    state.search_form = SearchForm::new(config.search_type);
    state.notice_seconds = config.notice_seconds;
    if !problems.is_empty() {
        state.post_notice(NoticeLevel::Error, problems.join("; "));
    }
    state
}
