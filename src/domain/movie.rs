//! Movie domain model.
//!
//! These are the cleaned-up shapes the rest of the plugin works with. Wire-level OMDb
//! quirks (capitalized keys, the `"N/A"` placeholder) are stripped in [`crate::omdb`]
//! before values reach this module.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of title reported by the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    Movie,
    Series,
    Episode,
    /// Anything the API may add later (e.g. `"game"`), kept verbatim.
    Other(String),
}

impl MediaKind {
    /// Parses the upstream `Type` field. Matching is case-insensitive.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "movie" => Self::Movie,
            "series" => Self::Series,
            "episode" => Self::Episode,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    /// Value used for the `type` query parameter and for display.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Episode => "episode",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional restriction applied to searches.
///
/// Cycled from the search form with `Ctrl+t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Movie,
    Series,
    Episode,
}

impl KindFilter {
    /// Returns the next filter in display order, wrapping back to `All`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Movie,
            Self::Movie => Self::Series,
            Self::Series => Self::Episode,
            Self::Episode => Self::All,
        }
    }

    /// Value for the `type` query parameter, `None` when unrestricted.
    #[must_use]
    pub const fn query_value(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Movie => Some("movie"),
            Self::Series => Some("series"),
            Self::Episode => Some("episode"),
        }
    }

    /// Short label shown next to the search input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Movie => "movies",
            Self::Series => "series",
            Self::Episode => "episodes",
        }
    }

    /// Parses a configured `search_type`. Unknown values fall back to `All`.
    #[must_use]
    pub fn from_config(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "movie" | "movies" => Self::Movie,
            "series" => Self::Series,
            "episode" | "episodes" => Self::Episode,
            _ => Self::All,
        }
    }
}

/// One card in the result grid.
///
/// Identity is `id` (an IMDb id such as `tt1375666`). Items are never mutated after
/// they arrive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub id: String,
    pub title: String,
    pub year: String,
    /// Poster URL, `None` when the API has no artwork.
    pub poster: Option<String>,
    pub kind: MediaKind,
}

/// A `(source, value)` pair such as `("Rotten Tomatoes", "87%")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

/// Full record shown in the detail overlay.
///
/// Fetched fresh every time the overlay opens; nothing is cached between views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster: Option<String>,
    pub kind: MediaKind,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub ratings: Vec<Rating>,
    pub imdb_rating: Option<String>,
    pub imdb_votes: Option<String>,
}

impl MovieDetail {
    /// Labelled credit rows in display order, skipping absent values.
    #[must_use]
    pub fn credits(&self) -> Vec<(&'static str, &str)> {
        [
            ("Genre", self.genre.as_deref()),
            ("Director", self.director.as_deref()),
            ("Writer", self.writer.as_deref()),
            ("Actors", self.actors.as_deref()),
            ("Language", self.language.as_deref()),
            ("Country", self.country.as_deref()),
            ("Awards", self.awards.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .collect()
    }

    /// Short facts line: year, rating, runtime and kind.
    #[must_use]
    pub fn meta_line(&self) -> String {
        let mut parts: Vec<&str> = vec![self.year.as_str()];
        parts.extend(self.rated.as_deref());
        parts.extend(self.runtime.as_deref());
        parts.push(self.kind.as_str());
        parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("  ·  ")
    }
}
