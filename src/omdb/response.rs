//! OMDb payload decoding.
//!
//! OMDb wraps every answer in the same envelope: a `"Response"` discriminator that is
//! `"True"` or `"False"`, plus an `"Error"` string on failure. Field names are
//! PascalCase with a few exceptions (`imdbID`, `totalResults`), and missing values are
//! spelled `"N/A"`.

use crate::domain::{
    has_more_pages, MediaKind, MovieDetail, Rating, ReelfinderError, Result, SearchResultItem,
};
use serde::Deserialize;

/// One decoded page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    pub items: Vec<SearchResultItem>,
    pub total_results: u64,
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireSearch {
    #[serde(rename = "Search", default)]
    search: Vec<WireItem>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Type", default)]
    kind: String,
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireDetail {
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    year: String,
    #[serde(rename = "Type", default)]
    kind: String,
    poster: Option<String>,
    rated: Option<String>,
    released: Option<String>,
    runtime: Option<String>,
    genre: Option<String>,
    director: Option<String>,
    writer: Option<String>,
    actors: Option<String>,
    plot: Option<String>,
    language: Option<String>,
    country: Option<String>,
    awards: Option<String>,
    #[serde(default)]
    ratings: Vec<WireRating>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    imdb_votes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireRating {
    source: String,
    value: String,
}

/// Maps OMDb's `"N/A"` placeholder and blank strings to `None`.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "N/A")
}

/// Rejects transport-level failures and negative envelopes.
///
/// `fallback` is the message used when a negative envelope has no `Error` string.
fn check_envelope(status: u16, body: &[u8], fallback: &str) -> Result<()> {
    if status == 0 {
        return Err(ReelfinderError::Transport(
            "request did not complete".to_string(),
        ));
    }
    if !(200..300).contains(&status) {
        return Err(ReelfinderError::Transport(format!("HTTP {status}")));
    }

    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|e| ReelfinderError::Transport(format!("invalid response body: {e}")))?;

    if envelope.response.eq_ignore_ascii_case("true") {
        Ok(())
    } else {
        let message = present(envelope.error).unwrap_or_else(|| fallback.to_string());
        Err(ReelfinderError::NotFound(message))
    }
}

/// Decodes a search response for `page`.
///
/// # Errors
///
/// - [`ReelfinderError::Transport`] for incomplete requests, non-2xx statuses, bodies
///   that are not JSON or a `totalResults` that is not a number.
/// - [`ReelfinderError::NotFound`] when OMDb answers `"Response": "False"`, carrying
///   its `Error` text (or `"Search failed"`).
pub fn parse_search(status: u16, body: &[u8], page: u32) -> Result<SearchPage> {
    check_envelope(status, body, "Search failed")?;

    let wire: WireSearch = serde_json::from_slice(body)
        .map_err(|e| ReelfinderError::Transport(format!("invalid search payload: {e}")))?;

    let total_results = match wire.total_results.as_deref().map(str::trim) {
        Some(raw) => raw.parse::<u64>().map_err(|_| {
            ReelfinderError::Transport(format!("malformed totalResults {raw:?}"))
        })?,
        None => wire.search.len() as u64,
    };

    let items = wire
        .search
        .into_iter()
        .map(|item| SearchResultItem {
            id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster: present(item.poster),
            kind: MediaKind::parse(&item.kind),
        })
        .collect();

    Ok(SearchPage {
        items,
        total_results,
        has_more: has_more_pages(page, total_results),
    })
}

/// Decodes a full-plot detail response.
///
/// # Errors
///
/// - [`ReelfinderError::Transport`] as for [`parse_search`], and when the record has no
///   `imdbID`.
/// - [`ReelfinderError::NotFound`] when OMDb answers `"Response": "False"`, carrying its
///   `Error` text (or `"Movie not found"`).
pub fn parse_detail(status: u16, body: &[u8]) -> Result<MovieDetail> {
    check_envelope(status, body, "Movie not found")?;

    let wire: WireDetail = serde_json::from_slice(body)
        .map_err(|e| ReelfinderError::Transport(format!("invalid detail payload: {e}")))?;

    if wire.imdb_id.trim().is_empty() {
        return Err(ReelfinderError::Transport(
            "detail payload has no imdbID".to_string(),
        ));
    }

    Ok(MovieDetail {
        id: wire.imdb_id,
        title: wire.title,
        year: wire.year,
        poster: present(wire.poster),
        kind: MediaKind::parse(&wire.kind),
        rated: present(wire.rated),
        released: present(wire.released),
        runtime: present(wire.runtime),
        genre: present(wire.genre),
        director: present(wire.director),
        writer: present(wire.writer),
        actors: present(wire.actors),
        plot: present(wire.plot),
        language: present(wire.language),
        country: present(wire.country),
        awards: present(wire.awards),
        ratings: wire
            .ratings
            .into_iter()
            .map(|r| Rating { source: r.source, value: r.value })
            .collect(),
        imdb_rating: present(wire.imdb_rating),
        imdb_votes: present(wire.imdb_votes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_OK: &str = r#"{
        "Search": [
            {"Title": "Inception", "Year": "2010", "imdbID": "tt1375666", "Type": "movie",
             "Poster": "https://m.media-amazon.com/images/inception.jpg"},
            {"Title": "Inception: The Cobol Job", "Year": "2010", "imdbID": "tt5295894",
             "Type": "movie", "Poster": "N/A"}
        ],
        "totalResults": "12",
        "Response": "True"
    }"#;

    const DETAIL_OK: &str = r#"{
        "Title": "Inception", "Year": "2010", "Rated": "PG-13", "Released": "16 Jul 2010",
        "Runtime": "148 min", "Genre": "Action, Adventure, Sci-Fi",
        "Director": "Christopher Nolan", "Writer": "Christopher Nolan",
        "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page",
        "Plot": "A thief who steals corporate secrets...", "Language": "English, Japanese, French",
        "Country": "United States, United Kingdom", "Awards": "N/A",
        "Poster": "N/A",
        "Ratings": [{"Source": "Internet Movie Database", "Value": "8.8/10"},
                    {"Source": "Rotten Tomatoes", "Value": "87%"}],
        "imdbRating": "8.8", "imdbVotes": "2,600,000", "imdbID": "tt1375666",
        "Type": "movie", "Response": "True"
    }"#;

    #[test]
    fn search_page_is_decoded() {
        let page = parse_search(200, SEARCH_OK.as_bytes(), 1).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_results, 12);
        assert!(page.has_more);
        assert_eq!(page.items[0].id, "tt1375666");
        assert!(page.items[0].poster.is_some());
        assert_eq!(page.items[1].poster, None);
        assert_eq!(page.items[1].kind, MediaKind::Movie);
    }

    #[test]
    fn second_page_of_twelve_has_no_more() {
        let page = parse_search(200, SEARCH_OK.as_bytes(), 2).unwrap();
        assert!(!page.has_more);
    }

    #[test]
    fn negative_search_keeps_upstream_message() {
        let body = br#"{"Response":"False","Error":"Movie not found!"}"#;
        let err = parse_search(200, body, 1).unwrap_err();
        assert!(matches!(err, ReelfinderError::NotFound(ref m) if m == "Movie not found!"));
    }

    #[test]
    fn negative_search_without_message_uses_fallback() {
        let err = parse_search(200, br#"{"Response":"False"}"#, 1).unwrap_err();
        assert_eq!(err.to_string(), "Search failed");
    }

    #[test]
    fn transport_failures_are_classified() {
        assert!(matches!(
            parse_search(0, b"", 1),
            Err(ReelfinderError::Transport(_))
        ));
        assert!(matches!(
            parse_search(503, b"<html>", 1),
            Err(ReelfinderError::Transport(ref m)) if m == "HTTP 503"
        ));
        assert!(matches!(
            parse_search(200, b"not json", 1),
            Err(ReelfinderError::Transport(_))
        ));
        let bad_total = br#"{"Response":"True","Search":[],"totalResults":"lots"}"#;
        assert!(matches!(
            parse_search(200, bad_total, 1),
            Err(ReelfinderError::Transport(_))
        ));
    }

    #[test]
    fn detail_is_decoded_with_placeholders_dropped() {
        let detail = parse_detail(200, DETAIL_OK.as_bytes()).unwrap();
        assert_eq!(detail.id, "tt1375666");
        assert_eq!(detail.runtime.as_deref(), Some("148 min"));
        assert_eq!(detail.awards, None);
        assert_eq!(detail.poster, None);
        assert_eq!(detail.ratings.len(), 2);
        assert_eq!(detail.ratings[1].value, "87%");
        assert_eq!(detail.imdb_votes.as_deref(), Some("2,600,000"));
    }

    #[test]
    fn negative_detail_is_not_found() {
        let body = br#"{"Response":"False","Error":"Incorrect IMDb ID."}"#;
        let err = parse_detail(200, body).unwrap_err();
        assert!(matches!(err, ReelfinderError::NotFound(ref m) if m == "Incorrect IMDb ID."));

        let err = parse_detail(200, br#"{"Response":"False"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Movie not found");
    }
}
