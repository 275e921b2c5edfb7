//! OMDb request builder.

use super::request::{HttpRequest, RequestContext, RequestOp};
use crate::domain::{KindFilter, ReelfinderError, Result, Ticket};
use url::Url;

/// Default public OMDb endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Builds search and detail requests against one OMDb endpoint.
///
/// The client never performs I/O itself. It produces [`HttpRequest`]s for the host to
/// execute; answers are decoded by [`super::response`]. Each request is a single
/// best-effort attempt with no retry.
#[derive(Clone)]
pub struct OmdbClient {
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for OmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmdbClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl OmdbClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ReelfinderError::Config`] if the API key is blank or the base URL does
    /// not parse.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ReelfinderError::Config(
                "api_key is not set; add it to the plugin configuration".to_string(),
            ));
        }
        let base_url = Url::parse(base_url)
            .map_err(|e| ReelfinderError::Config(format!("invalid base_url {base_url:?}: {e}")))?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url,
        })
    }

    /// Builds a title search for one page.
    #[must_use]
    pub fn search_request(
        &self,
        ticket: Ticket,
        query: &str,
        kind_filter: KindFilter,
        page: u32,
    ) -> HttpRequest {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apikey", &self.api_key);
            pairs.append_pair("s", query);
            pairs.append_pair("page", &page.to_string());
            if let Some(kind) = kind_filter.query_value() {
                pairs.append_pair("type", kind);
            }
        }

        HttpRequest {
            url: url.into(),
            context: RequestContext::new(
                ticket,
                RequestOp::Search {
                    query: query.to_string(),
                    kind_filter,
                    page,
                },
            ),
        }
    }

    /// Builds a full-plot lookup by IMDb id.
    #[must_use]
    pub fn detail_request(&self, ticket: Ticket, id: &str) -> HttpRequest {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .append_pair("i", id)
            .append_pair("plot", "full");

        HttpRequest {
            url: url.into(),
            context: RequestContext::new(ticket, RequestOp::Detail { id: id.to_string() }),
        }
    }
}
