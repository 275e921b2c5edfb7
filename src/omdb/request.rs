//! Outbound request descriptions and their round-trip context.
//!
//! Zellij performs HTTP on the host side: the plugin calls `web_request` and later
//! receives `Event::WebRequestResult` carrying back a string map it supplied. That map is
//! the only link between a request and its response, so [`RequestContext`] encodes
//! everything the coordinator needs to route the response and judge whether it is stale.

use crate::domain::{KindFilter, Ticket};
use std::collections::BTreeMap;

const KEY_OP: &str = "op";
const KEY_TICKET: &str = "ticket";
const KEY_QUERY: &str = "query";
const KEY_KIND: &str = "kind";
const KEY_PAGE: &str = "page";
const KEY_ID: &str = "id";
const KEY_TRACE: &str = "trace_id";

const OP_SEARCH: &str = "search";
const OP_DETAIL: &str = "detail";

/// A GET request ready to hand to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Fully encoded URL, including the API key.
    pub url: String,
    pub context: RequestContext,
}

/// What a request was for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOp {
    Search {
        query: String,
        kind_filter: KindFilter,
        page: u32,
    },
    Detail {
        id: String,
    },
}

/// Routing data that travels with a request and comes back with its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub ticket: Ticket,
    pub op: RequestOp,
    /// Trace id of the span that issued the request, if tracing is active.
    pub trace_id: Option<String>,
}

impl RequestContext {
    /// Builds a context, capturing the active trace id.
    #[must_use]
    pub fn new(ticket: Ticket, op: RequestOp) -> Self {
        Self {
            ticket,
            op,
            trace_id: current_trace_id(),
        }
    }

    /// Flattens the context into the string map Zellij echoes back.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(KEY_TICKET.to_string(), self.ticket.0.to_string());
        match &self.op {
            RequestOp::Search { query, kind_filter, page } => {
                map.insert(KEY_OP.to_string(), OP_SEARCH.to_string());
                map.insert(KEY_QUERY.to_string(), query.clone());
                map.insert(KEY_PAGE.to_string(), page.to_string());
                if let Some(kind) = kind_filter.query_value() {
                    map.insert(KEY_KIND.to_string(), kind.to_string());
                }
            }
            RequestOp::Detail { id } => {
                map.insert(KEY_OP.to_string(), OP_DETAIL.to_string());
                map.insert(KEY_ID.to_string(), id.clone());
            }
        }
        if let Some(trace_id) = &self.trace_id {
            map.insert(KEY_TRACE.to_string(), trace_id.clone());
        }
        map
    }

    /// Rebuilds a context from an echoed map.
    ///
    /// Returns `None` for maps this plugin did not produce (missing or malformed keys),
    /// which the shim drops.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        let ticket = Ticket(map.get(KEY_TICKET)?.parse().ok()?);
        let op = match map.get(KEY_OP)?.as_str() {
            OP_SEARCH => RequestOp::Search {
                query: map.get(KEY_QUERY)?.clone(),
                kind_filter: map
                    .get(KEY_KIND)
                    .map_or(KindFilter::All, |k| KindFilter::from_config(k)),
                page: map.get(KEY_PAGE)?.parse().ok().filter(|p| *p >= 1)?,
            },
            OP_DETAIL => RequestOp::Detail {
                id: map.get(KEY_ID)?.clone(),
            },
            _ => return None,
        };
        Some(Self {
            ticket,
            op,
            trace_id: map.get(KEY_TRACE).cloned(),
        })
    }
}

/// Returns the OpenTelemetry trace id of the current span, if it has a valid one.
fn current_trace_id() -> Option<String> {
    use opentelemetry::trace::TraceContextExt;
    use tracing_opentelemetry::OpenTelemetrySpanExt;

    let otel_context = tracing::Span::current().context();
    let span_ref = otel_context.span();
    let span_context = span_ref.span_context();

    span_context
        .is_valid()
        .then(|| format!("{:032x}", span_context.trace_id()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_context_survives_the_host_round_trip() {
        let ctx = RequestContext {
            ticket: Ticket(7),
            op: RequestOp::Search {
                query: "the matrix".into(),
                kind_filter: KindFilter::Series,
                page: 3,
            },
            trace_id: Some("abc".into()),
        };
        assert_eq!(RequestContext::from_map(&ctx.to_map()), Some(ctx));
    }

    #[test]
    fn unrestricted_search_omits_kind() {
        let ctx = RequestContext {
            ticket: Ticket(1),
            op: RequestOp::Search { query: "x".into(), kind_filter: KindFilter::All, page: 1 },
            trace_id: None,
        };
        let map = ctx.to_map();
        assert!(!map.contains_key(KEY_KIND));
        assert_eq!(RequestContext::from_map(&map), Some(ctx));
    }

    #[test]
    fn foreign_maps_are_rejected() {
        let mut map = BTreeMap::new();
        assert!(RequestContext::from_map(&map).is_none());

        map.insert("ticket".to_string(), "2".to_string());
        map.insert("op".to_string(), "upload".to_string());
        assert!(RequestContext::from_map(&map).is_none());

        map.insert("op".to_string(), "search".to_string());
        map.insert("query".to_string(), "q".to_string());
        map.insert("page".to_string(), "0".to_string());
        assert!(RequestContext::from_map(&map).is_none());
    }
}
