//! OMDb metadata client.
//!
//! Two operations, each split into a request half and a decode half because the Zellij
//! host executes HTTP asynchronously and reports back through an event:
//!
//! - search by title with pagination: [`OmdbClient::search_request`] then
//!   [`response::parse_search`]
//! - fetch by IMDb id: [`OmdbClient::detail_request`] then [`response::parse_detail`]
//!
//! # Modules
//!
//! - [`client`]: URL construction
//! - [`request`]: Request descriptions and the context echoed back by the host
//! - [`response`]: Envelope checks and payload decoding

pub mod client;
pub mod request;
pub mod response;

pub use client::{OmdbClient, DEFAULT_BASE_URL};
pub use request::{HttpRequest, RequestContext, RequestOp};
pub use response::{parse_detail, parse_search, SearchPage};
