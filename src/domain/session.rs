//! Search session bookkeeping and in-flight guards.
//!
//! A [`SearchSession`] is created by the first submitted query and replaced wholesale by
//! every later submission. Only a successful load-more mutates it in place (page advance,
//! item append). [`RequestGuard`] enforces the one-outstanding-request rule for the
//! search/load-more operation class.

use super::movie::{KindFilter, SearchResultItem};

/// Results per upstream page. Fixed by the OMDb API.
pub const PAGE_SIZE: u32 = 10;

/// Returns whether pages beyond `page` exist.
///
/// `page` is 1-based. At exactly `page * PAGE_SIZE == total_results` there is nothing
/// left to fetch.
///
/// ```
/// use reelfinder::domain::session::has_more_pages;
///
/// assert!(has_more_pages(1, 12));
/// assert!(!has_more_pages(2, 20));
/// ```
#[must_use]
pub const fn has_more_pages(page: u32, total_results: u64) -> bool {
    (page as u64) * (PAGE_SIZE as u64) < total_results
}

/// Monotonic identifier attached to every outbound request.
///
/// Responses carry their ticket back, which lets the coordinator discard answers that no
/// longer match what the UI is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues strictly increasing tickets.
#[derive(Debug, Clone, Default)]
pub struct TicketCounter {
    last: u64,
}

impl TicketCounter {
    /// Returns a ticket never handed out before by this counter.
    pub fn issue(&mut self) -> Ticket {
        self.last += 1;
        Ticket(self.last)
    }
}

/// In-flight state for one operation class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestGuard {
    #[default]
    Idle,
    Pending {
        ticket: Ticket,
        /// `true` for a page-1 search, `false` for a load-more.
        fresh: bool,
    },
}

impl RequestGuard {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Returns the pending request's freshness flag if `ticket` is the one outstanding.
    #[must_use]
    pub fn awaiting(&self, ticket: Ticket) -> Option<bool> {
        match *self {
            Self::Pending { ticket: pending, fresh } if pending == ticket => Some(fresh),
            _ => None,
        }
    }
}

/// The current query and everything accumulated for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    pub query: String,
    pub kind_filter: KindFilter,
    /// 1-based page of the most recently requested page.
    pub page: u32,
    /// Arrival order; overlapping pages are not deduplicated.
    pub items: Vec<SearchResultItem>,
    pub has_more: bool,
    pub total_results: u64,
}

impl SearchSession {
    /// Starts a session at page 1 with nothing accumulated yet.
    #[must_use]
    pub fn start(query: String, kind_filter: KindFilter) -> Self {
        Self {
            query,
            kind_filter,
            page: 1,
            items: Vec::new(),
            has_more: false,
            total_results: 0,
        }
    }

    /// Replaces the accumulated items with a first page.
    pub fn replace(&mut self, items: Vec<SearchResultItem>, total_results: u64) {
        self.items = items;
        self.total_results = total_results;
        self.has_more = has_more_pages(self.page, total_results);
    }

    /// Appends a later page. `self.page` must already point at that page.
    pub fn append(&mut self, items: Vec<SearchResultItem>, total_results: u64) {
        self.items.extend(items);
        self.total_results = total_results;
        self.has_more = has_more_pages(self.page, total_results);
    }
}
