//! Pagination types and traits
//!
//! Defines the core pagination abstractions shared by every resource kind.

use crate::error::Result;
use async_trait::async_trait;

/// One page of raw items as returned by a list call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in server order
    pub items: Vec<T>,
    /// Continuation token; empty when there are no more pages
    pub next_page_token: String,
}

impl<T> Page<T> {
    /// Create a page with a continuation token
    pub fn new(items: Vec<T>, next_page_token: impl Into<String>) -> Self {
        Self {
            items,
            next_page_token: next_page_token.into(),
        }
    }

    /// Create the final page of a listing
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, String::new())
    }

    /// Check whether another page follows this one
    pub fn has_more(&self) -> bool {
        !self.next_page_token.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::last(Vec::new())
    }
}

/// Provider page size bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizeLimits {
    /// Size used when the caller asks for 0
    pub default: u32,
    /// Largest size the provider accepts
    pub max: u32,
}

impl PageSizeLimits {
    /// Create page size limits
    pub const fn new(default: u32, max: u32) -> Self {
        Self { default, max }
    }

    /// Map a requested size into the accepted range. Never fails.
    pub fn clamp(&self, requested: u32) -> u32 {
        match requested {
            0 => self.default,
            n if n > self.max => self.max,
            n => n,
        }
    }
}

impl Default for PageSizeLimits {
    fn default() -> Self {
        // dataset and table listings both cap maxResults at 1000
        Self::new(50, 1000)
    }
}

/// Counters tracked while a cursor runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorStats {
    /// Number of successful page fetches
    pub pages_fetched: u32,
    /// Number of items handed to the caller
    pub items_served: u64,
    /// Number of decoded items dropped by the client-side filter
    pub items_filtered: u64,
}

impl CursorStats {
    /// Create empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one fetched page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Record items dropped by the filter
    pub fn add_filtered(&mut self, count: usize) {
        self.items_filtered += count as u64;
    }

    /// Record one served item
    pub fn add_served(&mut self) {
        self.items_served += 1;
    }
}

/// Where the cursor is in its listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CursorState {
    /// Nothing fetched yet
    #[default]
    Start,
    /// More pages remain behind this token
    More(String),
    /// The last page has been fetched
    Done,
}

impl CursorState {
    /// Token to send with the next fetch, or `None` once done
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Start => Some(""),
            Self::More(token) => Some(token),
            Self::Done => None,
        }
    }

    /// Check if the listing is exhausted
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Fetch-and-decode capability for one resource kind.
///
/// The cursor owns buffering and token handling; implementors only know how
/// to get a page for their scope and how to turn raw entries into items.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Entry type as delivered by the collaborator
    type Raw: Send;
    /// Decoded item handed to the caller
    type Item: Send;

    /// Fetch one page. `page_size` has already been clamped by [`Self::limits`].
    async fn fetch(&self, page_size: u32, page_token: &str) -> Result<Page<Self::Raw>>;

    /// Decode one raw entry
    fn decode(&self, raw: Self::Raw) -> Result<Self::Item>;

    /// Client-side filter applied after decoding
    fn retain(&self, _item: &Self::Item) -> bool {
        true
    }

    /// Page size bounds of the provider
    fn limits(&self) -> PageSizeLimits {
        PageSizeLimits::default()
    }
}
