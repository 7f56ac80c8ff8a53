//! Generic page-buffering cursor
//!
//! A [`Cursor`] pulls one page at a time from a [`PageSource`] and hands out
//! decoded items one by one, in server order.

use super::types::{CursorState, CursorStats, Page, PageSource};
use crate::error::{Error, Result};
use futures::Stream;
use std::collections::VecDeque;
use tracing::debug;

/// Lazy, forward-only, non-restartable sequence over a paginated listing.
///
/// `next` takes `&mut self`; sharing a cursor between tasks needs external
/// locking.
pub struct Cursor<S: PageSource> {
    source: S,
    page_size: u32,
    buffer: VecDeque<S::Item>,
    state: CursorState,
    stats: CursorStats,
}

impl<S: PageSource> Cursor<S> {
    /// Create a cursor using the provider's default page size
    pub fn new(source: S) -> Self {
        Self::with_page_size(source, 0)
    }

    /// Create a cursor with a requested page size.
    ///
    /// Out of range sizes are clamped by the source's limits.
    pub fn with_page_size(source: S, page_size: u32) -> Self {
        let page_size = source.limits().clamp(page_size);
        Self {
            source,
            page_size,
            buffer: VecDeque::new(),
            state: CursorState::Start,
            stats: CursorStats::new(),
        }
    }

    /// Effective page size sent with every fetch
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// The underlying page source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Counters for this cursor
    pub fn stats(&self) -> CursorStats {
        self.stats
    }

    /// Number of decoded items waiting in the buffer
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Check if every item has been served
    pub fn is_done(&self) -> bool {
        self.state.is_done() && self.buffer.is_empty()
    }

    /// Pull the next item. `Ok(None)` marks the end of the sequence and is
    /// returned again on every later call.
    ///
    /// On error the failed page is discarded and the continuation token is
    /// left untouched, so calling `next` again re-requests the same page.
    pub async fn next(&mut self) -> Result<Option<S::Item>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                self.stats.add_served();
                return Ok(Some(item));
            }

            let Some(token) = self.state.token() else {
                return Ok(None);
            };
            let token = token.to_owned();
            self.fill(&token).await?;
        }
    }

    /// Drain the remaining items into a vector
    pub async fn collect_all(mut self) -> Result<Vec<S::Item>> {
        let mut items = Vec::with_capacity(self.buffer.len());
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Turn the cursor into a [`Stream`] of items
    pub fn into_stream(self) -> impl Stream<Item = Result<S::Item>> {
        futures::stream::try_unfold(self, |mut cursor| async move {
            Ok(cursor.next().await?.map(|item| (item, cursor)))
        })
    }

    async fn fill(&mut self, token: &str) -> Result<()> {
        let Page {
            items,
            next_page_token,
        } = self.source.fetch(self.page_size, token).await?;

        if !token.is_empty() && next_page_token == token {
            return Err(Error::decode(format!(
                "page token did not advance past '{token}'"
            )));
        }

        let fetched = items.len();
        let source = &self.source;
        let decoded = items
            .into_iter()
            .map(|raw| source.decode(raw))
            .collect::<Result<Vec<_>>>()?;

        let before = self.buffer.len();
        self.buffer
            .extend(decoded.into_iter().filter(|item| source.retain(item)));
        let kept = self.buffer.len() - before;

        self.stats.add_page();
        self.stats.add_filtered(fetched - kept);

        debug!(
            page = self.stats.pages_fetched,
            fetched,
            kept,
            more = !next_page_token.is_empty(),
            "fetched page"
        );

        self.state = if next_page_token.is_empty() {
            CursorState::Done
        } else {
            CursorState::More(next_page_token)
        };

        Ok(())
    }
}

impl<S> std::fmt::Debug for Cursor<S>
where
    S: PageSource + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("source", &self.source)
            .field("page_size", &self.page_size)
            .field("buffered", &self.buffer.len())
            .field("state", &self.state)
            .field("stats", &self.stats)
            .finish()
    }
}
