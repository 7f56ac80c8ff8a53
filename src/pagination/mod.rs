//! Pagination module
//!
//! Turns any token-paginated listing into a lazily advancing sequence.
//!
//! # Overview
//!
//! A [`PageSource`] knows how to fetch one page for its scope and how to
//! decode the raw entries. [`Cursor`] owns everything else: buffering, token
//! bookkeeping, client-side filtering and the terminal state. Datasets and
//! tables share the same cursor and differ only in their source.

mod cursor;
mod types;

pub use cursor::Cursor;
pub use types::{CursorState, CursorStats, Page, PageSizeLimits, PageSource};
