//! Uniform paginated results.

use serde::{Deserialize, Serialize};

use crate::page::{pages_found, Window};

/// Outcome of executing a specification.
///
/// `total_matched` counts every entity that satisfied the filter, ignoring
/// the window. `page_size` and `current_page` are `0` for unwindowed
/// results, meaning "everything on one page".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEnvelope<T> {
    items: Vec<T>,
    total_matched: usize,
    page_size: usize,
    current_page: usize,
}

impl<T> ResultEnvelope<T> {
    /// Assembles an envelope from raw parts.
    pub fn new(items: Vec<T>, total_matched: usize, page_size: usize, current_page: usize) -> Self {
        ResultEnvelope {
            items,
            total_matched,
            page_size,
            current_page,
        }
    }

    /// Every matched item, no window applied.
    pub fn unwindowed(items: Vec<T>) -> Self {
        let total_matched = items.len();
        Self::new(items, total_matched, 0, 0)
    }

    /// One window's worth of items out of `total_matched`.
    ///
    /// Page size and current page are taken from the window.
    pub fn windowed(items: Vec<T>, total_matched: usize, window: Window) -> Self {
        Self::new(items, total_matched, window.limit(), window.page_number())
    }

    /// Builds the envelope matching an optional window.
    pub fn for_window(items: Vec<T>, total_matched: usize, window: Option<Window>) -> Self {
        match window {
            Some(window) => Self::windowed(items, total_matched, window),
            None => Self::new(items, total_matched, 0, 0),
        }
    }

    /// Returned items, in result order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the envelope, returning its items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Number of entities that satisfied the filter.
    pub fn total_matched(&self) -> usize {
        self.total_matched
    }

    /// Items per page; `0` when unwindowed.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// One-based page number; `0` when unwindowed. Never clamped.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Number of pages the matched entities span.
    pub fn pages_found(&self) -> usize {
        pages_found(self.total_matched, self.page_size)
    }

    /// Returns `true` if no page follows this one.
    ///
    /// Unwindowed results are always the last page.
    pub fn is_last_page(&self) -> bool {
        self.page_size == 0 || self.current_page >= self.pages_found()
    }

    /// Returns `true` if no items were returned.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Converts every item, keeping the paging numbers.
    pub fn map<U, F>(self, f: F) -> ResultEnvelope<U>
    where
        F: FnMut(T) -> U,
    {
        ResultEnvelope {
            items: self.items.into_iter().map(f).collect(),
            total_matched: self.total_matched,
            page_size: self.page_size,
            current_page: self.current_page,
        }
    }
}
