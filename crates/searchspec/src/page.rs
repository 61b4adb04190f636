//! Pagination window and page arithmetic.
//!
//! All page math lives here so every backend reports identical numbers.
//! Internally a window is always a zero-based `offset` plus a positive
//! `limit`; one-based page addressing is normalized on construction:
//!
//! ```text
//! offset = (page_number - 1) * page_size
//! limit  = page_size
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// Number of pages needed for `total` items at `page_size` items per page.
///
/// A `page_size` of zero means "everything on one page": the result is `1`
/// when there is anything to show and `0` otherwise.
///
/// ```
/// use searchspec::pages_found;
///
/// assert_eq!(pages_found(4, 3), 2);
/// assert_eq!(pages_found(0, 3), 0);
/// assert_eq!(pages_found(6, 3), 2);
/// assert_eq!(pages_found(5, 0), 1);
/// ```
pub fn pages_found(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        usize::from(total > 0)
    } else {
        total.div_ceil(page_size)
    }
}

/// Slice of matched, ordered items to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct Window {
    offset: usize,
    limit: usize,
}

impl Window {
    /// Explicit zero-based offset plus a positive limit.
    pub fn new(offset: usize, limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(SearchError::InvalidArgument(
                "limit must be a positive number".to_string(),
            ));
        }
        Ok(Window { offset, limit })
    }

    /// The first `limit` items.
    pub fn first(limit: usize) -> Result<Self> {
        Self::new(0, limit)
    }

    /// One-based page addressing.
    pub fn page(page_number: usize, page_size: usize) -> Result<Self> {
        if page_number == 0 {
            return Err(SearchError::InvalidArgument(
                "page number must be a positive number".to_string(),
            ));
        }
        if page_size == 0 {
            return Err(SearchError::InvalidArgument(
                "page size must be a positive number".to_string(),
            ));
        }
        let offset = (page_number - 1).checked_mul(page_size).ok_or_else(|| {
            SearchError::InvalidArgument(format!(
                "page {page_number} of size {page_size} is out of range"
            ))
        })?;
        Self::new(offset, page_size)
    }

    /// Number of matched items skipped.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Maximum number of items returned.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// One-based page this window starts in, at `limit` items per page.
    ///
    /// Exact for windows built from page addressing; an offset that is not a
    /// multiple of the limit reports the page containing its first item.
    pub fn page_number(&self) -> usize {
        self.offset / self.limit + 1
    }

    /// Index range of this window within `len` matched items.
    ///
    /// Empty when the offset is at or past the end.
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = self.offset.min(len);
        let end = start.saturating_add(self.limit).min(len);
        start..end
    }
}

#[derive(Deserialize)]
struct RawWindow {
    offset: usize,
    limit: usize,
}

impl TryFrom<RawWindow> for Window {
    type Error = SearchError;

    fn try_from(raw: RawWindow) -> Result<Self> {
        Window::new(raw.offset, raw.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_found_rounds_up() {
        assert_eq!(pages_found(0, 1), 0);
        assert_eq!(pages_found(1, 1), 1);
        assert_eq!(pages_found(4, 3), 2);
        assert_eq!(pages_found(9, 3), 3);
        assert_eq!(pages_found(10, 3), 4);
        assert_eq!(pages_found(usize::MAX, 2), usize::MAX / 2 + 1);
    }

    #[test]
    fn pages_found_unwindowed() {
        assert_eq!(pages_found(0, 0), 0);
        assert_eq!(pages_found(7, 0), 1);
    }

    #[test]
    fn page_addressing_normalizes_to_offset() {
        let window = Window::page(3, 10).unwrap();
        assert_eq!(window.offset(), 20);
        assert_eq!(window.limit(), 10);
        assert_eq!(window.page_number(), 3);

        assert_eq!(Window::page(1, 5).unwrap(), Window::new(0, 5).unwrap());
        assert_eq!(Window::first(5).unwrap(), Window::new(0, 5).unwrap());
    }

    #[test]
    fn rejects_non_positive_inputs() {
        assert!(matches!(Window::new(0, 0), Err(SearchError::InvalidArgument(_))));
        assert!(matches!(Window::page(0, 5), Err(SearchError::InvalidArgument(_))));
        assert!(matches!(Window::page(1, 0), Err(SearchError::InvalidArgument(_))));
        assert!(matches!(Window::first(0), Err(SearchError::InvalidArgument(_))));
        assert!(matches!(
            Window::page(usize::MAX, 2),
            Err(SearchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn unaligned_offset_reports_containing_page() {
        assert_eq!(Window::new(5, 2).unwrap().page_number(), 3);
        assert_eq!(Window::new(0, 2).unwrap().page_number(), 1);
    }

    #[test]
    fn range_clamps_to_length() {
        let window = Window::new(2, 3).unwrap();
        assert_eq!(window.range(10), 2..5);
        assert_eq!(window.range(4), 2..4);
        assert_eq!(window.range(2), 2..2);
        assert_eq!(window.range(0), 0..0);

        let huge = Window::new(usize::MAX, usize::MAX).unwrap();
        assert_eq!(huge.range(3), 3..3);
    }
}
