//! Store options.

/// Where null values go when sorting.
///
/// Placement ignores the sort direction: with `Last`, nulls trail both
/// ascending and descending results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullsOrder {
    /// Nulls after every value.
    #[default]
    Last,
    /// Nulls before every value.
    First,
}

/// Per-store behaviour of a [`MemoryStore`](crate::MemoryStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryOptions {
    nulls: NullsOrder,
}

impl MemoryOptions {
    /// Default options: nulls sort last.
    pub fn new() -> Self {
        MemoryOptions::default()
    }

    /// Sets where null values sort.
    pub fn nulls(mut self, nulls: NullsOrder) -> Self {
        self.nulls = nulls;
        self
    }

    /// Where null values sort.
    pub fn nulls_order(&self) -> NullsOrder {
        self.nulls
    }
}
