//! Sort directives and sort order.
//!
//! A [`SortOrder`] is an ordered list of [`SortDirective`]s: the first is the
//! primary key, each later one breaks ties left by the ones before it.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::path::{AttributePath, IntoAttributePath};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Direction {
    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Direction::Desc)
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One sort key: a path and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortDirective {
    path: AttributePath,
    direction: Direction,
}

impl SortDirective {
    /// Creates an ascending directive.
    pub fn asc(path: impl IntoAttributePath) -> Result<Self> {
        Self::new(path, Direction::Asc)
    }

    /// Creates a descending directive.
    pub fn desc(path: impl IntoAttributePath) -> Result<Self> {
        Self::new(path, Direction::Desc)
    }

    /// Creates a directive with the given direction.
    pub fn new(path: impl IntoAttributePath, direction: Direction) -> Result<Self> {
        Ok(SortDirective {
            path: path.into_attribute_path()?,
            direction,
        })
    }

    /// The sort key.
    pub fn path(&self) -> &AttributePath {
        &self.path
    }

    /// The direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` for descending directives.
    pub fn is_descending(&self) -> bool {
        self.direction.is_desc()
    }
}

impl std::fmt::Display for SortDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.path, self.direction)
    }
}

/// Ordered list of sort directives, primary key first.
///
/// Directives are kept exactly as appended; a path listed twice yields two
/// directives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortOrder {
    directives: Vec<SortDirective>,
}

impl SortOrder {
    /// Creates an empty sort order.
    pub fn new() -> Self {
        SortOrder::default()
    }

    /// Appends a directive as the lowest-priority key.
    pub fn push(&mut self, directive: SortDirective) {
        self.directives.push(directive);
    }

    /// Returns the directives, primary key first.
    pub fn directives(&self) -> &[SortDirective] {
        &self.directives
    }

    /// Iterates the directives, primary key first.
    pub fn iter(&self) -> std::slice::Iter<'_, SortDirective> {
        self.directives.iter()
    }

    /// Number of directives.
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Returns `true` if there are no directives.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

impl FromIterator<SortDirective> for SortOrder {
    fn from_iter<I: IntoIterator<Item = SortDirective>>(iter: I) -> Self {
        SortOrder {
            directives: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SortOrder {
    type Item = &'a SortDirective;
    type IntoIter = std::slice::Iter<'a, SortDirective>;

    fn into_iter(self) -> Self::IntoIter {
        self.directives.iter()
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.directives.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    #[test]
    fn direction_apply() {
        assert_eq!(Direction::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Direction::Asc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(Direction::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Direction::Desc.apply(Ordering::Greater), Ordering::Less);
        assert_eq!(Direction::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn directive_constructors() {
        let asc = SortDirective::asc("name").unwrap();
        assert_eq!(asc.path().to_string(), "name");
        assert_eq!(asc.direction(), Direction::Asc);
        assert!(!asc.is_descending());

        let desc = SortDirective::desc("skill.name").unwrap();
        assert!(desc.is_descending());
        assert_eq!(desc.to_string(), "skill.name DESC");

        assert!(matches!(
            SortDirective::asc("a."),
            Err(SearchError::InvalidPath { .. })
        ));
    }

    #[test]
    fn order_keeps_call_order_and_duplicates() {
        let mut order = SortOrder::new();
        order.push(SortDirective::desc("age").unwrap());
        order.push(SortDirective::asc("name").unwrap());
        order.push(SortDirective::asc("age").unwrap());

        assert_eq!(order.len(), 3);
        let keys: Vec<String> = order.iter().map(ToString::to_string).collect();
        assert_eq!(keys, ["age DESC", "name ASC", "age ASC"]);
        assert_eq!(order.to_string(), "age DESC, name ASC, age ASC");
    }
}
