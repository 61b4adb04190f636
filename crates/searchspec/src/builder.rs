//! Fluent construction of specifications.
//!
//! [`SpecBuilder`] is the only supported way to obtain a
//! [`Specification`]. Entry points fix the projection and window and check
//! their arguments immediately; chain methods add the filter and the sort
//! order; [`SpecBuilder::build`] hands off an immutable value.
//!
//! ```
//! use searchspec::{Condition, SortDirective, SpecBuilder};
//!
//! # fn main() -> searchspec::Result<()> {
//! let spec = SpecBuilder::select_page(1, 2)?
//!     .filter(Condition::ge("age", 50)?)
//!     .and(Condition::contains("name", "an")?)?
//!     .sort_by(SortDirective::desc("age")?)
//!     .build();
//!
//! assert_eq!(spec.window().map(|w| w.limit()), Some(2));
//! assert_eq!(spec.filter().map(|f| f.leaf_count()), Some(2));
//! # Ok(())
//! # }
//! ```

use crate::condition::Condition;
use crate::error::{Result, SearchError};
use crate::ordering::{SortDirective, SortOrder};
use crate::page::Window;
use crate::path::{AttributePath, IntoAttributePath};
use crate::spec::{dedup_paths, Specification};

/// Builder for [`Specification`].
///
/// Chain methods take the builder by value. A builder is meant for a single
/// chain on a single thread; [`build`](Self::build) can be called any number
/// of times and each call returns an independent, equal specification.
#[derive(Debug, Clone, Default)]
pub struct SpecBuilder {
    projection: Option<Vec<AttributePath>>,
    filters: Vec<Condition>,
    order: Option<SortOrder>,
    window: Option<Window>,
}

impl SpecBuilder {
    // ========================================================================
    // Entry points
    // ========================================================================

    /// Every attribute of every matching entity.
    pub fn select_all() -> Self {
        SpecBuilder::default()
    }

    /// Only the named attributes. At least one path is required; repeats
    /// are dropped.
    pub fn select_attributes<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: IntoAttributePath,
    {
        Ok(SpecBuilder {
            projection: Some(parse_projection(paths)?),
            ..SpecBuilder::default()
        })
    }

    /// The first `limit` matching entities.
    pub fn select_first(limit: usize) -> Result<Self> {
        Ok(Self::windowed(Window::first(limit)?))
    }

    /// One page of matching entities, `page_number` counting from 1.
    pub fn select_page(page_number: usize, page_size: usize) -> Result<Self> {
        Ok(Self::windowed(Window::page(page_number, page_size)?))
    }

    /// Up to `limit` matching entities after skipping `offset` of them.
    pub fn select_range(offset: usize, limit: usize) -> Result<Self> {
        Ok(Self::windowed(Window::new(offset, limit)?))
    }

    /// The named attributes of the first `limit` matching entities.
    pub fn select_first_attributes<I, P>(limit: usize, paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: IntoAttributePath,
    {
        let mut builder = Self::select_first(limit)?;
        builder.projection = Some(parse_projection(paths)?);
        Ok(builder)
    }

    /// The named attributes of one page of matching entities.
    pub fn select_attributes_from_page<I, P>(
        page_number: usize,
        page_size: usize,
        paths: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: IntoAttributePath,
    {
        let mut builder = Self::select_page(page_number, page_size)?;
        builder.projection = Some(parse_projection(paths)?);
        Ok(builder)
    }

    fn windowed(window: Window) -> Self {
        SpecBuilder {
            window: Some(window),
            ..SpecBuilder::default()
        }
    }

    // ========================================================================
    // Chain
    // ========================================================================

    /// Sets the root filter, replacing any filter set earlier in the chain.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.filters.clear();
        self.filters.push(condition);
        self
    }

    /// Adds a condition that must also hold.
    ///
    /// Fails with [`SearchError::IllegalState`] unless [`filter`](Self::filter)
    /// was called first. `filter(a).and(b)` builds the same specification as
    /// `filter(a.and(b))`.
    pub fn and(mut self, condition: Condition) -> Result<Self> {
        if self.filters.is_empty() {
            return Err(SearchError::IllegalState(
                "and() called before filter()",
            ));
        }
        self.filters.push(condition);
        Ok(self)
    }

    /// Appends a sort key after the ones already given.
    pub fn sort_by(mut self, directive: SortDirective) -> Self {
        self.order.get_or_insert_with(SortOrder::new).push(directive);
        self
    }

    /// Produces the specification. The builder is left untouched.
    pub fn build(&self) -> Specification {
        let filter = match self.filters.as_slice() {
            [] => None,
            [only] => Some(only.clone()),
            many => Some(Condition::conjoin(many.to_vec())),
        };
        Specification::from_parts(
            self.projection.clone(),
            filter,
            self.order.clone(),
            self.window,
        )
    }
}

fn parse_projection<I, P>(paths: I) -> Result<Vec<AttributePath>>
where
    I: IntoIterator<Item = P>,
    P: IntoAttributePath,
{
    let paths = paths
        .into_iter()
        .map(IntoAttributePath::into_attribute_path)
        .collect::<Result<Vec<_>>>()?;
    if paths.is_empty() {
        return Err(SearchError::InvalidArgument(
            "attribute list must not be empty".to_string(),
        ));
    }
    Ok(dedup_paths(paths))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a() -> Condition {
        Condition::ge("age", 50).unwrap()
    }

    fn b() -> Condition {
        Condition::contains("name", "an").unwrap()
    }

    #[test]
    fn and_before_filter_is_illegal() {
        let err = SpecBuilder::select_all().and(a()).unwrap_err();
        assert!(matches!(err, SearchError::IllegalState(_)));
    }

    #[test]
    fn filter_and_matches_explicit_conjunction() {
        let chained = SpecBuilder::select_all().filter(a()).and(b()).unwrap().build();
        let explicit = SpecBuilder::select_all().filter(a().and(b())).build();
        assert_eq!(chained, explicit);

        let three = SpecBuilder::select_all()
            .filter(a())
            .and(b())
            .unwrap()
            .and(Condition::is_null("nickname").unwrap())
            .unwrap()
            .build();
        let filter = three.filter().unwrap();
        assert_eq!(filter.depth(), 2);
        assert_eq!(filter.leaf_count(), 3);
    }

    #[test]
    fn filter_replaces_earlier_filter() {
        let spec = SpecBuilder::select_all()
            .filter(a())
            .and(b())
            .unwrap()
            .filter(b())
            .build();
        assert_eq!(spec.filter(), Some(&b()));
    }

    #[test]
    fn sort_by_appends_in_call_order() {
        let spec = SpecBuilder::select_all()
            .sort_by(SortDirective::desc("age").unwrap())
            .sort_by(SortDirective::asc("name").unwrap())
            .build();
        assert_eq!(spec.order().unwrap().to_string(), "age DESC, name ASC");
    }

    #[test]
    fn entry_points_validate_arguments() {
        let empty: [&str; 0] = [];
        for result in [
            SpecBuilder::select_attributes(empty),
            SpecBuilder::select_first(0),
            SpecBuilder::select_page(0, 10),
            SpecBuilder::select_page(1, 0),
            SpecBuilder::select_range(3, 0),
            SpecBuilder::select_first_attributes(5, empty),
            SpecBuilder::select_attributes_from_page(1, 0, ["name"]),
        ] {
            assert!(matches!(result, Err(SearchError::InvalidArgument(_))));
        }

        assert!(matches!(
            SpecBuilder::select_attributes(["name", "a..b"]),
            Err(SearchError::InvalidPath { .. })
        ));
    }

    #[test]
    fn page_and_range_normalize_to_the_same_window() {
        let page = SpecBuilder::select_page(3, 10).unwrap().build();
        let range = SpecBuilder::select_range(20, 10).unwrap().build();
        assert_eq!(page, range);

        let first = SpecBuilder::select_first(5).unwrap().build();
        let page_one = SpecBuilder::select_page(1, 5).unwrap().build();
        assert_eq!(first, page_one);
    }

    #[test]
    fn combined_entry_points() {
        let spec = SpecBuilder::select_attributes_from_page(2, 25, ["name", "age", "name"])
            .unwrap()
            .build();
        let names: Vec<String> = spec
            .projection()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, ["name", "age"]);
        assert_eq!(spec.window(), Some(Window::new(25, 25).unwrap()));

        let spec = SpecBuilder::select_first_attributes(3, ["skill.name"]).unwrap().build();
        assert_eq!(spec.window(), Some(Window::first(3).unwrap()));
        assert!(spec.is_projected());
    }

    #[test]
    fn build_is_idempotent() {
        let builder = SpecBuilder::select_page(2, 3)
            .unwrap()
            .filter(a())
            .sort_by(SortDirective::asc("age").unwrap());
        let first = builder.build();
        let second = builder.build();
        assert_eq!(first, second);
    }
}
