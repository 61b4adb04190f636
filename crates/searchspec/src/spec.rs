//! The immutable search specification.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::builder::SpecBuilder;
use crate::condition::Condition;
use crate::error::{Result, SearchError};
use crate::ordering::SortOrder;
use crate::page::Window;
use crate::path::AttributePath;

/// A complete description of one query: projection, filter, order and window.
///
/// Specifications are only produced by [`SpecBuilder`] (or by deserializing
/// one, which re-checks the same rules). Once built they never change, so a
/// specification can be shared freely between threads and executed any
/// number of times.
///
/// Every part is optional:
///
/// | Part | Absent means |
/// |------|--------------|
/// | projection | every attribute is returned |
/// | filter | every entity matches |
/// | order | backend-native order |
/// | window | every matched entity is returned |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpecification")]
pub struct Specification {
    projection: Option<Vec<AttributePath>>,
    filter: Option<Condition>,
    order: Option<SortOrder>,
    window: Option<Window>,
}

impl Specification {
    pub(crate) fn from_parts(
        projection: Option<Vec<AttributePath>>,
        filter: Option<Condition>,
        order: Option<SortOrder>,
        window: Option<Window>,
    ) -> Self {
        Specification {
            projection,
            filter,
            order,
            window,
        }
    }

    /// Starts a builder that selects every attribute.
    pub fn builder() -> SpecBuilder {
        SpecBuilder::select_all()
    }

    /// Requested attributes, in request order without duplicates.
    ///
    /// `None` selects every attribute.
    pub fn projection(&self) -> Option<&[AttributePath]> {
        self.projection.as_deref()
    }

    /// Root filter condition.
    pub fn filter(&self) -> Option<&Condition> {
        self.filter.as_ref()
    }

    /// Sort order, primary key first.
    pub fn order(&self) -> Option<&SortOrder> {
        self.order.as_ref()
    }

    /// Pagination window.
    pub fn window(&self) -> Option<Window> {
        self.window
    }

    /// Returns `true` if the specification selects only some attributes.
    pub fn is_projected(&self) -> bool {
        self.projection.is_some()
    }

    /// Every distinct path referenced by the projection, filter or order.
    ///
    /// Backends use this to resolve all paths before touching the store.
    pub fn referenced_paths(&self) -> BTreeSet<&AttributePath> {
        let mut paths = BTreeSet::new();
        if let Some(projection) = &self.projection {
            paths.extend(projection.iter());
        }
        if let Some(filter) = &self.filter {
            paths.extend(filter.paths());
        }
        if let Some(order) = &self.order {
            paths.extend(order.iter().map(|directive| directive.path()));
        }
        paths
    }
}

#[derive(Deserialize)]
struct RawSpecification {
    #[serde(default)]
    projection: Option<Vec<AttributePath>>,
    #[serde(default)]
    filter: Option<Condition>,
    #[serde(default)]
    order: Option<SortOrder>,
    #[serde(default)]
    window: Option<Window>,
}

impl TryFrom<RawSpecification> for Specification {
    type Error = SearchError;

    fn try_from(raw: RawSpecification) -> Result<Self> {
        if matches!(&raw.projection, Some(paths) if paths.is_empty()) {
            return Err(SearchError::InvalidArgument(
                "attribute list must not be empty".to_string(),
            ));
        }
        let projection = raw.projection.map(dedup_paths);
        Ok(Specification::from_parts(
            projection,
            raw.filter,
            raw.order,
            raw.window,
        ))
    }
}

/// Drops repeated paths, keeping the first occurrence.
pub(crate) fn dedup_paths(paths: Vec<AttributePath>) -> Vec<AttributePath> {
    let mut seen = BTreeSet::new();
    paths
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect()
}
