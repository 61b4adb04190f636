//! The translation contract backends implement.
//!
//! A backend turns a [`Specification`] into its own native query in
//! [`translate`](Translator::translate) and runs that query in
//! [`run`](Translator::run). Splitting the two lets callers validate a
//! specification against the entity shape without touching the store, and
//! lets a backend reuse one translated query across runs.
//!
//! A conforming backend:
//!
//! - narrows items to the projection, leaving other attributes unset
//! - applies the filter with the semantics of [`Condition`](crate::Condition)
//! - sorts stably by the sort order, primary key first
//! - counts every filtered item in `total_matched`, then applies the window
//! - reports paths or operators it cannot express as
//!   [`SearchError::Translation`](crate::SearchError::Translation)
//! - passes store failures through as
//!   [`SearchError::Execution`](crate::SearchError::Execution)

use crate::envelope::ResultEnvelope;
use crate::error::Result;
use crate::spec::Specification;

/// A backend able to execute specifications against entities of type `T`.
pub trait Translator<T> {
    /// Backend-native form of a translated specification.
    type Native;

    /// Translates a specification into the backend's native query.
    fn translate(&self, spec: &Specification) -> Result<Self::Native>;

    /// Executes an already translated query.
    fn run(&self, native: &Self::Native) -> Result<ResultEnvelope<T>>;

    /// Translates and runs in one step.
    fn execute(&self, spec: &Specification) -> Result<ResultEnvelope<T>> {
        let native = self.translate(spec)?;
        self.run(&native)
    }
}
