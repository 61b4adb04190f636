//! Searchspec - storage-agnostic search specifications.
//!
//! A [`Specification`] describes a query as plain data: which attributes to
//! return, a boolean filter tree, a sort order and a pagination window. It
//! says nothing about the store that will run it. Backends implement the
//! [`Translator`] contract to turn a specification into their native query
//! and return a uniform [`ResultEnvelope`].
//!
//! - Dot-separated attribute paths into nested entities (`skill.name`)
//! - A closed condition algebra: comparisons, `IN`, anchored `LIKE`,
//!   `IS NULL`, AND/OR/NOT trees of any depth
//! - Multi-key sort order, primary key first
//! - One-based page addressing normalized to offset/limit, with page
//!   arithmetic kept in one place
//!
//! # Quick Start
//!
//! ```rust
//! use searchspec::{Condition, SortDirective, SpecBuilder};
//!
//! # fn main() -> searchspec::Result<()> {
//! let spec = SpecBuilder::select_attributes_from_page(1, 20, ["name", "age"])?
//!     .filter(Condition::ge("age", 50)?)
//!     .and(Condition::contains("name", "an")?.or(Condition::is_null("skill")?))?
//!     .sort_by(SortDirective::desc("age")?)
//!     .sort_by(SortDirective::asc("name")?)
//!     .build();
//!
//! assert_eq!(
//!     spec.filter().map(ToString::to_string).as_deref(),
//!     Some("(age >= 50 AND (name LIKE '%an%' OR skill IS NULL))")
//! );
//! assert_eq!(spec.window().map(|w| w.offset()), Some(0));
//! # Ok(())
//! # }
//! ```
//!
//! # Condition Semantics
//!
//! | Operator | Operand | Matches when the attribute |
//! |----------|---------|----------------------------|
//! | `=` | any | equals the operand |
//! | `>=` `>` `<=` `<` | orderable (string, number, timestamp) | compares accordingly |
//! | `IN` | non-empty list of one type | equals any listed operand |
//! | `LIKE` | pattern | contains, starts with, ends with or equals the literal |
//! | `IS NULL` | none | is null or missing |
//!
//! A null or missing attribute fails every test except `IS NULL`, so
//! `NOT (x = v)` matches entities where `x` is null.
//!
//! # Translating
//!
//! Backends walk filter trees with a [`ConditionVisitor`], or match on
//! [`Condition`] directly; every node type exposes its parts through
//! accessors and is only constructible through validating factories.

mod builder;
mod condition;
mod contract;
mod envelope;
mod error;
mod op;
mod operand;
mod ordering;
mod page;
mod path;
mod spec;
mod visit;

// Re-export public API
pub use builder::SpecBuilder;
pub use condition::{Compound, Condition, Leaf, Negation, Pattern, Predicate};
pub use contract::Translator;
pub use envelope::ResultEnvelope;
pub use error::{Result, SearchError};
pub use op::{Comparison, Junction, Op};
pub use operand::{Number, Operand, Timestamp};
pub use ordering::{Direction, SortDirective, SortOrder};
pub use page::{pages_found, Window};
pub use path::{AttributePath, IntoAttributePath};
pub use spec::Specification;
pub use visit::ConditionVisitor;
