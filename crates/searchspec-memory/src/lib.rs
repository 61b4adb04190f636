//! In-memory reference backend for searchspec.
//!
//! [`MemoryStore`] holds a `Vec` of entities and implements the
//! [`Translator`](searchspec::Translator) contract over it. Attribute paths
//! resolve through typed accessors registered once per entity type in an
//! [`EntityShape`], so unknown paths and mismatched operand kinds fail at
//! translation time instead of silently matching nothing.
//!
//! # Quick Start
//!
//! ```rust
//! use searchspec::{Condition, SortDirective, SpecBuilder, Translator};
//! use searchspec_memory::{MemoryStore, Searchable};
//!
//! #[derive(Debug, Clone, Default, Searchable)]
//! struct Skill {
//!     name: String,
//! }
//!
//! #[derive(Debug, Clone, Default, Searchable)]
//! struct Person {
//!     name: String,
//!     age: u32,
//!     #[search(nested)]
//!     skill: Skill,
//!     #[search(skip)]
//!     notes: Vec<String>,
//! }
//!
//! # fn main() -> searchspec::Result<()> {
//! let mut people = MemoryStore::<Person>::new()?;
//! for (name, age, skill) in [
//!     ("Nelson Mandela", 95, "Politician"),
//!     ("Albert Einstein", 76, "Scientist"),
//!     ("Marie Curie", 66, "Scientist"),
//! ] {
//!     people.insert(Person {
//!         name: name.into(),
//!         age,
//!         skill: Skill { name: skill.into() },
//!         notes: Vec::new(),
//!     });
//! }
//!
//! let spec = SpecBuilder::select_attributes_from_page(1, 1, [Person::NAME, Person::AGE])?
//!     .filter(Condition::eq("skill.name", "Scientist")?)
//!     .sort_by(SortDirective::desc(Person::AGE)?)
//!     .build();
//! let found = people.execute(&spec)?;
//!
//! assert_eq!(found.total_matched(), 2);
//! assert_eq!(found.pages_found(), 2);
//! assert_eq!(found.items()[0].name, "Albert Einstein");
//! assert_eq!(found.items()[0].skill.name, "");
//! # Ok(())
//! # }
//! ```
//!
//! # Semantics
//!
//! - A null attribute (`None`) fails every test except `IS NULL`
//! - `LIKE` is case sensitive
//! - Sorting is stable; items that tie on every key keep insertion order
//! - Nulls sort last in both directions unless [`NullsOrder::First`] is set
//! - A path sorted on twice only takes effect the first time
//! - Projection starts from `Default::default()` and copies the selected
//!   attributes over

mod attribute;
mod options;
mod plan;
mod shape;
mod store;
mod value;

// Re-export public API
pub use attribute::{Attribute, Kind};
pub use options::{MemoryOptions, NullsOrder};
pub use plan::{CompiledFilter, CompiledQuery};
pub use shape::{AttributeEntry, Copier, EntityShape, Reader, Searchable};
pub use store::MemoryStore;
pub use value::{compare_values, Value};

pub use searchspec::{Result, SearchError};

#[cfg(feature = "derive")]
pub use searchspec_macros::Searchable;
