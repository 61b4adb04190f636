//! Typed accessor registration.
//!
//! An [`EntityShape`] maps every searchable attribute path of an entity type
//! to a typed reader, checked once at registration. Translation resolves
//! condition and sort paths against the shape, so an unknown path fails
//! before any entity is read.
//!
//! ```
//! use searchspec_memory::{EntityShape, Searchable};
//!
//! #[derive(Clone, Default)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl Searchable for Person {
//!     fn shape() -> searchspec::Result<EntityShape<Self>> {
//!         EntityShape::new("Person")
//!             .attribute("name", |p: &Person| &p.name, |p: &mut Person| &mut p.name)?
//!             .attribute("age", |p: &Person| &p.age, |p: &mut Person| &mut p.age)
//!     }
//! }
//!
//! let shape = Person::shape().unwrap();
//! assert!(shape.contains("age"));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use searchspec::{AttributePath, Result, SearchError};

use crate::attribute::{Attribute, Kind};
use crate::value::Value;

/// Reads one attribute from an entity.
pub type Reader<T> = Arc<dyn for<'a> Fn(&'a T) -> Value<'a> + Send + Sync>;

/// Copies one attribute from a source entity into a target entity.
pub type Copier<T> = Arc<dyn Fn(&T, &mut T) + Send + Sync>;

fn reader<T, F>(f: F) -> Reader<T>
where
    F: for<'a> Fn(&'a T) -> Value<'a> + Send + Sync + 'static,
{
    Arc::new(f)
}

fn copier<T, F>(f: F) -> Copier<T>
where
    F: Fn(&T, &mut T) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A registered attribute.
pub struct AttributeEntry<T> {
    kind: Kind,
    nullable: bool,
    read: Reader<T>,
}

impl<T> AttributeEntry<T> {
    /// Kind of the attribute's non-null values.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Whether the attribute can be null.
    pub fn nullable(&self) -> bool {
        self.nullable
    }

    /// Reads the attribute from an entity.
    pub fn read<'a>(&self, entity: &'a T) -> Value<'a> {
        (self.read)(entity)
    }

    /// Shared handle to the reader.
    pub fn reader(&self) -> Reader<T> {
        Arc::clone(&self.read)
    }
}

impl<T> Clone for AttributeEntry<T> {
    fn clone(&self) -> Self {
        AttributeEntry {
            kind: self.kind,
            nullable: self.nullable,
            read: Arc::clone(&self.read),
        }
    }
}

impl<T> fmt::Debug for AttributeEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeEntry")
            .field("kind", &self.kind)
            .field("nullable", &self.nullable)
            .finish_non_exhaustive()
    }
}

/// Searchable attributes of an entity type.
///
/// Every attribute is both filterable/sortable and projectable. Nested
/// entities mounted with [`nested`](Self::nested) contribute their
/// attributes under a prefix, and the prefix itself is projectable.
pub struct EntityShape<T> {
    name: &'static str,
    attributes: BTreeMap<AttributePath, AttributeEntry<T>>,
    projections: BTreeMap<AttributePath, Copier<T>>,
}

impl<T: 'static> EntityShape<T> {
    /// Creates an empty shape. `name` appears in diagnostics.
    pub fn new(name: &'static str) -> Self {
        EntityShape {
            name,
            attributes: BTreeMap::new(),
            projections: BTreeMap::new(),
        }
    }

    /// Registers an attribute through a getter and a mutable getter.
    ///
    /// Fails if the path is malformed or already registered.
    pub fn attribute<A, G, M>(mut self, path: &str, get: G, get_mut: M) -> Result<Self>
    where
        A: Attribute + Clone + 'static,
        G: Fn(&T) -> &A + Copy + Send + Sync + 'static,
        M: Fn(&mut T) -> &mut A + Copy + Send + Sync + 'static,
    {
        let path = AttributePath::parse(path)?;
        self.ensure_free(&path)?;

        let entry = AttributeEntry {
            kind: A::KIND,
            nullable: A::NULLABLE,
            read: reader(move |entity: &T| get(entity).value()),
        };
        self.attributes.insert(path.clone(), entry);
        self.projections.insert(
            path,
            copier(move |source: &T, target: &mut T| *get_mut(target) = get(source).clone()),
        );
        Ok(self)
    }

    /// Mounts the shape of a nested entity under `prefix`.
    ///
    /// Each attribute `x` of `U` becomes `prefix.x`; projecting `prefix`
    /// copies the whole nested value.
    pub fn nested<U, G, M>(mut self, prefix: &str, get: G, get_mut: M) -> Result<Self>
    where
        U: Searchable + Clone,
        G: Fn(&T) -> &U + Copy + Send + Sync + 'static,
        M: Fn(&mut T) -> &mut U + Copy + Send + Sync + 'static,
    {
        let prefix = AttributePath::parse(prefix)?;
        self.ensure_free(&prefix)?;
        let inner = U::shape()?;

        for (path, entry) in inner.attributes {
            let path = path.prefixed(&prefix);
            self.ensure_free(&path)?;
            let read = entry.read;
            self.attributes.insert(
                path,
                AttributeEntry {
                    kind: entry.kind,
                    nullable: entry.nullable,
                    read: reader(move |entity: &T| read(get(entity))),
                },
            );
        }
        for (path, copy) in inner.projections {
            self.projections.insert(
                path.prefixed(&prefix),
                copier(move |source: &T, target: &mut T| copy(get(source), get_mut(target))),
            );
        }
        self.projections.insert(
            prefix,
            copier(move |source: &T, target: &mut T| *get_mut(target) = get(source).clone()),
        );
        Ok(self)
    }

    fn ensure_free(&self, path: &AttributePath) -> Result<()> {
        if self.attributes.contains_key(path) || self.projections.contains_key(path) {
            return Err(SearchError::InvalidArgument(format!(
                "attribute '{path}' is registered twice on {}",
                self.name
            )));
        }
        Ok(())
    }
}

impl<T> EntityShape<T> {
    /// Entity name used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up a filterable, sortable attribute.
    ///
    /// Fails with [`SearchError::Translation`] for unknown paths.
    pub fn resolve(&self, path: &AttributePath) -> Result<&AttributeEntry<T>> {
        self.attributes
            .get(path)
            .ok_or_else(|| SearchError::unresolved(path))
    }

    /// Looks up the copier of a projectable path.
    ///
    /// Fails with [`SearchError::Translation`] for unknown paths.
    pub fn projection(&self, path: &AttributePath) -> Result<&Copier<T>> {
        self.projections
            .get(path)
            .ok_or_else(|| SearchError::unresolved(path))
    }

    /// Returns `true` if `path` names a filterable attribute.
    pub fn contains(&self, path: &str) -> bool {
        AttributePath::parse(path).is_ok_and(|path| self.attributes.contains_key(&path))
    }

    /// Filterable attribute paths, in path order.
    pub fn paths(&self) -> impl Iterator<Item = &AttributePath> {
        self.attributes.keys()
    }

    /// Number of filterable attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl<T> fmt::Debug for EntityShape<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityShape")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .field("projections", &self.projections.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Types with a registered [`EntityShape`].
///
/// Usually derived with `#[derive(Searchable)]`; see the crate docs.
pub trait Searchable: Sized + 'static {
    /// Builds the shape of this type.
    fn shape() -> Result<EntityShape<Self>>;
}
