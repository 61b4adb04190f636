//! The in-memory store.

use searchspec::{Condition, Result, ResultEnvelope, Specification, Translator};

use crate::options::MemoryOptions;
use crate::plan::{CompiledFilter, CompiledQuery};
use crate::shape::{EntityShape, Searchable};

/// A collection of entities that executes specifications.
///
/// Items are kept in insertion order, which is also the order of items that
/// tie on every sort key.
///
/// ```
/// use searchspec::{Condition, SortDirective, SpecBuilder, Translator};
/// use searchspec_memory::{EntityShape, MemoryStore, Searchable};
///
/// #[derive(Clone, Default)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// impl Searchable for Person {
///     fn shape() -> searchspec::Result<EntityShape<Self>> {
///         EntityShape::new("Person")
///             .attribute("name", |p: &Person| &p.name, |p: &mut Person| &mut p.name)?
///             .attribute("age", |p: &Person| &p.age, |p: &mut Person| &mut p.age)
///     }
/// }
///
/// # fn main() -> searchspec::Result<()> {
/// let mut store = MemoryStore::new()?;
/// for (name, age) in [("Ada", 36), ("Alan", 41), ("Grace", 85)] {
///     store.insert(Person { name: name.into(), age });
/// }
///
/// let spec = SpecBuilder::select_first(2)?
///     .filter(Condition::ge("age", 40)?)
///     .sort_by(SortDirective::desc("age")?)
///     .build();
/// let found = store.execute(&spec)?;
///
/// assert_eq!(found.total_matched(), 2);
/// assert_eq!(found.items()[0].name, "Grace");
/// # Ok(())
/// # }
/// ```
pub struct MemoryStore<T> {
    shape: EntityShape<T>,
    items: Vec<T>,
    options: MemoryOptions,
}

impl<T: Searchable> MemoryStore<T> {
    /// Creates an empty store with default options.
    pub fn new() -> Result<Self> {
        Self::with_options(MemoryOptions::default())
    }

    /// Creates an empty store.
    pub fn with_options(options: MemoryOptions) -> Result<Self> {
        Ok(MemoryStore {
            shape: T::shape()?,
            items: Vec::new(),
            options,
        })
    }

    /// Creates a store holding `items`, in order.
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Result<Self> {
        let mut store = Self::new()?;
        store.extend(items);
        Ok(store)
    }
}

impl<T> MemoryStore<T> {
    /// Shape used to translate specifications.
    pub fn shape(&self) -> &EntityShape<T> {
        &self.shape
    }

    /// Options in effect.
    pub fn options(&self) -> MemoryOptions {
        self.options
    }

    /// All items, in insertion order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends an item.
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
    }

    /// Appends items, in order.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
    }

    /// First stored item matching `condition`.
    pub fn find_first(&self, condition: &Condition) -> Result<Option<&T>> {
        let filter = CompiledFilter::compile(&self.shape, condition)?;
        Ok(self.items.iter().find(|item| filter.matches(item)))
    }

    /// Number of stored items matching `condition`.
    pub fn count(&self, condition: &Condition) -> Result<usize> {
        let filter = CompiledFilter::compile(&self.shape, condition)?;
        Ok(self.items.iter().filter(|item| filter.matches(item)).count())
    }

    /// Applies `update` to every item matching `condition`.
    ///
    /// Returns the number of updated items.
    pub fn update_where<F>(&mut self, condition: &Condition, mut update: F) -> Result<usize>
    where
        F: FnMut(&mut T),
    {
        let filter = CompiledFilter::compile(&self.shape, condition)?;
        let mut updated = 0;
        for item in self.items.iter_mut().filter(|item| filter.matches(item)) {
            update(item);
            updated += 1;
        }
        tracing::debug!(entity = self.shape.name(), updated, "updated items");
        Ok(updated)
    }

    /// Removes every item matching `condition`.
    ///
    /// Returns the number of removed items.
    pub fn delete_where(&mut self, condition: &Condition) -> Result<usize> {
        let filter = CompiledFilter::compile(&self.shape, condition)?;
        let before = self.items.len();
        self.items.retain(|item| !filter.matches(item));
        let deleted = before - self.items.len();
        tracing::debug!(entity = self.shape.name(), deleted, "deleted items");
        Ok(deleted)
    }
}

impl<T: Clone + Default> Translator<T> for MemoryStore<T> {
    type Native = CompiledQuery<T>;

    fn translate(&self, spec: &Specification) -> Result<CompiledQuery<T>> {
        let query = CompiledQuery::compile(&self.shape, spec, self.options)?;
        tracing::trace!(
            entity = query.entity(),
            leaves = spec.filter().map_or(0, Condition::leaf_count),
            sort_keys = query.sort_keys(),
            window = ?query.window(),
            "translated specification"
        );
        Ok(query)
    }

    fn run(&self, query: &CompiledQuery<T>) -> Result<ResultEnvelope<T>> {
        let mut matched: Vec<&T> = self.items.iter().filter(|item| query.matches(item)).collect();
        let total = matched.len();
        query.sort(&mut matched);

        let range = match query.window() {
            Some(window) => window.range(total),
            None => 0..total,
        };
        let items: Vec<T> = matched[range].iter().map(|item| query.project(item)).collect();

        tracing::debug!(
            entity = query.entity(),
            matched = total,
            returned = items.len(),
            "ran compiled query"
        );
        Ok(ResultEnvelope::for_window(items, total, query.window()))
    }
}

impl<T> std::fmt::Debug for MemoryStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entity", &self.shape.name())
            .field("len", &self.items.len())
            .field("options", &self.options)
            .finish()
    }
}
