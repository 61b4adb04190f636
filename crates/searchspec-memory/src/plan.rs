//! Compiled queries: the native form of a specification in memory.
//!
//! Compilation resolves every path against the [`EntityShape`] and checks
//! operand kinds once. Running a [`CompiledQuery`] afterwards cannot fail.

use std::cmp::Ordering;
use std::fmt;

use searchspec::{
    Comparison, ConditionVisitor, Direction, Junction, Leaf, Op, Operand, Pattern, Predicate,
    Result, SearchError, Specification, Window,
};

use crate::attribute::Kind;
use crate::options::{MemoryOptions, NullsOrder};
use crate::shape::{Copier, EntityShape, Reader};
use crate::value::compare_values;

enum Test {
    Compare(Comparison, Operand),
    In(Vec<Operand>),
    Like(Pattern),
    IsNull,
}

/// A condition tree with every path resolved to a reader.
pub struct CompiledFilter<T> {
    node: Node<T>,
}

enum Node<T> {
    Test { read: Reader<T>, test: Test },
    All(Vec<Node<T>>),
    Any(Vec<Node<T>>),
    Not(Box<Node<T>>),
}

impl<T> Node<T> {
    fn matches(&self, item: &T) -> bool {
        match self {
            Node::Test { read, test } => {
                let value = read(item);
                match test {
                    Test::IsNull => value.is_null(),
                    Test::Compare(cmp, operand) => value
                        .compare_operand(operand)
                        .is_some_and(|ordering| cmp.eval_ordering(ordering)),
                    Test::In(operands) => operands
                        .iter()
                        .any(|operand| value.compare_operand(operand) == Some(Ordering::Equal)),
                    Test::Like(pattern) => value.as_str().is_some_and(|s| pattern.matches(s)),
                }
            }
            Node::All(children) => children.iter().all(|child| child.matches(item)),
            Node::Any(children) => children.iter().any(|child| child.matches(item)),
            Node::Not(inner) => !inner.matches(item),
        }
    }
}

impl<T> CompiledFilter<T> {
    /// Compiles a condition against a shape.
    ///
    /// Fails with [`SearchError::Translation`] when a path does not resolve
    /// or an operand does not fit the attribute's kind.
    pub fn compile(shape: &EntityShape<T>, condition: &searchspec::Condition) -> Result<Self> {
        let node = condition.accept(&mut Compiler { shape })?;
        Ok(CompiledFilter { node })
    }

    /// Returns `true` if the item satisfies the condition.
    pub fn matches(&self, item: &T) -> bool {
        self.node.matches(item)
    }
}

struct Compiler<'s, T> {
    shape: &'s EntityShape<T>,
}

impl<T> ConditionVisitor for Compiler<'_, T> {
    type Output = Node<T>;

    fn visit_leaf(&mut self, leaf: &Leaf) -> Result<Node<T>> {
        let entry = self.shape.resolve(leaf.path())?;
        let predicate = leaf.predicate();
        let op = predicate.op();

        if op == Op::Like && entry.kind() != Kind::String {
            return Err(SearchError::unsupported(
                leaf.path(),
                op,
                format!("pattern matching needs a string attribute, found {}", entry.kind()),
            ));
        }
        if let Some(operand) = predicate
            .operands()
            .iter()
            .find(|operand| Kind::of(operand) != entry.kind())
        {
            return Err(SearchError::unsupported(
                leaf.path(),
                op,
                format!(
                    "{} attribute cannot be compared with a {} operand",
                    entry.kind(),
                    operand.type_name()
                ),
            ));
        }

        let test = match predicate {
            Predicate::Compare(cmp, operand) => Test::Compare(*cmp, operand.clone()),
            Predicate::In(operands) => Test::In(operands.clone()),
            Predicate::Like(pattern) => Test::Like(pattern.clone()),
            Predicate::IsNull => Test::IsNull,
        };
        Ok(Node::Test {
            read: entry.reader(),
            test,
        })
    }

    fn visit_compound(&mut self, junction: Junction, children: Vec<Node<T>>) -> Result<Node<T>> {
        Ok(match junction {
            Junction::And => Node::All(children),
            Junction::Or => Node::Any(children),
        })
    }

    fn visit_negation(&mut self, inner: Node<T>) -> Result<Node<T>> {
        Ok(Node::Not(Box::new(inner)))
    }
}

struct SortKey<T> {
    read: Reader<T>,
    direction: Direction,
}

impl<T> SortKey<T> {
    /// Nulls and NaN go where `nulls` says regardless of direction. All
    /// other values of one attribute share a kind and compare totally.
    fn compare(&self, a: &T, b: &T, nulls: NullsOrder) -> Ordering {
        let (va, vb) = ((self.read)(a), (self.read)(b));
        let null_first = match nulls {
            NullsOrder::Last => Ordering::Greater,
            NullsOrder::First => Ordering::Less,
        };
        match (va.is_unordered(), vb.is_unordered()) {
            (true, true) => Ordering::Equal,
            (true, false) => null_first,
            (false, true) => null_first.reverse(),
            (false, false) => self
                .direction
                .apply(compare_values(&va, &vb).unwrap_or(Ordering::Equal)),
        }
    }
}

/// A specification translated against an [`EntityShape`].
pub struct CompiledQuery<T> {
    entity: &'static str,
    filter: Option<CompiledFilter<T>>,
    order: Vec<SortKey<T>>,
    projection: Option<Vec<Copier<T>>>,
    window: Option<Window>,
    nulls: NullsOrder,
}

impl<T> CompiledQuery<T> {
    /// Resolves every path of the specification against `shape`.
    pub fn compile(
        shape: &EntityShape<T>,
        spec: &Specification,
        options: MemoryOptions,
    ) -> Result<Self> {
        let filter = spec
            .filter()
            .map(|condition| CompiledFilter::compile(shape, condition))
            .transpose()?;

        let order = spec
            .order()
            .into_iter()
            .flatten()
            .map(|directive| {
                Ok(SortKey {
                    read: shape.resolve(directive.path())?.reader(),
                    direction: directive.direction(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let projection = spec
            .projection()
            .map(|paths| {
                paths
                    .iter()
                    .map(|path| shape.projection(path).cloned())
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        Ok(CompiledQuery {
            entity: shape.name(),
            filter,
            order,
            projection,
            window: spec.window(),
            nulls: options.nulls_order(),
        })
    }

    /// Name of the entity the query was compiled for.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Window to apply after filtering and sorting.
    pub fn window(&self) -> Option<Window> {
        self.window
    }

    /// Number of sort keys.
    pub fn sort_keys(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the item satisfies the filter. No filter matches all.
    pub fn matches(&self, item: &T) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter.matches(item))
    }

    /// Compares two items by the sort keys, primary key first.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        for key in &self.order {
            let ordering = key.compare(a, b, self.nulls);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Stable sort by the sort keys; ties keep their input order.
    pub fn sort(&self, items: &mut [&T]) {
        if !self.order.is_empty() {
            items.sort_by(|a, b| self.compare(a, b));
        }
    }
}

impl<T: Clone + Default> CompiledQuery<T> {
    /// Copies an item, narrowed to the projection.
    ///
    /// Unselected attributes keep their `Default` value.
    pub fn project(&self, item: &T) -> T {
        match &self.projection {
            None => item.clone(),
            Some(copiers) => {
                let mut out = T::default();
                for copy in copiers {
                    copy(item, &mut out);
                }
                out
            }
        }
    }
}

impl<T> fmt::Debug for CompiledFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledFilter").finish_non_exhaustive()
    }
}

impl<T> fmt::Debug for CompiledQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledQuery")
            .field("entity", &self.entity)
            .field("filtered", &self.filter.is_some())
            .field("sort_keys", &self.order.len())
            .field("projected", &self.projection.as_ref().map(Vec::len))
            .field("window", &self.window)
            .field("nulls", &self.nulls)
            .finish()
    }
}
