//! The condition algebra.
//!
//! A [`Condition`] is a node in a boolean filter tree: a [`Leaf`] testing one
//! attribute, a [`Compound`] joining two or more children with AND/OR, or a
//! [`Negation`] wrapping exactly one child. Trees are built bottom-up by
//! value, so they are always finite and acyclic.
//!
//! Two equivalent construction surfaces exist and yield identical trees:
//!
//! ```
//! use searchspec::Condition;
//!
//! # fn main() -> searchspec::Result<()> {
//! let adult = Condition::ge("age", 18)?;
//! let scientist = Condition::eq("skill.name", "Scientist")?;
//!
//! let combined = Condition::all([adult.clone(), scientist.clone()])?;
//! assert_eq!(combined, adult.and(scientist));
//! # Ok(())
//! # }
//! ```
//!
//! Every node type has private fields: the only way to obtain one is through
//! the validating factories here, so a backend can trust the arity and
//! operand invariants of any tree it receives.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::op::{Comparison, Junction, Op};
use crate::operand::Operand;
use crate::path::{AttributePath, IntoAttributePath};

/// String pattern of a `LIKE` leaf.
///
/// An anchored end fixes the literal to that boundary of the value; an
/// unanchored end lets anything precede (start) or follow (end) it.
///
/// | `anchored_start` | `anchored_end` | Matches values that |
/// |---|---|---|
/// | `false` | `false` | contain the literal |
/// | `true` | `false` | start with the literal |
/// | `false` | `true` | end with the literal |
/// | `true` | `true` | equal the literal |
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern {
    text: String,
    anchored_start: bool,
    anchored_end: bool,
}

impl Pattern {
    /// Creates a pattern over a literal.
    pub fn new(text: impl Into<String>, anchored_start: bool, anchored_end: bool) -> Self {
        Pattern {
            text: text.into(),
            anchored_start,
            anchored_end,
        }
    }

    /// The literal part of the pattern.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the literal must sit at the start of the value.
    pub fn anchored_start(&self) -> bool {
        self.anchored_start
    }

    /// Whether the literal must sit at the end of the value.
    pub fn anchored_end(&self) -> bool {
        self.anchored_end
    }

    /// Returns `true` if both ends are anchored.
    pub fn is_exact(&self) -> bool {
        self.anchored_start && self.anchored_end
    }

    /// Tests a value against the pattern. Case sensitive.
    pub fn matches(&self, value: &str) -> bool {
        match (self.anchored_start, self.anchored_end) {
            (true, true) => value == self.text,
            (true, false) => value.starts_with(&self.text),
            (false, true) => value.ends_with(&self.text),
            (false, false) => value.contains(&self.text),
        }
    }

    /// Renders the pattern in SQL `LIKE` syntax.
    ///
    /// `%`, `_` and `\` inside the literal are escaped with a backslash, so
    /// the result is meant for `LIKE ... ESCAPE '\'`.
    pub fn to_like_string(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + 2);
        if !self.anchored_start {
            out.push('%');
        }
        for c in self.text.chars() {
            if matches!(c, '%' | '_' | '\\') {
                out.push('\\');
            }
            out.push(c);
        }
        if !self.anchored_end {
            out.push('%');
        }
        out
    }
}

/// The test a leaf applies to its attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Comparison against a single operand.
    Compare(Comparison, Operand),
    /// Membership in a non-empty list of operands.
    In(Vec<Operand>),
    /// Anchored string pattern.
    Like(Pattern),
    /// Attribute is null or missing.
    IsNull,
}

impl Predicate {
    /// Returns the operator of this predicate.
    pub fn op(&self) -> Op {
        match self {
            Predicate::Compare(cmp, _) => cmp.op(),
            Predicate::In(_) => Op::In,
            Predicate::Like(_) => Op::Like,
            Predicate::IsNull => Op::IsNull,
        }
    }

    /// Returns the operands carried by this predicate.
    pub fn operands(&self) -> &[Operand] {
        match self {
            Predicate::Compare(_, operand) => std::slice::from_ref(operand),
            Predicate::In(values) => values,
            Predicate::Like(_) | Predicate::IsNull => &[],
        }
    }

    /// Checks the operand rules of the operator.
    ///
    /// - ordering comparisons need an orderable operand
    /// - `IN` needs at least one operand, all of the same type
    pub fn validate(&self) -> Result<()> {
        match self {
            Predicate::Compare(cmp, operand) if cmp.requires_order() && !operand.is_orderable() => {
                Err(SearchError::InvalidOperand {
                    op: cmp.op(),
                    operand: format!("non-orderable {} value {operand}", operand.type_name()),
                })
            }
            Predicate::In(values) => {
                let Some(first) = values.first() else {
                    return Err(SearchError::InvalidOperand {
                        op: Op::In,
                        operand: "an empty list".to_string(),
                    });
                };
                if let Some(odd) = values.iter().find(|v| !v.same_type(first)) {
                    return Err(SearchError::InvalidOperand {
                        op: Op::In,
                        operand: format!(
                            "a list mixing {} and {} values",
                            first.type_name(),
                            odd.type_name()
                        ),
                    });
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Leaf condition: a path plus a predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    path: AttributePath,
    predicate: Predicate,
}

impl Leaf {
    /// The tested attribute.
    pub fn path(&self) -> &AttributePath {
        &self.path
    }

    /// The applied test.
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

/// AND/OR over two or more children.
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    junction: Junction,
    children: Vec<Condition>,
}

impl Compound {
    /// The connective.
    pub fn junction(&self) -> Junction {
        self.junction
    }

    /// Children in construction order, at least two.
    pub fn children(&self) -> &[Condition] {
        &self.children
    }
}

/// NOT over exactly one child.
#[derive(Debug, Clone, PartialEq)]
pub struct Negation {
    inner: Box<Condition>,
}

impl Negation {
    /// The negated condition.
    pub fn inner(&self) -> &Condition {
        &self.inner
    }
}

/// A node of a boolean filter tree.
///
/// Trees may nest to any depth, but traversal (visiting, `Display`, `Drop`,
/// serde) recurses once per level. Depths of several hundred are fine on a
/// default thread stack; longer chains should be flattened into one
/// junction with many children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConditionRepr", into = "ConditionRepr")]
pub enum Condition {
    /// Attribute test.
    Leaf(Leaf),
    /// AND/OR over two or more children.
    Compound(Compound),
    /// NOT over one child.
    Negation(Negation),
}

impl Condition {
    // ========================================================================
    // Leaf factories
    // ========================================================================

    /// Creates a leaf from a path and a predicate, validating both.
    pub fn leaf(path: impl IntoAttributePath, predicate: Predicate) -> Result<Self> {
        let path = path.into_attribute_path()?;
        predicate.validate()?;
        Ok(Condition::Leaf(Leaf { path, predicate }))
    }

    /// Exact-match leaf.
    pub fn eq(path: impl IntoAttributePath, value: impl Into<Operand>) -> Result<Self> {
        Self::leaf(path, Predicate::Compare(Comparison::Eq, value.into()))
    }

    /// Pattern leaf; see [`Pattern`] for the anchoring rules.
    pub fn like(
        path: impl IntoAttributePath,
        text: impl Into<String>,
        anchored_start: bool,
        anchored_end: bool,
    ) -> Result<Self> {
        Self::leaf(
            path,
            Predicate::Like(Pattern::new(text, anchored_start, anchored_end)),
        )
    }

    /// Substring leaf, `like(path, text, false, false)`.
    pub fn contains(path: impl IntoAttributePath, text: impl Into<String>) -> Result<Self> {
        Self::like(path, text, false, false)
    }

    /// Prefix leaf, `like(path, text, true, false)`.
    pub fn starts_with(path: impl IntoAttributePath, text: impl Into<String>) -> Result<Self> {
        Self::like(path, text, true, false)
    }

    /// Suffix leaf, `like(path, text, false, true)`.
    pub fn ends_with(path: impl IntoAttributePath, text: impl Into<String>) -> Result<Self> {
        Self::like(path, text, false, true)
    }

    /// Greater-than-or-equal leaf. The operand must be orderable.
    pub fn ge(path: impl IntoAttributePath, value: impl Into<Operand>) -> Result<Self> {
        Self::leaf(path, Predicate::Compare(Comparison::Ge, value.into()))
    }

    /// Greater-than leaf. The operand must be orderable.
    pub fn gt(path: impl IntoAttributePath, value: impl Into<Operand>) -> Result<Self> {
        Self::leaf(path, Predicate::Compare(Comparison::Gt, value.into()))
    }

    /// Less-than-or-equal leaf. The operand must be orderable.
    pub fn le(path: impl IntoAttributePath, value: impl Into<Operand>) -> Result<Self> {
        Self::leaf(path, Predicate::Compare(Comparison::Le, value.into()))
    }

    /// Less-than leaf. The operand must be orderable.
    pub fn lt(path: impl IntoAttributePath, value: impl Into<Operand>) -> Result<Self> {
        Self::leaf(path, Predicate::Compare(Comparison::Lt, value.into()))
    }

    /// Membership leaf. Duplicates are kept; the list must not be empty.
    pub fn is_in<I, V>(path: impl IntoAttributePath, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        let values: Vec<Operand> = values.into_iter().map(Into::into).collect();
        Self::leaf(path, Predicate::In(values))
    }

    /// Null-check leaf.
    pub fn is_null(path: impl IntoAttributePath) -> Result<Self> {
        Self::leaf(path, Predicate::IsNull)
    }

    // ========================================================================
    // Combinators
    // ========================================================================

    /// Wraps a condition in a negation. Double negation is kept as written.
    pub fn not(inner: Condition) -> Self {
        Condition::Negation(Negation {
            inner: Box::new(inner),
        })
    }

    /// Conjunction of two or more conditions.
    pub fn all<I>(children: I) -> Result<Self>
    where
        I: IntoIterator<Item = Condition>,
    {
        Self::compound(Junction::And, children.into_iter().collect())
    }

    /// Disjunction of two or more conditions.
    pub fn any<I>(children: I) -> Result<Self>
    where
        I: IntoIterator<Item = Condition>,
    {
        Self::compound(Junction::Or, children.into_iter().collect())
    }

    /// Compound with an explicit connective.
    pub fn compound(junction: Junction, children: Vec<Condition>) -> Result<Self> {
        if children.len() < 2 {
            return Err(SearchError::InvalidArity {
                op: junction.op(),
                given: children.len(),
            });
        }
        Ok(Condition::Compound(Compound { junction, children }))
    }

    /// Flat conjunction; callers guarantee at least two children.
    pub(crate) fn conjoin(children: Vec<Condition>) -> Self {
        debug_assert!(children.len() >= 2);
        Condition::Compound(Compound {
            junction: Junction::And,
            children,
        })
    }

    /// `self AND other`; same tree as `Condition::all([self, other])`.
    pub fn and(self, other: Condition) -> Self {
        Condition::Compound(Compound {
            junction: Junction::And,
            children: vec![self, other],
        })
    }

    /// `self OR other`; same tree as `Condition::any([self, other])`.
    pub fn or(self, other: Condition) -> Self {
        Condition::Compound(Compound {
            junction: Junction::Or,
            children: vec![self, other],
        })
    }

    /// `NOT self`; same tree as `Condition::not(self)`.
    pub fn negated(self) -> Self {
        Condition::not(self)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Operator at the root of this tree.
    pub fn op(&self) -> Op {
        match self {
            Condition::Leaf(leaf) => leaf.predicate.op(),
            Condition::Compound(compound) => compound.junction.op(),
            Condition::Negation(_) => Op::Not,
        }
    }

    /// Every path the tree references, depth-first, duplicates included.
    pub fn paths(&self) -> Vec<&AttributePath> {
        let mut out = Vec::new();
        self.collect_paths(&mut out);
        out
    }

    fn collect_paths<'a>(&'a self, out: &mut Vec<&'a AttributePath>) {
        match self {
            Condition::Leaf(leaf) => out.push(&leaf.path),
            Condition::Compound(compound) => {
                for child in &compound.children {
                    child.collect_paths(out);
                }
            }
            Condition::Negation(negation) => negation.inner.collect_paths(out),
        }
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Condition::Leaf(_) => 1,
            Condition::Compound(compound) => compound.children.iter().map(Self::leaf_count).sum(),
            Condition::Negation(negation) => negation.inner.leaf_count(),
        }
    }

    /// Height of the tree; a single leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Condition::Leaf(_) => 1,
            Condition::Compound(compound) => {
                1 + compound.children.iter().map(Self::depth).max().unwrap_or(0)
            }
            Condition::Negation(negation) => 1 + negation.inner.depth(),
        }
    }

    /// Re-checks every structural and operand invariant of the tree.
    pub fn validate(&self) -> Result<()> {
        match self {
            Condition::Leaf(leaf) => leaf.predicate.validate(),
            Condition::Compound(compound) => {
                if compound.children.len() < 2 {
                    return Err(SearchError::InvalidArity {
                        op: compound.junction.op(),
                        given: compound.children.len(),
                    });
                }
                compound.children.iter().try_for_each(Self::validate)
            }
            Condition::Negation(negation) => negation.inner.validate(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Leaf(leaf) => match &leaf.predicate {
                Predicate::Compare(cmp, operand) => write!(f, "{} {cmp} {operand}", leaf.path),
                Predicate::In(values) => {
                    let list: Vec<String> = values.iter().map(ToString::to_string).collect();
                    write!(f, "{} IN ({})", leaf.path, list.join(", "))
                }
                Predicate::Like(pattern) => write!(
                    f,
                    "{} LIKE '{}'",
                    leaf.path,
                    pattern.to_like_string().replace('\'', "''")
                ),
                Predicate::IsNull => write!(f, "{} IS NULL", leaf.path),
            },
            Condition::Compound(compound) => {
                let parts: Vec<String> = compound.children.iter().map(ToString::to_string).collect();
                write!(f, "({})", parts.join(&format!(" {} ", compound.junction)))
            }
            Condition::Negation(negation) => match negation.inner.as_ref() {
                inner @ Condition::Compound(_) => write!(f, "NOT {inner}"),
                inner => write!(f, "NOT ({inner})"),
            },
        }
    }
}

/// Wire shape of a condition; converting back re-validates.
#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ConditionRepr {
    Leaf {
        path: AttributePath,
        predicate: Predicate,
    },
    Compound {
        junction: Junction,
        children: Vec<Condition>,
    },
    Negation {
        inner: Box<Condition>,
    },
}

impl TryFrom<ConditionRepr> for Condition {
    type Error = SearchError;

    fn try_from(repr: ConditionRepr) -> Result<Self> {
        match repr {
            ConditionRepr::Leaf { path, predicate } => Condition::leaf(path, predicate),
            ConditionRepr::Compound { junction, children } => {
                Condition::compound(junction, children)
            }
            ConditionRepr::Negation { inner } => Ok(Condition::not(*inner)),
        }
    }
}

impl From<Condition> for ConditionRepr {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::Leaf(Leaf { path, predicate }) => ConditionRepr::Leaf { path, predicate },
            Condition::Compound(Compound { junction, children }) => {
                ConditionRepr::Compound { junction, children }
            }
            Condition::Negation(Negation { inner }) => ConditionRepr::Negation { inner },
        }
    }
}
