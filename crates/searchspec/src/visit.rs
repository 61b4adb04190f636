//! Structural traversal of condition trees.
//!
//! Backends translate a [`Condition`] by implementing [`ConditionVisitor`]:
//! leaves are translated first, then their translations are combined by
//! the compound and negation callbacks. The visitor never sees a compound
//! with fewer than two children.

use crate::condition::{Condition, Leaf};
use crate::error::Result;
use crate::op::Junction;

/// Bottom-up translation of a condition tree into a backend's native form.
pub trait ConditionVisitor {
    /// Native form of one translated node.
    type Output;

    /// Translates a leaf.
    fn visit_leaf(&mut self, leaf: &Leaf) -> Result<Self::Output>;

    /// Combines already translated children.
    fn visit_compound(
        &mut self,
        junction: Junction,
        children: Vec<Self::Output>,
    ) -> Result<Self::Output>;

    /// Negates an already translated child.
    fn visit_negation(&mut self, inner: Self::Output) -> Result<Self::Output>;
}

impl Condition {
    /// Walks the tree with `visitor`, stopping at the first error.
    pub fn accept<V>(&self, visitor: &mut V) -> Result<V::Output>
    where
        V: ConditionVisitor + ?Sized,
    {
        match self {
            Condition::Leaf(leaf) => visitor.visit_leaf(leaf),
            Condition::Compound(compound) => {
                let children = compound
                    .children()
                    .iter()
                    .map(|child| child.accept(visitor))
                    .collect::<Result<Vec<_>>>()?;
                visitor.visit_compound(compound.junction(), children)
            }
            Condition::Negation(negation) => {
                let inner = negation.inner().accept(visitor)?;
                visitor.visit_negation(inner)
            }
        }
    }
}
