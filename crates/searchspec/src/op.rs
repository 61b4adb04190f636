//! Operators of the condition algebra.
//!
//! [`Op`] is the flat vocabulary shared by every condition node, while
//! [`Comparison`] and [`Junction`] are the closed subsets that leaf and
//! compound nodes actually carry.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Every operator a condition tree can contain.
///
/// Operators are grouped by the node kind that carries them:
/// - **Comparison leaves**: `Eq`, `Ge`, `Gt`, `Le`, `Lt`
/// - **Membership leaf**: `In`
/// - **Pattern leaf**: `Like`
/// - **Null-check leaf**: `IsNull`
/// - **Compounds**: `And`, `Or`, `Not`
///
/// There is no not-equal operator; inequality is `Not` over `Eq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    /// Exact equality.
    Eq,
    /// Greater than or equal.
    Ge,
    /// Greater than.
    Gt,
    /// Less than or equal.
    Le,
    /// Less than.
    Lt,
    /// Value is one of a set of operands.
    In,
    /// String pattern match with optional anchoring.
    Like,
    /// Value is null or missing.
    IsNull,
    /// Conjunction of two or more conditions.
    And,
    /// Disjunction of two or more conditions.
    Or,
    /// Negation of a single condition.
    Not,
}

impl Op {
    /// Returns `true` if this operator appears on leaf conditions.
    pub fn is_leaf(self) -> bool {
        !self.is_compound()
    }

    /// Returns `true` if this operator combines other conditions.
    pub fn is_compound(self) -> bool {
        matches!(self, Op::And | Op::Or | Op::Not)
    }

    /// Returns `true` if this operator needs an operand with a total order.
    pub fn requires_order(self) -> bool {
        matches!(self, Op::Ge | Op::Gt | Op::Le | Op::Lt)
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ge => ">=",
            Op::Gt => ">",
            Op::Le => "<=",
            Op::Lt => "<",
            Op::In => "IN",
            Op::Like => "LIKE",
            Op::IsNull => "IS NULL",
            Op::And => "AND",
            Op::Or => "OR",
            Op::Not => "NOT",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Comparison operator of a comparison leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// Equal.
    Eq,
    /// Greater than or equal.
    Ge,
    /// Greater than.
    Gt,
    /// Less than or equal.
    Le,
    /// Less than.
    Lt,
}

impl Comparison {
    /// Returns the matching [`Op`].
    pub fn op(self) -> Op {
        match self {
            Comparison::Eq => Op::Eq,
            Comparison::Ge => Op::Ge,
            Comparison::Gt => Op::Gt,
            Comparison::Le => Op::Le,
            Comparison::Lt => Op::Lt,
        }
    }

    /// Returns `true` for the operators that need an ordered operand.
    pub fn requires_order(self) -> bool {
        self.op().requires_order()
    }

    /// Evaluates the comparison given `value.cmp(operand)`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Comparison::Eq => ordering == Ordering::Equal,
            Comparison::Ge => ordering != Ordering::Less,
            Comparison::Gt => ordering == Ordering::Greater,
            Comparison::Le => ordering != Ordering::Greater,
            Comparison::Lt => ordering == Ordering::Less,
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.op().fmt(f)
    }
}

/// Connective of a compound condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Junction {
    /// Every child must match.
    And,
    /// At least one child must match.
    Or,
}

impl Junction {
    /// Returns the matching [`Op`].
    pub fn op(self) -> Op {
        match self {
            Junction::And => Op::And,
            Junction::Or => Op::Or,
        }
    }
}

impl std::fmt::Display for Junction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.op().fmt(f)
    }
}
