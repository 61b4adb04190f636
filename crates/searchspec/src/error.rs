//! Error types for building and executing specifications.

use thiserror::Error;

use crate::op::Op;

/// Errors raised while building a specification or executing one.
///
/// Builder-time variants (`InvalidArgument` through `IllegalState`) are
/// returned synchronously by the constructor that received the bad input.
/// `Translation` and `Execution` come from backends.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Malformed builder input: empty attribute list, non-positive page,
    /// size or limit.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Empty or malformed attribute path string.
    #[error("invalid attribute path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// Operand unsuitable for the requested operator.
    #[error("operator '{op}' cannot take {operand}")]
    InvalidOperand { op: Op, operand: String },

    /// Compound condition with fewer than two children.
    #[error("operator '{op}' needs at least two conditions, got {given}")]
    InvalidArity { op: Op, given: usize },

    /// Builder method called out of sequence.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    /// The backend cannot express a path or operator against its entity shape.
    #[error("cannot translate '{path}': {reason}")]
    Translation {
        path: String,
        op: Option<Op>,
        reason: String,
    },

    /// Backend failure during execution, passed through untouched.
    #[error("execution failed: {0}")]
    Execution(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SearchError {
    /// Wraps a backend failure.
    pub fn execution(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        SearchError::Execution(err.into())
    }

    /// Translation failure for a path the backend cannot resolve.
    pub fn unresolved(path: impl ToString) -> Self {
        SearchError::Translation {
            path: path.to_string(),
            op: None,
            reason: "attribute does not resolve against the entity shape".to_string(),
        }
    }

    /// Translation failure for an operator the backend cannot apply to a path.
    pub fn unsupported(path: impl ToString, op: Op, reason: impl Into<String>) -> Self {
        SearchError::Translation {
            path: path.to_string(),
            op: Some(op),
            reason: reason.into(),
        }
    }
}

/// Result type for specification operations.
pub type Result<T> = std::result::Result<T, SearchError>;
