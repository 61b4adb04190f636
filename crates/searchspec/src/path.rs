//! Dot-separated attribute paths.
//!
//! An [`AttributePath`] names a field on an entity, possibly nested:
//! `"age"`, `"skill.name"`. Paths are parsed once, when a condition or sort
//! directive is created, and compared structurally afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// Non-empty, ordered sequence of identifier segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AttributePath {
    segments: Vec<String>,
}

impl AttributePath {
    /// Parses a dot-separated path.
    ///
    /// Fails with [`SearchError::InvalidPath`] when the string is empty or
    /// any segment between dots is empty.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(SearchError::InvalidPath {
                path: String::new(),
                reason: "path is empty",
            });
        }
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(SearchError::InvalidPath {
                path: path.to_string(),
                reason: "path has an empty segment",
            });
        }
        Ok(AttributePath { segments })
    }

    /// Returns the segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the first segment.
    pub fn head(&self) -> &str {
        &self.segments[0]
    }

    /// Returns the path below the first segment, if any.
    pub fn tail(&self) -> Option<AttributePath> {
        if self.segments.len() > 1 {
            Some(AttributePath {
                segments: self.segments[1..].to_vec(),
            })
        } else {
            None
        }
    }

    /// Number of segments, at least one.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the path has more than one segment.
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    /// Returns this path mounted below `prefix`.
    pub fn prefixed(&self, prefix: &AttributePath) -> AttributePath {
        let mut segments = prefix.segments.clone();
        segments.extend(self.segments.iter().cloned());
        AttributePath { segments }
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for AttributePath {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        AttributePath::parse(s)
    }
}

impl TryFrom<String> for AttributePath {
    type Error = SearchError;

    fn try_from(s: String) -> Result<Self> {
        AttributePath::parse(&s)
    }
}

impl From<AttributePath> for String {
    fn from(path: AttributePath) -> Self {
        path.to_string()
    }
}

/// Anything a factory accepts in place of a parsed path.
///
/// Strings are parsed on the spot; already-parsed paths pass through.
pub trait IntoAttributePath {
    /// Converts into a validated path.
    fn into_attribute_path(self) -> Result<AttributePath>;
}

impl IntoAttributePath for AttributePath {
    fn into_attribute_path(self) -> Result<AttributePath> {
        Ok(self)
    }
}

impl IntoAttributePath for &AttributePath {
    fn into_attribute_path(self) -> Result<AttributePath> {
        Ok(self.clone())
    }
}

impl IntoAttributePath for &str {
    fn into_attribute_path(self) -> Result<AttributePath> {
        AttributePath::parse(self)
    }
}

impl IntoAttributePath for String {
    fn into_attribute_path(self) -> Result<AttributePath> {
        AttributePath::parse(&self)
    }
}

impl IntoAttributePath for &String {
    fn into_attribute_path(self) -> Result<AttributePath> {
        AttributePath::parse(self)
    }
}
