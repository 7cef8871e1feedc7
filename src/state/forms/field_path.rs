//! Dotted field paths (`land_details.boundaries.north`)

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Deepest nesting a document field may use
pub const MAX_DEPTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldPathError {
    #[error("field path is empty")]
    Empty,
    #[error("field path '{0}' has an empty segment")]
    EmptySegment(String),
    #[error("field path '{path}' is {depth} levels deep (max {MAX_DEPTH})")]
    TooDeep { path: String, depth: usize },
}

/// A validated path of 1 to [`MAX_DEPTH`] non-empty segments
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self, FieldPathError> {
        if raw.is_empty() {
            return Err(FieldPathError::Empty);
        }
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(FieldPathError::EmptySegment(raw.to_string()));
        }
        if segments.len() > MAX_DEPTH {
            return Err(FieldPathError::TooDeep {
                path: raw.to_string(),
                depth: segments.len(),
            });
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// True if `self` is a strict prefix of `other` (`a` of `a.b`)
    pub fn is_ancestor_of(&self, other: &FieldPath) -> bool {
        self.segments.len() < other.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }
}

impl FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
