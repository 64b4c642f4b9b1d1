//! Resource identity (qubit-like addresses)

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Resource parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// Empty or whitespace-only input
    #[error("empty resource name")]
    Empty,
    /// Malformed line index
    #[error("invalid line index: {0}")]
    InvalidLine(String),
    /// Malformed grid coordinate
    #[error("invalid grid coordinate: {0}")]
    InvalidGrid(String),
}

/// An addressable, mutually exclusive resource an operation may act on.
///
/// Ordering is by variant first (`Line < Grid < Named`), then by fields, so
/// sets of resources have a canonical minimum.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    /// A resource on a line, addressed by a single index
    Line(i64),
    /// A resource on a 2D grid
    Grid {
        /// Row coordinate
        row: i32,
        /// Column coordinate
        col: i32,
    },
    /// A resource identified only by name
    Named(String),
}

impl Resource {
    /// Create a line resource
    pub fn line(index: i64) -> Self {
        Resource::Line(index)
    }

    /// Create a range of consecutive line resources `[0, n)`
    pub fn line_range(n: i64) -> Vec<Self> {
        (0..n).map(Resource::Line).collect()
    }

    /// Create a grid resource
    pub fn grid(row: i32, col: i32) -> Self {
        Resource::Grid { row, col }
    }

    /// Create a named resource
    pub fn named(name: impl Into<String>) -> Self {
        Resource::Named(name.into())
    }

    /// Check if this is a line resource
    pub fn is_line(&self) -> bool {
        matches!(self, Resource::Line(_))
    }

    /// Parse a resource from its textual form.
    ///
    /// `q3` is a line resource, `2,5` or `q(2, 5)` a grid resource, and any
    /// other non-empty token a named resource. A token in single quotes is
    /// always a named resource, taken verbatim between the quotes.
    pub fn parse(s: &str) -> Result<Self, ResourceError> {
        let s = s.trim();
        if let Some(name) = s
            .strip_prefix('\'')
            .and_then(|rest| rest.strip_suffix('\''))
        {
            return Ok(Resource::Named(name.to_string()));
        }
        parse_bare(s)
    }
}

/// Parse an unquoted, trimmed token
fn parse_bare(s: &str) -> Result<Resource, ResourceError> {
    if s.is_empty() {
        return Err(ResourceError::Empty);
    }

    if let Some(inner) = s.strip_prefix("q(").and_then(|r| r.strip_suffix(')')) {
        return parse_grid(inner);
    }
    if s.contains(',') {
        return parse_grid(s);
    }
    if let Some(index) = s.strip_prefix('q') {
        if index.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
            return index
                .parse::<i64>()
                .map(Resource::Line)
                .map_err(|_| ResourceError::InvalidLine(s.to_string()));
        }
    }

    Ok(Resource::Named(s.to_string()))
}

/// Names that would not read back as themselves are written quoted
fn needs_quotes(name: &str) -> bool {
    name.starts_with('\'')
        || name.trim() != name
        || !matches!(parse_bare(name), Ok(Resource::Named(parsed)) if parsed == name)
}

fn parse_grid(s: &str) -> Result<Resource, ResourceError> {
    let mut parts = s.split(',');
    let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ResourceError::InvalidGrid(s.to_string()));
    };
    let row = row
        .trim()
        .parse::<i32>()
        .map_err(|_| ResourceError::InvalidGrid(s.to_string()))?;
    let col = col
        .trim()
        .parse::<i32>()
        .map_err(|_| ResourceError::InvalidGrid(s.to_string()))?;
    Ok(Resource::Grid { row, col })
}

impl FromStr for Resource {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::parse(s)
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resource({})", self)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Line(index) => write!(f, "q{}", index),
            Resource::Grid { row, col } => write!(f, "q({}, {})", row, col),
            Resource::Named(name) if needs_quotes(name) => write!(f, "'{}'", name),
            Resource::Named(name) => f.write_str(name),
        }
    }
}

impl From<i64> for Resource {
    fn from(index: i64) -> Self {
        Resource::Line(index)
    }
}

impl From<(i32, i32)> for Resource {
    fn from((row, col): (i32, i32)) -> Self {
        Resource::Grid { row, col }
    }
}

// Serde as the textual form (behind feature flag)
#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Resource {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Resource {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Resource::parse(&s).map_err(D::Error::custom)
        }
    }
}
