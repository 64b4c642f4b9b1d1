//! Classical data keys (measurement outcomes and similar channels)

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Classical key parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Empty key name
    #[error("empty classical key")]
    Empty,
}

/// A named channel of classical data dependency.
///
/// An operation that writes a key (e.g. a measurement) must stay ordered
/// before any operation that reads it, and vice versa.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct ClassicalKey(String);

impl ClassicalKey {
    /// Create a key, rejecting empty names
    pub fn new(name: impl Into<String>) -> Result<Self, KeyError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(KeyError::Empty);
        }
        Ok(ClassicalKey(name))
    }

    /// Get the key name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClassicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassicalKey({})", self.0)
    }
}

impl fmt::Display for ClassicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ClassicalKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClassicalKey::new(s.trim())
    }
}

impl TryFrom<String> for ClassicalKey {
    type Error = KeyError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        ClassicalKey::new(name)
    }
}

impl From<ClassicalKey> for String {
    fn from(key: ClassicalKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ClassicalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
