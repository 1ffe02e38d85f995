//! Identifier and validated scalar types for the todo domain.

use super::TodoDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier for a todo record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for TodoId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-blank todo name of at most [`TodoName::MAX_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoName(String);

impl TodoName {
    /// Largest name length, in characters, that the schema can persist.
    pub const MAX_CHARS: usize = 255;

    /// Creates a validated todo name.
    ///
    /// Length is measured in characters, not bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyTodoName`] for an empty or
    /// whitespace-only value, or
    /// [`TodoDomainError::TodoNameTooLong`] when the value has more than
    /// [`TodoName::MAX_CHARS`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TodoDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TodoDomainError::EmptyTodoName);
        }

        let length = raw.chars().count();
        if length > Self::MAX_CHARS {
            return Err(TodoDomainError::TodoNameTooLong {
                length,
                max: Self::MAX_CHARS,
            });
        }

        Ok(Self(raw))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TodoName {
    type Error = TodoDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoName> for String {
    fn from(value: TodoName) -> Self {
        value.0
    }
}

impl AsRef<str> for TodoName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TodoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
