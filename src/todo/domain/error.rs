//! Error types for todo domain validation.

use thiserror::Error;

/// Errors returned while constructing domain todo values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The todo name is empty or whitespace only.
    #[error("todo name must not be blank")]
    EmptyTodoName,

    /// The todo name exceeds the persisted column width.
    #[error("todo name has {length} characters, expected at most {max}")]
    TodoNameTooLong {
        /// Character count of the rejected name.
        length: usize,
        /// Largest accepted character count.
        max: usize,
    },
}
