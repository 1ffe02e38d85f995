//! Todo record and its id-less insertion form.

use super::{TodoId, TodoName};

/// A todo record as held by the store.
///
/// `id` is fixed once the store assigns it; `name` and `is_complete` are the
/// only mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: TodoId,
    name: TodoName,
    is_complete: bool,
}

impl Todo {
    /// Creates a todo with a known identifier.
    #[must_use]
    pub const fn new(id: TodoId, name: TodoName, is_complete: bool) -> Self {
        Self {
            id,
            name,
            is_complete,
        }
    }

    /// Returns the store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }

    /// Returns the todo name.
    #[must_use]
    pub const fn name(&self) -> &TodoName {
        &self.name
    }

    /// Returns whether the todo is complete.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Copies the mutable fields of `other` onto this record, keeping `id`.
    pub fn apply_changes(&mut self, other: &Self) {
        self.name = other.name.clone();
        self.is_complete = other.is_complete;
    }
}

/// A todo awaiting insertion; the store assigns its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    name: TodoName,
    is_complete: bool,
}

impl NewTodo {
    /// Creates an insertion record.
    #[must_use]
    pub const fn new(name: TodoName, is_complete: bool) -> Self {
        Self { name, is_complete }
    }

    /// Returns the todo name.
    #[must_use]
    pub const fn name(&self) -> &TodoName {
        &self.name
    }

    /// Returns whether the todo is complete.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Attaches a store-assigned identifier.
    #[must_use]
    pub fn with_id(self, id: TodoId) -> Todo {
        Todo::new(id, self.name, self.is_complete)
    }
}
