//! Request and view DTOs exchanged with the todo service, and the mappings
//! between them and domain records.

use serde::{Deserialize, Serialize};

use crate::todo::domain::{NewTodo, Todo, TodoDomainError, TodoId, TodoName};

/// Request payload for creating a todo. The store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodoRequest {
    /// Todo name.
    pub name: String,
    /// Completion flag.
    pub is_complete: bool,
}

impl NewTodoRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(name: impl Into<String>, is_complete: bool) -> Self {
        Self {
            name: name.into(),
            is_complete,
        }
    }
}

/// Request payload for replacing the mutable fields of an existing todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoUpdateRequest {
    /// Identifier of the todo to update.
    pub id: TodoId,
    /// New todo name.
    pub name: String,
    /// New completion flag.
    pub is_complete: bool,
}

impl TodoUpdateRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(id: TodoId, name: impl Into<String>, is_complete: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_complete,
        }
    }
}

/// Read-only projection of a todo returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoView {
    /// Store-assigned identifier.
    pub id: TodoId,
    /// Todo name.
    pub name: String,
    /// Completion flag.
    pub is_complete: bool,
}

impl TodoView {
    /// Projects a creation request into the view returned for the record
    /// the store created under `id`.
    #[must_use]
    pub fn created(id: TodoId, request: NewTodoRequest) -> Self {
        Self {
            id,
            name: request.name,
            is_complete: request.is_complete,
        }
    }
}

impl From<Todo> for TodoView {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id(),
            name: todo.name().as_str().to_owned(),
            is_complete: todo.is_complete(),
        }
    }
}

impl TryFrom<&NewTodoRequest> for NewTodo {
    type Error = TodoDomainError;

    fn try_from(request: &NewTodoRequest) -> Result<Self, Self::Error> {
        Ok(Self::new(
            TodoName::new(request.name.as_str())?,
            request.is_complete,
        ))
    }
}

impl TryFrom<&TodoUpdateRequest> for Todo {
    type Error = TodoDomainError;

    fn try_from(request: &TodoUpdateRequest) -> Result<Self, Self::Error> {
        Ok(Self::new(
            request.id,
            TodoName::new(request.name.as_str())?,
            request.is_complete,
        ))
    }
}
