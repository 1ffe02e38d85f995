//! Repository port for todo persistence.

use crate::todo::domain::{NewTodo, Todo, TodoId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for todo repository operations.
pub type TodoRepositoryResult<T> = Result<T, TodoRepositoryError>;

/// Todo persistence contract.
///
/// Implementations never block the async executor while waiting on storage.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Returns every stored todo.
    async fn list_all(&self) -> TodoRepositoryResult<Vec<Todo>>;

    /// Finds a todo by identifier.
    ///
    /// Returns `None` when the todo does not exist.
    async fn find_by_id(&self, id: TodoId) -> TodoRepositoryResult<Option<Todo>>;

    /// Reports whether a todo with the identifier exists.
    async fn exists(&self, id: TodoId) -> TodoRepositoryResult<bool>;

    /// Stores a new todo and returns the identifier assigned to it.
    async fn create(&self, todo: &NewTodo) -> TodoRepositoryResult<TodoId>;

    /// Removes a todo. Removing an absent identifier is a no-op.
    async fn delete_by_id(&self, id: TodoId) -> TodoRepositoryResult<()>;

    /// Copies `name` and `is_complete` onto the stored record with the same
    /// identifier and commits the change.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::NotFound`] when no record has the
    /// identifier, or [`TodoRepositoryError::ConcurrentConflict`] when the
    /// record changed or disappeared between load and commit.
    async fn update(&self, todo: &Todo) -> TodoRepositoryResult<()>;
}

/// Errors returned by todo repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TodoRepositoryError {
    /// The todo was not found.
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    /// The todo was modified or removed by another writer after it was loaded.
    #[error("concurrent modification of todo {0}")]
    ConcurrentConflict(TodoId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted todo data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TodoRepositoryError {
    /// Wraps persisted-data decoding or validation failures.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
