//! Service layer for todo CRUD and update-conflict resolution.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use super::dto::{NewTodoRequest, TodoUpdateRequest, TodoView};
use crate::todo::{
    domain::{NewTodo, Todo, TodoDomainError, TodoId},
    ports::{TodoRepository, TodoRepositoryError},
};

/// Service-level errors for todo operations.
#[derive(Debug, Error)]
pub enum TodoServiceError {
    /// Request data violates a domain invariant.
    #[error(transparent)]
    Domain(#[from] TodoDomainError),
    /// No todo exists with the given identifier.
    #[error("todo {0} not found")]
    TodoNotFound(TodoId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TodoRepositoryError),
}

/// Result type for todo service operations.
pub type TodoServiceResult<T> = Result<T, TodoServiceError>;

/// Todo orchestration service.
///
/// `R` may be unsized so a service can be built over `dyn TodoRepository`
/// when the backend is chosen at runtime.
pub struct TodoService<R>
where
    R: TodoRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> Clone for TodoService<R>
where
    R: TodoRepository + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> TodoService<R>
where
    R: TodoRepository + ?Sized,
{
    /// Creates a new todo service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists every todo.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the repository.
    pub async fn list_all(&self) -> TodoServiceResult<Vec<TodoView>> {
        let todos = self.repository.list_all().await?;
        Ok(todos.into_iter().map(TodoView::from).collect())
    }

    /// Finds a todo by identifier.
    ///
    /// Returns `Ok(None)` when the todo does not exist.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the repository.
    pub async fn find_by_id(&self, id: TodoId) -> TodoServiceResult<Option<TodoView>> {
        let todo = self.repository.find_by_id(id).await?;
        Ok(todo.map(TodoView::from))
    }

    /// Creates a todo and returns its view carrying the assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Domain`] when the name is empty or too
    /// long, or persistence-layer errors from the repository.
    pub async fn create(&self, request: NewTodoRequest) -> TodoServiceResult<TodoView> {
        let todo_to_create = NewTodo::try_from(&request)?;
        let id = self.repository.create(&todo_to_create).await?;
        debug!(todo_id = %id, "created todo");
        Ok(TodoView::created(id, request))
    }

    /// Deletes a todo. Deleting an absent identifier succeeds.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the repository.
    pub async fn delete_by_id(&self, id: TodoId) -> TodoServiceResult<()> {
        self.repository.delete_by_id(id).await?;
        debug!(todo_id = %id, "deleted todo");
        Ok(())
    }

    /// Replaces the name and completion flag of an existing todo.
    ///
    /// A concurrent-modification conflict is disambiguated with one extra
    /// existence check: a todo removed by the competing writer is reported as
    /// not found, otherwise the conflict is returned unchanged. The update is
    /// never retried.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::TodoNotFound`] when the todo does not
    /// exist or was deleted concurrently,
    /// [`TodoServiceError::Repository`] wrapping
    /// [`TodoRepositoryError::ConcurrentConflict`] when a concurrent writer
    /// changed the still-existing todo, [`TodoServiceError::Domain`] for
    /// invalid request data, and other persistence errors unmodified.
    pub async fn update(&self, request: TodoUpdateRequest) -> TodoServiceResult<()> {
        let todo_to_update = Todo::try_from(&request)?;
        let id = todo_to_update.id();

        match self.repository.update(&todo_to_update).await {
            Ok(()) => {
                debug!(todo_id = %id, "updated todo");
                Ok(())
            }
            Err(TodoRepositoryError::NotFound(_)) => Err(TodoServiceError::TodoNotFound(id)),
            Err(conflict @ TodoRepositoryError::ConcurrentConflict(_)) => {
                self.resolve_conflict(id, conflict).await
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn resolve_conflict(
        &self,
        id: TodoId,
        conflict: TodoRepositoryError,
    ) -> TodoServiceResult<()> {
        warn!(todo_id = %id, "concurrent modification detected while updating todo");
        if self.repository.exists(id).await? {
            return Err(conflict.into());
        }
        Err(TodoServiceError::TodoNotFound(id))
    }
}
