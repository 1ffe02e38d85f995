//! In-memory todo repository.

use async_trait::async_trait;

use super::store::{InMemoryTodoStore, StoredTodo, TodoStoreError};
use crate::todo::{
    domain::{NewTodo, Todo, TodoId},
    ports::{TodoRepository, TodoRepositoryError, TodoRepositoryResult},
};

/// Thread-safe in-memory todo repository.
///
/// Clones share the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    store: InMemoryTodoStore,
}

impl InMemoryTodoRepository {
    /// Creates a repository over an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository over an existing store.
    #[must_use]
    pub const fn with_store(store: InMemoryTodoStore) -> Self {
        Self { store }
    }

    /// Copies the mutable fields of `changes` onto `snapshot` and commits it.
    ///
    /// This is the commit half of [`TodoRepository::update`]; the snapshot
    /// may have been loaded any time earlier.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::ConcurrentConflict`] when the record
    /// changed or was removed after `snapshot` was loaded.
    pub fn commit(&self, mut snapshot: StoredTodo, changes: &Todo) -> TodoRepositoryResult<()> {
        snapshot.apply_changes(changes);
        self.store.save(&snapshot)?;
        Ok(())
    }
}

impl From<TodoStoreError> for TodoRepositoryError {
    fn from(err: TodoStoreError) -> Self {
        match err {
            TodoStoreError::StaleSnapshot { id, .. } => Self::ConcurrentConflict(id),
            TodoStoreError::IdentifiersExhausted | TodoStoreError::Poisoned(_) => {
                Self::persistence(err)
            }
        }
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list_all(&self) -> TodoRepositoryResult<Vec<Todo>> {
        Ok(self.store.all()?)
    }

    async fn find_by_id(&self, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        let snapshot = self.store.find(id)?;
        Ok(snapshot.map(|record| record.todo().clone()))
    }

    async fn exists(&self, id: TodoId) -> TodoRepositoryResult<bool> {
        Ok(self.store.find(id)?.is_some())
    }

    async fn create(&self, todo: &NewTodo) -> TodoRepositoryResult<TodoId> {
        Ok(self.store.add(todo)?)
    }

    async fn delete_by_id(&self, id: TodoId) -> TodoRepositoryResult<()> {
        self.store.remove(id)?;
        Ok(())
    }

    async fn update(&self, todo: &Todo) -> TodoRepositoryResult<()> {
        let snapshot = self
            .store
            .find(todo.id())?
            .ok_or(TodoRepositoryError::NotFound(todo.id()))?;
        self.commit(snapshot, todo)
    }
}
