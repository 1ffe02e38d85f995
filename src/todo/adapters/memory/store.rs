//! Versioned in-memory record store backing [`super::InMemoryTodoRepository`].
//!
//! Every record carries a version that increments on each successful save.
//! A save presenting a version other than the stored one is rejected, which
//! gives the repository first-committer-wins semantics without holding a lock
//! between load and commit.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::todo::domain::{NewTodo, Todo, TodoId};

/// A todo snapshot paired with the store version it was loaded at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTodo {
    todo: Todo,
    version: u64,
}

impl StoredTodo {
    /// Returns the loaded todo.
    #[must_use]
    pub const fn todo(&self) -> &Todo {
        &self.todo
    }

    /// Returns the version observed when the snapshot was loaded.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Copies the mutable fields of `changes` onto the snapshot.
    pub fn apply_changes(&mut self, changes: &Todo) {
        self.todo.apply_changes(changes);
    }
}

/// Errors returned by [`InMemoryTodoStore`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoStoreError {
    /// The record changed or was removed after the snapshot was loaded.
    #[error("stale snapshot of todo {id}: loaded version {loaded}, stored version {stored:?}")]
    StaleSnapshot {
        /// Identifier of the rejected record.
        id: TodoId,
        /// Version carried by the rejected snapshot.
        loaded: u64,
        /// Version currently stored, or `None` when the record is gone.
        stored: Option<u64>,
    },

    /// Every identifier up to `i64::MAX` has been handed out.
    #[error("todo identifiers exhausted")]
    IdentifiersExhausted,

    /// The store lock was poisoned by a panicking writer.
    #[error("todo store lock poisoned: {0}")]
    Poisoned(String),
}

#[derive(Debug)]
struct StoreState {
    records: BTreeMap<TodoId, StoredTodo>,
    next_id: i64,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Thread-safe keyed collection of versioned todo records.
///
/// Identifiers are assigned sequentially from 1 and never reused.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoStore {
    state: Arc<RwLock<StoreState>>,
}

fn poisoned(err: impl std::fmt::Display) -> TodoStoreError {
    TodoStoreError::Poisoned(err.to_string())
}

impl InMemoryTodoStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every record in ascending identifier order.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::Poisoned`] when the lock is poisoned.
    pub fn all(&self) -> Result<Vec<Todo>, TodoStoreError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .records
            .values()
            .map(|record| record.todo.clone())
            .collect())
    }

    /// Loads a versioned snapshot of a record.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::Poisoned`] when the lock is poisoned.
    pub fn find(&self, id: TodoId) -> Result<Option<StoredTodo>, TodoStoreError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.records.get(&id).cloned())
    }

    /// Inserts a record at version 1 and returns its new identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::IdentifiersExhausted`] when no identifier
    /// is left, or [`TodoStoreError::Poisoned`] when the lock is poisoned.
    pub fn add(&self, todo: &NewTodo) -> Result<TodoId, TodoStoreError> {
        let mut state = self.state.write().map_err(poisoned)?;
        let id = TodoId::new(state.next_id);
        state.next_id = state
            .next_id
            .checked_add(1)
            .ok_or(TodoStoreError::IdentifiersExhausted)?;
        state.records.insert(
            id,
            StoredTodo {
                todo: todo.clone().with_id(id),
                version: 1,
            },
        );
        Ok(id)
    }

    /// Removes a record, returning whether it was present.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::Poisoned`] when the lock is poisoned.
    pub fn remove(&self, id: TodoId) -> Result<bool, TodoStoreError> {
        let mut state = self.state.write().map_err(poisoned)?;
        Ok(state.records.remove(&id).is_some())
    }

    /// Commits a snapshot if the stored version still matches the version
    /// the snapshot was loaded at.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::StaleSnapshot`] when the record changed or
    /// was removed since the snapshot was loaded, leaving the store
    /// untouched, or [`TodoStoreError::Poisoned`] when the lock is poisoned.
    pub fn save(&self, snapshot: &StoredTodo) -> Result<(), TodoStoreError> {
        let id = snapshot.todo.id();
        let mut state = self.state.write().map_err(poisoned)?;
        let Some(current) = state.records.get_mut(&id) else {
            return Err(TodoStoreError::StaleSnapshot {
                id,
                loaded: snapshot.version,
                stored: None,
            });
        };

        if current.version != snapshot.version {
            return Err(TodoStoreError::StaleSnapshot {
                id,
                loaded: snapshot.version,
                stored: Some(current.version),
            });
        }

        current.todo = snapshot.todo.clone();
        current.version = current.version.saturating_add(1);
        Ok(())
    }
}
