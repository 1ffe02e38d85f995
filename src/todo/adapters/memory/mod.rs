//! In-memory adapters for todo persistence.
//!
//! The default storage backend; also used by tests.

mod repository;
mod store;

pub use repository::InMemoryTodoRepository;
pub use store::{InMemoryTodoStore, StoredTodo, TodoStoreError};
