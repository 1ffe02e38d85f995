//! Port contracts for todo persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the todo service.

pub mod repository;

pub use repository::{TodoRepository, TodoRepositoryError, TodoRepositoryResult};
