//! Domain model for todo records.
//!
//! Holds the validated value types shared by every layer. Infrastructure
//! concerns such as record versions stay inside the storage adapters.

mod error;
mod ids;
mod todo;

pub use error::TodoDomainError;
pub use ids::{TodoId, TodoName};
pub use todo::{NewTodo, Todo};
