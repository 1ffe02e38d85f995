//! Application services for todo management.

mod dto;
mod todos;

pub use dto::{NewTodoRequest, TodoUpdateRequest, TodoView};
pub use todos::{TodoService, TodoServiceError, TodoServiceResult};
