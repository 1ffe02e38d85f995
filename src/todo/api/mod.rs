//! HTTP surface for todo management.
//!
//! Routes:
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/api/v1/todos` | 200 |
//! | GET | `/api/v1/todos/{id}` | 200, 404 |
//! | POST | `/api/v1/todos` | 201 + `Location` |
//! | PUT | `/api/v1/todos/{id}` | 204, 404 |
//! | DELETE | `/api/v1/todos/{id}` | 204 |

mod error;
mod extract;
mod handlers;
mod payload;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::todo::{ports::TodoRepository, services::TodoService};

pub use error::{ApiError, ID_MISMATCH_MESSAGE, INTERNAL_ERROR_BODY, MISSING_PAYLOAD_MESSAGE};
pub use extract::{JsonPayload, RouteTodoId};
pub use handlers::{create_todo, delete_todo, get_todo, list_todos, update_todo};
pub use payload::{FieldErrors, NewTodoPayload, TodoUpdatePayload};

/// Base path of the todo collection.
pub const TODOS_PATH: &str = "/api/v1/todos";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    todos: TodoService<dyn TodoRepository>,
}

impl AppState {
    /// Creates handler state around a todo service.
    #[must_use]
    pub const fn new(todos: TodoService<dyn TodoRepository>) -> Self {
        Self { todos }
    }
}

/// Builds the todo router over `repository`, with request tracing.
#[must_use]
pub fn router(repository: Arc<dyn TodoRepository>) -> Router {
    Router::new()
        .route(TODOS_PATH, get(list_todos).post(create_todo))
        .route(
            "/api/v1/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(TodoService::new(repository)))
}
