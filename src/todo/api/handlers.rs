//! Axum handlers for the todo endpoints.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use super::{
    AppState, TODOS_PATH,
    error::ApiError,
    extract::{JsonPayload, RouteTodoId},
    payload::{NewTodoPayload, TodoUpdatePayload},
};
use crate::todo::services::TodoView;

/// `GET /api/v1/todos`
///
/// # Errors
///
/// Returns [`ApiError::Service`] when the repository fails.
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoView>>, ApiError> {
    Ok(Json(state.todos.list_all().await?))
}

/// `GET /api/v1/todos/{id}`
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] when no todo has the identifier.
pub async fn get_todo(
    State(state): State<AppState>,
    RouteTodoId(id): RouteTodoId,
) -> Result<Json<TodoView>, ApiError> {
    state
        .todos
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// `POST /api/v1/todos`
///
/// Responds 201 with the created view and a `Location` header pointing at
/// the new todo.
///
/// # Errors
///
/// Returns a 400-class [`ApiError`] for a missing, malformed or invalid
/// payload; the service is not called in that case.
pub async fn create_todo(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload<NewTodoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let request = payload.into_request()?;
    let created = state.todos.create(request).await?;
    let location = format!("{TODOS_PATH}/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// `PUT /api/v1/todos/{id}`
///
/// # Errors
///
/// Returns a 400-class [`ApiError`] for a missing or invalid payload or when
/// the payload id differs from the route id, and a 404 when the todo does
/// not exist or was deleted concurrently.
pub async fn update_todo(
    State(state): State<AppState>,
    RouteTodoId(id): RouteTodoId,
    JsonPayload(payload): JsonPayload<TodoUpdatePayload>,
) -> Result<StatusCode, ApiError> {
    let request = payload.into_request()?;
    if request.id != id {
        return Err(ApiError::IdMismatch {
            route: id,
            payload: request.id,
        });
    }

    state.todos.update(request).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/v1/todos/{id}`
///
/// Always 204 once the repository accepts the delete, whether or not the
/// todo existed.
///
/// # Errors
///
/// Returns [`ApiError::Service`] when the repository fails.
pub async fn delete_todo(
    State(state): State<AppState>,
    RouteTodoId(id): RouteTodoId,
) -> Result<StatusCode, ApiError> {
    state.todos.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
