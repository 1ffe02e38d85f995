//! HTTP error boundary for the todo API.
//!
//! Client errors carry a field-to-messages JSON body. Not-found and conflict
//! responses have empty bodies. Anything else is logged and answered with an
//! opaque 500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use super::payload::{FieldErrors, name_message};
use crate::todo::{
    domain::TodoId,
    ports::TodoRepositoryError,
    services::TodoServiceError,
};

/// Message returned when a request carries no todo.
pub const MISSING_PAYLOAD_MESSAGE: &str = "No todo found in payload";

/// Message returned when the route and payload identifiers differ.
pub const ID_MISMATCH_MESSAGE: &str = "The id in the route does not match the id in your payload";

/// Body of every 500 response.
pub const INTERNAL_ERROR_BODY: &str = "Error";

/// Failures surfaced by todo HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request has no JSON body, or the body is JSON `null`.
    #[error("no todo found in payload")]
    MissingPayload,

    /// The body is not valid JSON for the expected payload.
    #[error("malformed todo payload: {0}")]
    MalformedPayload(String),

    /// The payload failed field validation.
    #[error("todo payload failed validation")]
    Validation(FieldErrors),

    /// The identifier in the route differs from the one in the payload.
    #[error("route id {route} does not match payload id {payload}")]
    IdMismatch {
        /// Identifier taken from the route.
        route: TodoId,
        /// Identifier taken from the payload.
        payload: TodoId,
    },

    /// The route identifier is not an integer.
    #[error("invalid todo id in route: {0}")]
    InvalidRouteId(String),

    /// The requested todo does not exist.
    #[error("todo {0} not found")]
    NotFound(TodoId),

    /// The todo service failed.
    #[error(transparent)]
    Service(#[from] TodoServiceError),
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

fn bad_request(errors: FieldErrors) -> Response {
    (StatusCode::BAD_REQUEST, Json(errors)).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingPayload => bad_request(FieldErrors::single(
                "payload",
                MISSING_PAYLOAD_MESSAGE,
            )),
            Self::MalformedPayload(message) => bad_request(FieldErrors::single("payload", message)),
            Self::Validation(errors) => bad_request(errors),
            Self::IdMismatch { .. } => bad_request(FieldErrors::single("id", ID_MISMATCH_MESSAGE)),
            Self::InvalidRouteId(message) => bad_request(FieldErrors::single("id", message)),
            Self::NotFound(_) | Self::Service(TodoServiceError::TodoNotFound(_)) => {
                StatusCode::NOT_FOUND.into_response()
            }
            Self::Service(TodoServiceError::Domain(err)) => {
                bad_request(FieldErrors::single("name", name_message(&err)))
            }
            Self::Service(TodoServiceError::Repository(TodoRepositoryError::ConcurrentConflict(
                id,
            ))) => {
                warn!(todo_id = %id, "todo update lost a concurrent modification race");
                StatusCode::CONFLICT.into_response()
            }
            Self::Service(err) => {
                error!(error = %err, "todo request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use axum::{http::StatusCode, response::IntoResponse};
    use http_body_util::BodyExt;
    use rstest::rstest;

    use super::{ApiError, INTERNAL_ERROR_BODY};
    use crate::todo::api::payload::{NAME_LENGTH, NAME_REQUIRED};
    use crate::todo::{
        domain::{TodoDomainError, TodoId},
        ports::TodoRepositoryError,
        services::TodoServiceError,
    };

    const ID: TodoId = TodoId::new(3);

    #[rstest]
    #[case(ApiError::MissingPayload, StatusCode::BAD_REQUEST)]
    #[case(ApiError::IdMismatch { route: ID, payload: TodoId::new(4) }, StatusCode::BAD_REQUEST)]
    #[case(ApiError::InvalidRouteId("abc".to_owned()), StatusCode::BAD_REQUEST)]
    #[case(ApiError::NotFound(ID), StatusCode::NOT_FOUND)]
    #[case(
        ApiError::Service(TodoServiceError::TodoNotFound(ID)),
        StatusCode::NOT_FOUND
    )]
    #[case(
        ApiError::Service(TodoServiceError::Domain(TodoDomainError::EmptyTodoName)),
        StatusCode::BAD_REQUEST
    )]
    #[case(
        ApiError::Service(TodoServiceError::Repository(
            TodoRepositoryError::ConcurrentConflict(ID)
        )),
        StatusCode::CONFLICT
    )]
    #[case(
        ApiError::Service(TodoServiceError::Repository(TodoRepositoryError::NotFound(ID))),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    #[case(
        ApiError::Service(TodoServiceError::Repository(TodoRepositoryError::persistence(
            io::Error::other("pool timed out")
        ))),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn errors_map_to_status_codes(#[case] error: ApiError, #[case] expected: StatusCode) {
        assert_eq!(error.into_response().status(), expected);
    }

    #[rstest]
    #[case(TodoDomainError::EmptyTodoName, NAME_REQUIRED)]
    #[case(TodoDomainError::TodoNameTooLong { length: 256, max: 255 }, NAME_LENGTH)]
    #[tokio::test]
    async fn domain_errors_reach_client_as_field_messages(
        #[case] domain_error: TodoDomainError,
        #[case] expected: &str,
    ) {
        let response = ApiError::Service(TodoServiceError::Domain(domain_error)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).expect("body is JSON");

        assert_eq!(json, serde_json::json!({ "name": [expected] }));
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let error = ApiError::Service(TodoServiceError::Repository(
            TodoRepositoryError::persistence(io::Error::other("password rejected")),
        ));

        let body = error
            .into_response()
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();

        assert_eq!(body.as_ref(), INTERNAL_ERROR_BODY.as_bytes());
    }
}
