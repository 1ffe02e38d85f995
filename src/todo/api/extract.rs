//! Request extractors that report failures as [`ApiError`].

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header, request::Parts},
};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::todo::domain::TodoId;

/// Todo identifier taken from the `{id}` route segment.
#[derive(Debug, Clone, Copy)]
pub struct RouteTodoId(pub TodoId);

impl<S> FromRequestParts<S> for RouteTodoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::InvalidRouteId(rejection.body_text()))?;
        Ok(Self(TodoId::new(id)))
    }
}

/// JSON request body that must be present.
///
/// A missing body, a non-JSON content type, or a JSON `null` becomes
/// [`ApiError::MissingPayload`]; unparsable JSON becomes
/// [`ApiError::MalformedPayload`].
#[derive(Debug, Clone)]
pub struct JsonPayload<T>(pub T);

impl<S, T> FromRequest<S> for JsonPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let declares_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_json_content_type);
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::MalformedPayload(rejection.body_text()))?;

        if !declares_json || body.is_empty() {
            return Err(ApiError::MissingPayload);
        }

        match Json::<Option<T>>::from_bytes(&body) {
            Ok(Json(Some(payload))) => Ok(Self(payload)),
            Ok(Json(None)) => Err(ApiError::MissingPayload),
            Err(rejection) => Err(ApiError::MalformedPayload(rejection.body_text())),
        }
    }
}

fn is_json_content_type(value: &str) -> bool {
    let mime = value.split(';').next().unwrap_or_default().trim();
    mime.eq_ignore_ascii_case("application/json")
        || (mime.starts_with("application/") && mime.ends_with("+json"))
}
