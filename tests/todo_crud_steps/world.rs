//! Shared world state for todo CRUD BDD scenarios.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use eyre::WrapErr;
use http_body_util::BodyExt;
use rstest::fixture;
use serde_json::Value;
use todo_api::todo::{adapters::memory::InMemoryTodoRepository, api::router};
use tower::ServiceExt;

/// Captured HTTP response.
pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Reply {
    /// Parses the body as JSON.
    pub fn json(&self) -> Result<Value, eyre::Report> {
        serde_json::from_slice(&self.body).wrap_err("response body is not JSON")
    }
}

/// Scenario world for todo CRUD behaviour tests.
pub struct TodoCrudWorld {
    pub app: Router,
    pub last_reply: Option<Reply>,
}

impl TodoCrudWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            app: router(Arc::new(InMemoryTodoRepository::new())),
            last_reply: None,
        }
    }

    /// Sends a request and records the reply.
    pub fn send(
        &mut self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Result<(), eyre::Report> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(payload) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string())),
            None => builder.body(Body::empty()),
        }
        .wrap_err("build request")?;

        let app = self.app.clone();
        let reply = run_async(async move {
            let response = app.oneshot(request).await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.into_body().collect().await?.to_bytes();
            Ok::<_, eyre::Report>(Reply {
                status,
                headers,
                body,
            })
        })?;
        self.last_reply = Some(reply);
        Ok(())
    }

    /// Returns the most recent reply.
    pub fn reply(&self) -> Result<&Reply, eyre::Report> {
        self.last_reply
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no request has been sent in this scenario"))
    }
}

impl Default for TodoCrudWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TodoCrudWorld {
    TodoCrudWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
