//! When steps for todo CRUD BDD scenarios.

use super::world::TodoCrudWorld;
use axum::http::Method;
use rstest_bdd_macros::when;
use serde_json::json;
use todo_api::todo::api::TODOS_PATH;

fn todo_uri(id: i64) -> String {
    format!("{TODOS_PATH}/{id}")
}

#[when(r#"a todo named "{name}" is created"#)]
fn create_named_todo(world: &mut TodoCrudWorld, name: String) -> Result<(), eyre::Report> {
    world.send(
        Method::POST,
        TODOS_PATH,
        Some(json!({"name": name, "isComplete": false})),
    )
}

#[when("a todo without a name is created")]
fn create_unnamed_todo(world: &mut TodoCrudWorld) -> Result<(), eyre::Report> {
    world.send(Method::POST, TODOS_PATH, Some(json!({"isComplete": false})))
}

#[when(r#"todo {id:i64} is updated to "{name}" and marked complete"#)]
fn update_todo(world: &mut TodoCrudWorld, id: i64, name: String) -> Result<(), eyre::Report> {
    world.send(
        Method::PUT,
        &todo_uri(id),
        Some(json!({"id": id, "name": name, "isComplete": true})),
    )
}

#[when("todo {id:i64} is updated with payload id {payload_id:i64}")]
fn update_with_other_id(
    world: &mut TodoCrudWorld,
    id: i64,
    payload_id: i64,
) -> Result<(), eyre::Report> {
    world.send(
        Method::PUT,
        &todo_uri(id),
        Some(json!({"id": payload_id, "name": "Renamed", "isComplete": true})),
    )
}

#[when("todo {id:i64} is fetched")]
fn fetch_todo(world: &mut TodoCrudWorld, id: i64) -> Result<(), eyre::Report> {
    world.send(Method::GET, &todo_uri(id), None)
}

#[when("todo {id:i64} is deleted")]
fn delete_todo(world: &mut TodoCrudWorld, id: i64) -> Result<(), eyre::Report> {
    world.send(Method::DELETE, &todo_uri(id), None)
}
