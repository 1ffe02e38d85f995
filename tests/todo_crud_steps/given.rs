//! Given steps for todo CRUD BDD scenarios.

use super::world::TodoCrudWorld;
use axum::http::{Method, StatusCode};
use rstest_bdd_macros::given;
use serde_json::json;
use todo_api::todo::api::TODOS_PATH;

#[given("an empty todo store")]
fn empty_store(world: &mut TodoCrudWorld) {
    *world = TodoCrudWorld::new();
}

#[given(r#"a todo named "{name}" exists"#)]
fn todo_exists(world: &mut TodoCrudWorld, name: String) -> Result<(), eyre::Report> {
    world.send(
        Method::POST,
        TODOS_PATH,
        Some(json!({"name": name, "isComplete": false})),
    )?;
    let status = world.reply()?.status;
    if status != StatusCode::CREATED {
        return Err(eyre::eyre!("seeding todo failed with status {status}"));
    }
    Ok(())
}
