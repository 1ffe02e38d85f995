//! Then steps for todo CRUD BDD scenarios.

use super::world::TodoCrudWorld;
use axum::http::header;
use rstest_bdd_macros::then;
use serde_json::json;

#[then("the response status is {status:u16}")]
fn response_status_is(world: &TodoCrudWorld, status: u16) -> Result<(), eyre::Report> {
    let actual = world.reply()?.status;
    if actual.as_u16() != status {
        return Err(eyre::eyre!("expected status {status}, found {actual}"));
    }
    Ok(())
}

#[then(r#"the response location is "{location}""#)]
fn response_location_is(world: &TodoCrudWorld, location: String) -> Result<(), eyre::Report> {
    let actual = world
        .reply()?
        .headers
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| eyre::eyre!("response has no Location header"))?;
    if actual != location {
        return Err(eyre::eyre!("expected location {location}, found {actual}"));
    }
    Ok(())
}

#[then(r#"the fetched todo is named "{name}" and complete"#)]
fn fetched_todo_is_complete(world: &TodoCrudWorld, name: String) -> Result<(), eyre::Report> {
    let body = world.reply()?.json()?;
    let expected_name = json!(name);
    if body.get("name") != Some(&expected_name) {
        return Err(eyre::eyre!("expected todo named {name}, got {body}"));
    }
    if body.get("isComplete") != Some(&json!(true)) {
        return Err(eyre::eyre!("expected a completed todo, got {body}"));
    }
    Ok(())
}

#[then(r#"the "{field}" field error is "{message}""#)]
fn field_error_is(
    world: &TodoCrudWorld,
    field: String,
    message: String,
) -> Result<(), eyre::Report> {
    let body = world.reply()?.json()?;
    let expected = json!([message]);
    if body.get(field.as_str()) != Some(&expected) {
        return Err(eyre::eyre!(
            "expected {field} error {expected}, got {body}"
        ));
    }
    Ok(())
}
