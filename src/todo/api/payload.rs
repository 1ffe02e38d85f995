//! Wire payloads accepted by the todo HTTP endpoints.
//!
//! Every field is optional on the wire so that a missing field is reported
//! through validation with a field-level message rather than as a
//! deserialisation failure.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::todo::{
    domain::{TodoDomainError, TodoId},
    services::{NewTodoRequest, TodoUpdateRequest},
};

pub(super) const NAME_REQUIRED: &str = "The Name field of the Todo is required.";
pub(super) const NAME_LENGTH: &str = "The Name field must be between 1 and 255 characters.";
const IS_COMPLETE_REQUIRED: &str = "The IsComplete field of the Todo is required.";
const ID_REQUIRED: &str = "The Id field of the Todo is required.";

/// Field-level validation messages keyed by wire field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates a map holding one message for one field.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(BTreeMap::from([(field.into(), vec![message.into()])]))
    }

    /// Returns the messages recorded for `field`.
    #[must_use]
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Returns whether no field has messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, field_errors)| {
                let messages = field_errors
                    .iter()
                    .map(|error| {
                        error
                            .message
                            .as_ref()
                            .map_or_else(|| error.code.to_string(), ToString::to_string)
                    })
                    .collect();
                (wire_field_name(&field), messages)
            })
            .collect();
        Self(fields)
    }
}

/// Converts a Rust field name (`is_complete`) to its wire form (`isComplete`).
fn wire_field_name(field: &str) -> String {
    let mut wire = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if/// JSON body of `POST /api/v1/todos`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTodoPayload {
    /// Todo name.
    #[validate(
        required(message = "The Name field of the Todo is required."),
        custom(function = "reject_blank_name"),
        length(max = 255, message = "The Name field must be between 1 and 255 characters.")
    )]
    pub name: Option<String>,
    /// Completion flag.
    #[validate(required(message = "The IsComplete field of the Todo is required."))]
    pub is_complete: Option<bool>,
}

impl NewTodoPayload {
    /// Validates the payload and converts it into a service request.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] describing every missing or invalid field.
    pub fn into_request(self) -> Result<NewTodoRequest, FieldErrors> {
        self.validate()?;
        let name = required(self.name, "name", NAME_REQUIRED)?;
        let is_complete = required(self.is_complete, "isComplete", IS_COMPLETE_REQUIRED)?;
        Ok(NewTodoRequest::new(name, is_complete))
    }
}

/// JSON body of `PUT /api/v1/todos/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdatePayload {
    /// Identifier of the todo; must match the route.
    #[validate(required(message = "The Id field of the Todo is required."))]
    pub id: Option<i64>,
    /// New todo name.
    #[validate(
        required(message = "The Name field of the Todo is required."),
        custom(function = "reject_blank_name"),
        length(max = 255, message = "The Name field must be between 1 and 255 characters.")
    )]
    pub name: Option<String>,
    /// New completion flag.
    #[validate(required(message = "The IsComplete field of the Todo is required."))]
    pub is_complete: Option<bool>,
}

impl TodoUpdatePayload {
    /// Validates the payload and converts it into a service request.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] describing every missing or invalid field.
    pub fn into_request(self) -> Result<TodoUpdateRequest, FieldErrors> {
        self.validate()?;
        let id = required(self.id, "id", ID_REQUIRED)?;
        let name = required(self.name, "name", NAME_REQUIRED)?;
        let is_complete = required(self.is_complete, "isComplete", IS_COMPLETE_REQUIRED)?;
        Ok(TodoUpdateRequest::new(TodoId::new(id), name, is_complete))
    }
}

/// Unwraps a field that `validate` has already checked for presence.
fn required<T>(value: Option<T>, field: &str, message: &str) -> Result<T, FieldErrors> {
    value.ok_or_else(|| FieldErrors::single(field, message))
}

/// An empty or whitespace-only name counts as missing.
fn reject_blank_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(NAME_REQUIRED)));
    }
    Ok(())
}

/// Returns the wire message for a name rejected by the domain.
pub(super) const fn name_message(error: &TodoDomainError) -> &'static str {
    match error {
        TodoDomainError::EmptyTodoName => NAME_REQUIRED,
        TodoDomainError::TodoNameTooLong { .. } => NAME_LENGTH,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        FieldErrors, ID_REQUIRED, IS_COMPLETE_REQUIRED, NAME_LENGTH, NAME_REQUIRED,
        NewTodoPayload, TodoUpdatePayload, name_message, wire_field_name,
    };
    use crate::todo::domain::{TodoDomainError, TodoId};
    use rstest::rstest;

    fn name_of(length: usize) -> String {
        "*".repeat(length)
    }

    #[test]
    fn new_payload_without_name_reports_required_message() {
        let payload: NewTodoPayload =
            serde_json::from_str(r#"{"isComplete":true}"#).expect("payload parses");

        let errors = payload.into_request().expect_err("name is required");

        assert_eq!(errors.messages("name"), Some([NAME_REQUIRED.to_owned()].as_slice()));
        assert_eq!(errors.messages("isComplete"), None);
    }

    #[test]
    fn new_payload_without_is_complete_reports_camel_case_field() {
        let payload: NewTodoPayload =
            serde_json::from_str(r#"{"name":"Hello World"}"#).expect("payload parses");

        let errors = payload.into_request().expect_err("isComplete is required");

        assert_eq!(
            errors.messages("isComplete"),
            Some([IS_COMPLETE_REQUIRED.to_owned()].as_slice())
        );
        assert_eq!(errors.messages("name"), None);
    }

    #[test]
    fn new_payload_rejects_overlong_name() {
        let payload = NewTodoPayload {
            name: Some(name_of(256)),
            is_complete: Some(true),
        };

        let errors = payload.into_request().expect_err("name length is bounded");

        assert_eq!(errors.messages("name"), Some([NAME_LENGTH.to_owned()].as_slice()));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_name_is_reported_as_missing(#[case] name: &str) {
        let payload = NewTodoPayload {
            name: Some(name.to_owned()),
            is_complete: Some(true),
        };

        let errors = payload.into_request().expect_err("blank name is rejected");

        assert_eq!(errors.messages("name"), Some([NAME_REQUIRED.to_owned()].as_slice()));
    }

    #[test]
    fn update_payload_rejects_blank_name() {
        let payload = TodoUpdatePayload {
            id: Some(1),
            name: Some("  ".to_owned()),
            is_complete: Some(false),
        };

        let errors = payload.into_request().expect_err("blank name is rejected");

        assert_eq!(errors.messages("name"), Some([NAME_REQUIRED.to_owned()].as_slice()));
    }

    #[rstest]
    #[case(TodoDomainError::EmptyTodoName, NAME_REQUIRED)]
    #[case(TodoDomainError::TodoNameTooLong { length: 300, max: 255 }, NAME_LENGTH)]
    fn domain_errors_use_wire_messages(#[case] error: TodoDomainError, #[case] expected: &str) {
        assert_eq!(name_message(&error), expected);
    }

    #[rstest]
    #[case(1)]
    #[case(100)]
    #[case(255)]
    fn new_payload_accepts_name_within_bounds(#[case] length: usize) {
        let payload = NewTodoPayload {
            name: Some(name_of(length)),
            is_complete: Some(false),
        };

        let request = payload.into_request().expect("payload is valid");

        assert_eq!(request.name.chars().count(), length);
        assert!(!request.is_complete);
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        let payload = NewTodoPayload {
            name: Some("é".repeat(255)),
            is_complete: Some(true),
        };

        assert!(payload.into_request().is_ok());
    }

    #[test]
    fn update_payload_without_id_reports_required_message() {
        let payload: TodoUpdatePayload =
            serde_json::from_str(r#"{"name":"Hello World","isComplete":true}"#)
                .expect("payload parses");

        let errors = payload.into_request().expect_err("id is required");

        assert_eq!(errors.messages("id"), Some([ID_REQUIRED.to_owned()].as_slice()));
    }

    #[test]
    fn update_payload_reports_every_missing_field() {
        let payload: TodoUpdatePayload = serde_json::from_str("{}").expect("payload parses");

        let errors = payload.into_request().expect_err("all fields are required");

        assert!(errors.messages("id").is_some());
        assert!(errors.messages("name").is_some());
        assert!(errors.messages("isComplete").is_some());
    }

    #[test]
    fn valid_update_payload_converts_to_request() {
        let payload: TodoUpdatePayload =
            serde_json::from_str(r#"{"id":3,"name":"Buy milk","isComplete":true}"#)
                .expect("payload parses");

        let request = payload.into_request().expect("payload is valid");

        assert_eq!(request.id, TodoId::new(3));
        assert_eq!(request.name, "Buy milk");
        assert!(request.is_complete);
    }

    #[test]
    fn field_errors_serialize_as_plain_map() {
        let errors = FieldErrors::single("name", NAME_REQUIRED);

        let json = serde_json::to_value(&errors).expect("serializes");

        assert_eq!(json, serde_json::json!({ "name": [NAME_REQUIRED] }));
    }

    #[rstest]
    #[case("name", "name")]
    #[case("is_complete", "isComplete")]
    #[case("id", "id")]
    fn wire_field_name_uses_camel_case(#[case] field: &str, #[case] expected: &str) {
        assert_eq!(wire_field_name(field), expected);
    }
}
