//! Domain value validation tests.

use crate::todo::domain::{NewTodo, Todo, TodoDomainError, TodoId, TodoName};
use rstest::rstest;

#[rstest]
#[case(1)]
#[case(255)]
fn todo_name_accepts_lengths_within_bounds(#[case] length: usize) {
    let name = TodoName::new("x".repeat(length)).expect("name within bounds");
    assert_eq!(name.as_str().len(), length);
}

#[rstest]
#[case("")]
#[case(" ")]
#[case("\t \n")]
fn todo_name_rejects_blank_values(#[case] value: &str) {
    assert_eq!(TodoName::new(value), Err(TodoDomainError::EmptyTodoName));
}

#[test]
fn todo_name_keeps_surrounding_whitespace() {
    let name = TodoName::new("  padded  ").expect("non-blank name");
    assert_eq!(name.as_str(), "  padded  ");
}

#[test]
fn todo_name_rejects_more_than_255_characters() {
    assert_eq!(
        TodoName::new("x".repeat(256)),
        Err(TodoDomainError::TodoNameTooLong {
            length: 256,
            max: 255,
        })
    );
}

#[test]
fn todo_name_counts_multibyte_characters_once() {
    let name = TodoName::new("ß".repeat(255)).expect("255 characters fit");
    assert_eq!(name.as_str().chars().count(), 255);
}

#[test]
fn todo_name_deserialization_validates() {
    let result = serde_json::from_str::<TodoName>(r#""""#);
    assert!(result.is_err());
}

#[test]
fn apply_changes_keeps_identifier() {
    let mut stored = Todo::new(
        TodoId::new(1),
        TodoName::new("before").expect("valid name"),
        false,
    );
    let changes = Todo::new(
        TodoId::new(99),
        TodoName::new("after").expect("valid name"),
        true,
    );

    stored.apply_changes(&changes);

    assert_eq!(stored.id(), TodoId::new(1));
    assert_eq!(stored.name().as_str(), "after");
    assert!(stored.is_complete());
}

#[test]
fn new_todo_with_id_preserves_fields() {
    let new_todo = NewTodo::new(TodoName::new("Buy milk").expect("valid name"), true);

    let todo = new_todo.with_id(TodoId::new(5));

    assert_eq!(todo.id(), TodoId::new(5));
    assert_eq!(todo.name().as_str(), "Buy milk");
    assert!(todo.is_complete());
}
