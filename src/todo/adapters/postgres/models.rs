//! Diesel row models for todo persistence.

use super::schema::todos;
use diesel::prelude::*;

/// Query result row for todo records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TodoRow {
    /// Store-assigned identifier.
    pub id: i64,
    /// Todo name.
    pub name: String,
    /// Completion flag.
    pub is_complete: bool,
    /// Version observed when the row was read.
    pub version: i64,
}

/// Insert model for todo records; `id` and `version` use column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todos)]
pub struct NewTodoRow {
    /// Todo name.
    pub name: String,
    /// Completion flag.
    pub is_complete: bool,
}
