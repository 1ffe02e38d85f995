//! `PostgreSQL` repository implementation for todo storage.

use super::{
    models::{NewTodoRow, TodoRow},
    schema::todos,
};
use crate::todo::{
    domain::{NewTodo, Todo, TodoId, TodoName},
    ports::{TodoRepository, TodoRepositoryError, TodoRepositoryResult},
};
use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by todo adapters.
pub type TodoPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed todo repository.
///
/// Updates are guarded by the row's `version` column: the commit only
/// matches a row still at the version that was loaded.
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: TodoPgPool,
}

impl PostgresTodoRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool for `database_url` with at most `max_size`
    /// connections.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::Persistence`] when the pool cannot
    /// establish its initial connections.
    pub fn connect(database_url: &str, max_size: u32) -> TodoRepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_size)
            .build(manager)
            .map_err(TodoRepositoryError::persistence)?;
        Ok(Self::new(pool))
    }

    async fn run_blocking<F, T>(&self, f: F) -> TodoRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TodoRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TodoRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TodoRepositoryError::persistence)?
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn list_all(&self) -> TodoRepositoryResult<Vec<Todo>> {
        self.run_blocking(|connection| {
            let rows = todos::table
                .order(todos::id.asc())
                .select(TodoRow::as_select())
                .load::<TodoRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            rows.into_iter().map(row_to_todo).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        self.run_blocking(move |connection| {
            find_row(connection, id)?.map(row_to_todo).transpose()
        })
        .await
    }

    async fn exists(&self, id: TodoId) -> TodoRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            diesel::select(exists(todos::table.find(id.value())))
                .get_result::<bool>(connection)
                .map_err(TodoRepositoryError::persistence)
        })
        .await
    }

    async fn create(&self, todo: &NewTodo) -> TodoRepositoryResult<TodoId> {
        let new_row = NewTodoRow {
            name: todo.name().as_str().to_owned(),
            is_complete: todo.is_complete(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(todos::table)
                .values(&new_row)
                .returning(todos::id)
                .get_result::<i64>(connection)
                .map(TodoId::new)
                .map_err(TodoRepositoryError::persistence)
        })
        .await
    }

    async fn delete_by_id(&self, id: TodoId) -> TodoRepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(todos::table.find(id.value()))
                .execute(connection)
                .map_err(TodoRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn update(&self, todo: &Todo) -> TodoRepositoryResult<()> {
        let changes = todo.clone();
        self.run_blocking(move |connection| {
            let loaded = find_row(connection, changes.id())?
                .ok_or(TodoRepositoryError::NotFound(changes.id()))?;
            commit_row(connection, &changes, loaded.version)
        })
        .await
    }
}

impl PostgresTodoRepository {
    /// Writes the mutable fields of `changes` if the row is still at
    /// `loaded_version`.
    ///
    /// This is the commit half of [`TodoRepository::update`].
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::ConcurrentConflict`] when the row has
    /// moved past `loaded_version` or no longer exists, leaving it untouched.
    pub async fn commit(&self, changes: &Todo, loaded_version: i64) -> TodoRepositoryResult<()> {
        let changes = changes.clone();
        self.run_blocking(move |connection| commit_row(connection, &changes, loaded_version))
            .await
    }
}

fn commit_row(
    connection: &mut PgConnection,
    changes: &Todo,
    loaded_version: i64,
) -> TodoRepositoryResult<()> {
    let id = changes.id();
    let affected = diesel::update(
        todos::table
            .filter(todos::id.eq(id.value()))
            .filter(todos::version.eq(loaded_version)),
    )
    .set((
        todos::name.eq(changes.name().as_str()),
        todos::is_complete.eq(changes.is_complete()),
        todos::version.eq(todos::version + 1_i64),
    ))
    .execute(connection)
    .map_err(TodoRepositoryError::persistence)?;

    if affected == 0 {
        return Err(TodoRepositoryError::ConcurrentConflict(id));
    }
    Ok(())
}

fn find_row(connection: &mut PgConnection, id: TodoId) -> TodoRepositoryResult<Option<TodoRow>> {
    todos::table
        .find(id.value())
        .select(TodoRow::as_select())
        .first::<TodoRow>(connection)
        .optional()
        .map_err(TodoRepositoryError::persistence)
}

fn row_to_todo(row: TodoRow) -> TodoRepositoryResult<Todo> {
    let TodoRow {
        id,
        name,
        is_complete,
        version: _,
    } = row;
    let validated_name = TodoName::new(name).map_err(TodoRepositoryError::invalid_persisted_data)?;
    Ok(Todo::new(TodoId::new(id), validated_name, is_complete))
}
