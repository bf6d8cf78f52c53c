use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use rusqlite::{params, Connection};
use tracing::info;

use super::domain::{PersonId, PersonRecord};
use super::repository::{NewPerson, PersonRepository, RepositoryError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS people (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL
);";

/// SQLite-backed person repository.
///
/// The connection is wrapped in a mutex so the repository satisfies the
/// `Send + Sync` bound the router's shared state requires; SQLite itself
/// serializes writers anyway, so the mutex costs nothing in practice.
pub struct SqlitePersonRepository {
    conn: Mutex<Connection>,
}

impl SqlitePersonRepository {
    /// Opens (or creates) the database file and bootstraps the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let conn = Connection::open(path.as_ref()).map_err(open_error)?;
        let repository = Self::bootstrap(conn)?;
        info!(path = %path.as_ref().display(), "person store ready");
        Ok(repository)
    }

    /// Opens an in-memory database, used by tests and throwaway runs.
    pub fn open_in_memory() -> Result<Self, RepositoryError> {
        let conn = Connection::open_in_memory().map_err(open_error)?;
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> Result<Self, RepositoryError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(open_error)?;
        conn.busy_timeout(Duration::from_secs(5)).map_err(open_error)?;
        conn.execute_batch(SCHEMA).map_err(open_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(
        &self,
        op: impl FnOnce(&Connection) -> Result<T, rusqlite::Error>,
    ) -> Result<T, RepositoryError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| RepositoryError::Unavailable("connection mutex poisoned".to_string()))?;
        op(&conn).map_err(|err| RepositoryError::Unavailable(err.to_string()))
    }
}

fn open_error(err: rusqlite::Error) -> RepositoryError {
    RepositoryError::Unavailable(err.to_string())
}

// Explicit column lists everywhere; rows are read positionally in the
// same order, which is the crate's single row-access contract.
fn record_from_row(row: &rusqlite::Row<'_>) -> Result<PersonRecord, rusqlite::Error> {
    Ok(PersonRecord {
        id: PersonId(row.get(0)?),
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
    })
}

impl PersonRepository for SqlitePersonRepository {
    fn insert(&self, person: NewPerson) -> Result<PersonRecord, RepositoryError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO people (first_name, last_name, email) VALUES (?1, ?2, ?3)",
                params![person.first_name, person.last_name, person.email],
            )?;
            let id = conn.last_insert_rowid();
            Ok(PersonRecord {
                id: PersonId(id),
                first_name: person.first_name,
                last_name: person.last_name,
                email: person.email,
            })
        })
    }

    fn list(&self) -> Result<Vec<PersonRecord>, RepositoryError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, first_name, last_name, email FROM people ORDER BY id ASC",
            )?;
            let rows = stmt.query_map([], record_from_row)?;
            rows.collect()
        })
    }

    fn find_by_first_name(&self, name: &str) -> Result<Vec<PersonRecord>, RepositoryError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, first_name, last_name, email FROM people
                 WHERE first_name = ?1 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(params![name], record_from_row)?;
            rows.collect()
        })
    }
}
