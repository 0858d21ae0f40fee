//! Repository layer over the blog tables.
//!
//! # Responsibility
//! - Keep SQL inside the persistence boundary.
//! - Translate SQLite constraint failures into semantic errors.
//!
//! # Invariants
//! - Repositories never pre-check uniqueness; the store decides at insert.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use rusqlite::{ffi, Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod post_repo;
pub mod tag_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for blog persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Transport or statement failure not covered by another variant.
    Db(DbError),
    /// Duplicate username, slug, tag name or post/tag pair.
    UniqueViolation { detail: String },
    /// A row references a user, post or tag that does not exist.
    ForeignKeyViolation { detail: String },
    /// Connection is missing a table this repository needs.
    MissingRequiredTable(&'static str),
    InvalidData(String),
}

impl RepoError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UniqueViolation { detail } => write!(f, "unique constraint violated: {detail}"),
            Self::ForeignKeyViolation { detail } => {
                write!(f, "foreign key constraint violated: {detail}")
            }
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted blog data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => Self::from(err),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &value {
            if failure.code == ErrorCode::ConstraintViolation {
                let detail = message.clone().unwrap_or_else(|| failure.to_string());
                match failure.extended_code {
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                        return Self::UniqueViolation { detail };
                    }
                    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                        return Self::ForeignKeyViolation { detail };
                    }
                    _ => {}
                }
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn ensure_tables(conn: &Connection, tables: &[&'static str]) -> RepoResult<()> {
    for &table in tables {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

pub(crate) fn parse_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{ensure_tables, parse_bool, RepoError};
    use rusqlite::Connection;

    fn scratch_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE parent (id INTEGER PRIMARY KEY, name TEXT UNIQUE);
             CREATE TABLE child (
                 a INTEGER NOT NULL REFERENCES parent(id),
                 b INTEGER NOT NULL,
                 PRIMARY KEY (a, b)
             );
             INSERT INTO parent (id, name) VALUES (1, 'one');",
        )
        .unwrap();
        conn
    }

    #[test]
    fn duplicate_unique_column_maps_to_unique_violation() {
        let conn = scratch_conn();
        let err = conn
            .execute("INSERT INTO parent (name) VALUES ('one');", [])
            .unwrap_err();
        let err = RepoError::from(err);
        assert!(err.is_unique_violation(), "unexpected error: {err:?}");
        assert!(err.to_string().contains("parent.name"));
    }

    #[test]
    fn duplicate_composite_key_maps_to_unique_violation() {
        let conn = scratch_conn();
        conn.execute("INSERT INTO child (a, b) VALUES (1, 1);", [])
            .unwrap();
        let err = conn
            .execute("INSERT INTO child (a, b) VALUES (1, 1);", [])
            .unwrap_err();
        assert!(RepoError::from(err).is_unique_violation());
    }

    #[test]
    fn dangling_reference_maps_to_foreign_key_violation() {
        let conn = scratch_conn();
        let err = conn
            .execute("INSERT INTO child (a, b) VALUES (42, 1);", [])
            .unwrap_err();
        assert!(matches!(
            RepoError::from(err),
            RepoError::ForeignKeyViolation { .. }
        ));
    }

    #[test]
    fn other_sqlite_errors_stay_db_errors() {
        let conn = scratch_conn();
        let err = conn.execute("SELECT * FROM missing;", []).unwrap_err();
        assert!(matches!(RepoError::from(err), RepoError::Db(_)));
    }

    #[test]
    fn ensure_tables_reports_first_missing_table() {
        let conn = scratch_conn();
        ensure_tables(&conn, &["parent", "child"]).unwrap();
        let err = ensure_tables(&conn, &["parent", "users"]).unwrap_err();
        assert!(matches!(err, RepoError::MissingRequiredTable("users")));
    }

    #[test]
    fn parse_bool_rejects_out_of_range_values() {
        assert!(!parse_bool(0, "users.is_admin").unwrap());
        assert!(parse_bool(1, "users.is_admin").unwrap());
        assert!(matches!(
            parse_bool(7, "users.is_admin"),
            Err(RepoError::InvalidData(_))
        ));
    }
}
