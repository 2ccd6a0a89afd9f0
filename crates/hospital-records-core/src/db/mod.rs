//! Database layer for hospital records.

mod departments;
mod doctors;
mod patients;
mod prescriptions;
mod schema;

pub use schema::*;

use rusqlite::{ffi, Connection, ErrorCode, OptionalExtension};
use std::path::Path;
use thiserror::Error;

use crate::ids::EntityKind;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Classify a failed INSERT; a primary-key clash names the offending key.
pub(crate) fn insert_error(err: rusqlite::Error, key: &str) -> DbError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            DbError::DuplicateKey(key.to_string())
        }
        rusqlite::Error::SqliteFailure(e, msg) if e.code == ErrorCode::ConstraintViolation => {
            DbError::Constraint(msg.clone().unwrap_or_else(|| e.to_string()))
        }
        _ => DbError::Sqlite(err),
    }
}

/// Classify a failed UPDATE.
pub(crate) fn write_error(err: rusqlite::Error) -> DbError {
    match &err {
        rusqlite::Error::SqliteFailure(e, msg) if e.code == ErrorCode::ConstraintViolation => {
            DbError::Constraint(msg.clone().unwrap_or_else(|| e.to_string()))
        }
        _ => DbError::Sqlite(err),
    }
}

/// Database connection wrapper.
///
/// Dropping it closes the connection; an uncommitted [`rusqlite::Transaction`]
/// rolls back when dropped.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction on the shared connection.
    ///
    /// Statements issued through `self` while the guard is alive belong to
    /// it. Nested calls fail with a SQLite error.
    pub fn transaction(&self) -> DbResult<rusqlite::Transaction<'_>> {
        Ok(self.conn.unchecked_transaction()?)
    }

    /// Existence check on a table's ID column. Discloses nothing beyond the
    /// boolean.
    pub fn exists(&self, kind: EntityKind, id: &str) -> DbResult<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)",
            kind.table()
        );
        let found: bool = self.conn.query_row(&sql, [id], |row| row.get(0))?;
        Ok(found)
    }

    /// Current display name of a record, for snapshotting into dependents.
    pub fn display_name(&self, kind: EntityKind, id: &str) -> DbResult<Option<String>> {
        let Some(column) = kind.name_column() else {
            return Ok(None);
        };
        let sql = format!("SELECT {} FROM {} WHERE id = ?1", column, kind.table());
        self.conn
            .query_row(&sql, [id], |row| row.get(0))
            .optional()
            .map_err(Into::into)
    }

    /// Row count of the kind's table.
    pub fn count(&self, kind: EntityKind) -> DbResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
