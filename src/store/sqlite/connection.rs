//! Connection management for SqliteNoteStore.

use super::SqliteNoteStore;
use crate::store::{StoreError, StoreResult, create_schema};
use parking_lot::{Mutex, MutexGuard};
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

impl SqliteNoteStore {
    /// Opens an in-memory SQLite database with the note schema.
    ///
    /// This is useful for testing and for callers that don't need persistence.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        create_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens or creates a SQLite database at the given path.
    ///
    /// Creates parent directories if they don't exist. Initializes the schema
    /// if this is a new database.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        create_schema(&conn)?;
        tracing::debug!(path = %path.display(), "note store opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Locks and returns the underlying SQLite connection.
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }
}
