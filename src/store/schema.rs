//! SQLite schema creation for the note store.

use rusqlite::Connection;

/// Current schema version recorded in `schema_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Creates the database schema for the note store.
///
/// It is idempotent - calling it multiple times is safe.
///
/// # Tables Created
/// - `notes` - Authoritative note rows
/// - `schema_version` - Schema version tracking
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    // AUTOINCREMENT keeps ids of deleted notes from being handed out again,
    // so a stale index entry can never alias a newer note.
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id INTEGER NOT NULL,
            title TEXT NOT NULL CHECK (length(trim(title)) > 0),
            content TEXT NOT NULL,
            date TEXT NOT NULL
        );",
    )?;

    conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_notes_owner ON notes(owner_id);")?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Returns the current schema version.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
}
