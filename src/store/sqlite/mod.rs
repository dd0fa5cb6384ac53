//! SQLite-backed note store implementation.

mod connection;
mod repo_impl;
mod transaction;


use parking_lot::Mutex;
use rusqlite::Connection;

pub use transaction::Transaction;

/// SQLite-backed note store.
///
/// Owns a single connection behind a mutex so one store can be shared by
/// every request worker; SQLite transactions provide the isolation.
pub struct SqliteNoteStore {
    pub(crate) conn: Mutex<Connection>,
}
