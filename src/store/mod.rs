//! The note store: relational system of record for notes

mod repository;
mod schema;
mod sqlite;

pub use repository::{NoteRepository, StoreError, StoreResult};
pub use schema::{SCHEMA_VERSION, create_schema, get_schema_version};
pub use sqlite::{SqliteNoteStore, Transaction};
