//! NoteRepository trait and store error types.

use crate::domain::{Note, NoteDraft, NoteId, OwnerId};
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during note store operations.
///
/// Every variant is a hard failure for the operation that hit it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored row could not be decoded into a note.
    #[error("corrupt note row: {0}")]
    Corrupt(String),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for note store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The system of record for notes.
///
/// Operations are transactional with respect to the store alone and know
/// nothing about the search index. The store checks existence only;
/// ownership is the caller's concern.
pub trait NoteRepository: Send + Sync {
    /// Persists a new note and returns its freshly assigned id.
    fn create(&self, owner: OwnerId, draft: &NoteDraft, date: NaiveDate) -> StoreResult<NoteId>;

    /// Retrieves a note by id.
    fn get(&self, id: NoteId) -> StoreResult<Option<Note>>;

    /// Replaces title and content. Returns `false` if the note does not exist.
    fn update(&self, id: NoteId, draft: &NoteDraft) -> StoreResult<bool>;

    /// Removes a note. Returns `false` if the note does not exist.
    fn delete(&self, id: NoteId) -> StoreResult<bool>;

    /// Lists an owner's notes, most recent id first.
    fn list_by_owner(&self, owner: OwnerId) -> StoreResult<Vec<Note>>;

    /// Lists every note in the store, most recent id first.
    fn list_all(&self) -> StoreResult<Vec<Note>>;
}
