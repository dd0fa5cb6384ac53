//! SearchIndex trait and index error types.

use crate::domain::{NoteId, NoteProjection, OwnerId};
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by a search index.
///
/// Every transport or engine failure collapses into `Unavailable`; callers
/// degrade their request rather than abort it.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index could not be reached, is missing, timed out or failed internally.
    #[error("search index unavailable: {reason}")]
    Unavailable { reason: String },
}

impl IndexError {
    /// Builds an `Unavailable` error from anything displayable.
    pub fn unavailable(reason: impl std::fmt::Display) -> Self {
        Self::Unavailable {
            reason: reason.to_string(),
        }
    }
}

impl From<tantivy::TantivyError> for IndexError {
    fn from(err: tantivy::TantivyError) -> Self {
        Self::unavailable(err)
    }
}

/// Result type for search index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Outcome of removing a projection from the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexDelete {
    /// The projection existed and has been removed.
    Removed,
    /// The index held nothing for this id. Callers treat this as success.
    NotInIndex,
}

/// Secondary, eventually consistent full-text index of note projections.
///
/// Implementations must make `upsert` and `delete` idempotent: repeating an
/// upsert for the same id leaves one document carrying the latest content,
/// and deleting an absent id is not an error.
pub trait SearchIndex: Send + Sync {
    /// Inserts or replaces the projection keyed by its note id.
    fn upsert(&self, projection: &NoteProjection) -> IndexResult<()>;

    /// Removes the projection for `id`, if any.
    fn delete(&self, id: NoteId) -> IndexResult<IndexDelete>;

    /// Returns ids of `owner`'s projections matching `term`, most recent date first.
    ///
    /// `term` is fuzzily matched against title and content; a hit needs at
    /// least one field to match. A blank term returns all of the owner's
    /// projections.
    fn query(&self, owner: OwnerId, term: &str) -> IndexResult<Vec<NoteId>>;

    /// Drops every projection. Used before rebuilding from the note store.
    fn clear(&self) -> IndexResult<()>;
}

impl<T: SearchIndex + ?Sized> SearchIndex for Arc<T> {
    fn upsert(&self, projection: &NoteProjection) -> IndexResult<()> {
        (**self).upsert(projection)
    }

    fn delete(&self, id: NoteId) -> IndexResult<IndexDelete> {
        (**self).delete(id)
    }

    fn query(&self, owner: OwnerId, term: &str) -> IndexResult<Vec<NoteId>> {
        (**self).query(owner, term)
    }

    fn clear(&self) -> IndexResult<()> {
        (**self).clear()
    }
}

/// Index stand-in used when the real index could not be provisioned.
///
/// Every call fails with `Unavailable`, so writes degrade and searches report
/// the outage instead of the process refusing to start.
#[derive(Debug, Clone)]
pub struct UnavailableIndex {
    reason: String,
}

impl UnavailableIndex {
    /// Creates a stand-in that reports `reason` on every call.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> IndexError {
        IndexError::unavailable(&self.reason)
    }
}

impl SearchIndex for UnavailableIndex {
    fn upsert(&self, _projection: &NoteProjection) -> IndexResult<()> {
        Err(self.error())
    }

    fn delete(&self, _id: NoteId) -> IndexResult<IndexDelete> {
        Err(self.error())
    }

    fn query(&self, _owner: OwnerId, _term: &str) -> IndexResult<Vec<NoteId>> {
        Err(self.error())
    }

    fn clear(&self) -> IndexResult<()> {
        Err(self.error())
    }
}
