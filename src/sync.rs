//! Propagation of committed note mutations to the search index.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::{Note, NoteId, NoteProjection};
use crate::search::{IndexDelete, SearchIndex};

/// How far a mutation got after its note store commit.
///
/// There is no failed state: a status only exists once the note store has
/// committed, and that commit stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SyncStatus {
    /// The index reflects the mutation.
    Synced,
    /// The note store committed but the index call failed.
    Degraded { reason: String },
}

impl SyncStatus {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncStatus::Synced)
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStatus::Synced => write!(f, "synced"),
            SyncStatus::Degraded { reason } => write!(f, "degraded ({})", reason),
        }
    }
}

/// Runs the index half of every mutation.
///
/// Called only after the note store has committed. Index failures are logged
/// and reported as [`SyncStatus::Degraded`]; they are never retried here.
pub struct SyncCoordinator<I: ?Sized> {
    index: Arc<I>,
}

impl<I: SearchIndex + ?Sized> SyncCoordinator<I> {
    pub fn new(index: Arc<I>) -> Self {
        Self { index }
    }

    /// Indexes a note that was just created or edited.
    pub fn after_save(&self, note: &Note) -> SyncStatus {
        let projection = NoteProjection::from(note);
        match self.index.upsert(&projection) {
            Ok(()) => SyncStatus::Synced,
            Err(err) => {
                tracing::warn!(note_id = %note.id(), error = %err, "note saved but not indexed");
                SyncStatus::Degraded {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Removes a note that was just deleted from the store.
    pub fn after_delete(&self, id: NoteId) -> SyncStatus {
        match self.index.delete(id) {
            Ok(IndexDelete::Removed) => SyncStatus::Synced,
            Ok(IndexDelete::NotInIndex) => {
                tracing::debug!(note_id = %id, "deleted note was not in the index");
                SyncStatus::Synced
            }
            Err(err) => {
                tracing::warn!(note_id = %id, error = %err, "note deleted but still indexed");
                SyncStatus::Degraded {
                    reason: err.to_string(),
                }
            }
        }
    }
}
