//! Entry points used by request-handling code.
//!
//! [`NoteService`] is built once at startup and shared by every worker. It
//! owns the note store and search index handles and wires the mutation path
//! (store commit, then [`SyncCoordinator`]) and the read path
//! ([`QueryRouter`]). Every operation that takes a note id goes through one
//! ownership guard first.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::domain::{Note, NoteDraft, NoteId, OwnerId};
use crate::query::{QueryRouter, SearchError};
use crate::search::{IndexError, SearchIndex};
use crate::store::{NoteRepository, StoreError};
use crate::sync::{SyncCoordinator, SyncStatus};

/// Errors returned by [`NoteService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The note does not exist or belongs to another user; callers cannot
    /// tell which.
    #[error("note {0} not found")]
    NotFound(NoteId),

    /// The search index could not answer a search.
    #[error("search is unavailable: {0}")]
    SearchUnavailable(#[source] IndexError),

    /// The note store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<SearchError> for ServiceError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::SearchUnavailable(e) => ServiceError::SearchUnavailable(e),
            SearchError::Store(e) => ServiceError::Store(e),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Outcome of creating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Created {
    pub id: NoteId,
    pub sync: SyncStatus,
}

/// Outcome of rebuilding the search index from the note store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RebuildReport {
    pub indexed: usize,
    pub failed: usize,
}

/// The note core: store, index, sync and routing behind one handle.
pub struct NoteService<S: ?Sized, I: ?Sized> {
    store: Arc<S>,
    index: Arc<I>,
    sync: SyncCoordinator<I>,
    router: QueryRouter<S, I>,
}

impl<S, I> NoteService<S, I>
where
    S: NoteRepository + ?Sized,
    I: SearchIndex + ?Sized,
{
    pub fn new(store: Arc<S>, index: Arc<I>) -> Self {
        Self {
            sync: SyncCoordinator::new(Arc::clone(&index)),
            router: QueryRouter::new(Arc::clone(&store), Arc::clone(&index)),
            store,
            index,
        }
    }

    /// Returns the underlying note store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the underlying search index.
    pub fn index(&self) -> &I {
        &self.index
    }

    /// Loads a note on behalf of `owner`, or `NotFound`.
    ///
    /// This is the single ownership check in front of every id-based call.
    fn authorize(&self, owner: OwnerId, id: NoteId) -> ServiceResult<Note> {
        match self.store.get(id)? {
            Some(note) if note.is_owned_by(owner) => Ok(note),
            _ => Err(ServiceError::NotFound(id)),
        }
    }

    /// Creates a note dated today.
    pub fn create(&self, owner: OwnerId, draft: NoteDraft) -> ServiceResult<Created> {
        self.create_dated(owner, draft, Local::now().date_naive())
    }

    /// Creates a note with an explicit creation date.
    pub fn create_dated(
        &self,
        owner: OwnerId,
        draft: NoteDraft,
        date: NaiveDate,
    ) -> ServiceResult<Created> {
        let id = self.store.create(owner, &draft, date)?;
        let note = Note::new(id, owner, draft, date);
        tracing::info!(note_id = %id, owner = %owner, "note created");
        let sync = self.sync.after_save(&note);
        Ok(Created { id, sync })
    }

    /// Returns one of `owner`'s notes.
    pub fn get(&self, owner: OwnerId, id: NoteId) -> ServiceResult<Note> {
        self.authorize(owner, id)
    }

    /// Replaces title and content of one of `owner`'s notes.
    pub fn edit(&self, owner: OwnerId, id: NoteId, draft: NoteDraft) -> ServiceResult<SyncStatus> {
        let current = self.authorize(owner, id)?;
        if !self.store.update(id, &draft)? {
            // Deleted between the guard and the update.
            return Err(ServiceError::NotFound(id));
        }
        tracing::info!(note_id = %id, "note edited");
        Ok(self.sync.after_save(&current.revised(draft)))
    }

    /// Deletes one of `owner`'s notes.
    pub fn delete(&self, owner: OwnerId, id: NoteId) -> ServiceResult<SyncStatus> {
        self.authorize(owner, id)?;
        if !self.store.delete(id)? {
            return Err(ServiceError::NotFound(id));
        }
        tracing::info!(note_id = %id, "note deleted");
        Ok(self.sync.after_delete(id))
    }

    /// Lists `owner`'s notes straight from the note store, newest id first.
    pub fn list(&self, owner: OwnerId) -> ServiceResult<Vec<Note>> {
        Ok(self.store.list_by_owner(owner)?)
    }

    /// Searches `owner`'s notes. A blank term behaves like [`Self::list`].
    pub fn search(&self, owner: OwnerId, term: &str) -> ServiceResult<Vec<Note>> {
        Ok(self.router.search(owner, term)?)
    }

    /// Rebuilds the search index from the note store.
    ///
    /// Clears the index, then upserts a projection of every stored note.
    /// The store is read after the clear, so a note committed and indexed
    /// while the rebuild runs is either in the snapshot or was indexed after
    /// the clear. Notes that fail to index are counted, not fatal. Clearing
    /// failure is reported as `SearchUnavailable` since nothing was rebuilt.
    pub fn rebuild_index(&self) -> ServiceResult<RebuildReport> {
        self.index.clear().map_err(ServiceError::SearchUnavailable)?;
        let notes = self.store.list_all()?;

        let mut report = RebuildReport::default();
        for note in &notes {
            if self.sync.after_save(note).is_synced() {
                report.indexed += 1;
            } else {
                report.failed += 1;
            }
        }
        tracing::info!(
            indexed = report.indexed,
            failed = report.failed,
            "search index rebuilt"
        );
        Ok(report)
    }
}
