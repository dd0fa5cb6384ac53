//! Read planning across the note store and the search index.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::{Note, OwnerId};
use crate::search::{IndexError, SearchIndex};
use crate::store::{NoteRepository, StoreError};

/// Errors from [`QueryRouter::search`].
#[derive(Debug, Error)]
pub enum SearchError {
    /// The search index could not answer. Not the same as zero matches.
    #[error("search is unavailable: {0}")]
    SearchUnavailable(#[source] IndexError),

    /// The note store failed while resolving hits.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Decides which store answers a read and reconciles index hits.
///
/// Blank terms are served by the note store alone and never see index lag.
/// Other terms ask the index for candidate ids, then load each id from the
/// note store in index order. Ids the store no longer has, or that belong to
/// someone else, are dropped.
pub struct QueryRouter<S: ?Sized, I: ?Sized> {
    store: Arc<S>,
    index: Arc<I>,
}

impl<S, I> QueryRouter<S, I>
where
    S: NoteRepository + ?Sized,
    I: SearchIndex + ?Sized,
{
    pub fn new(store: Arc<S>, index: Arc<I>) -> Self {
        Self { store, index }
    }

    /// Returns `owner`'s notes matching `term`.
    ///
    /// With a blank term the result equals [`NoteRepository::list_by_owner`].
    /// Otherwise the order is the index's order: most recent date first.
    pub fn search(&self, owner: OwnerId, term: &str) -> Result<Vec<Note>, SearchError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(self.store.list_by_owner(owner)?);
        }

        let ids = self
            .index
            .query(owner, term)
            .map_err(SearchError::SearchUnavailable)?;

        let mut notes = Vec::with_capacity(ids.len());
        for id in ids {
            match self.store.get(id)? {
                Some(note) if note.is_owned_by(owner) => notes.push(note),
                Some(note) => {
                    tracing::warn!(note_id = %id, owner = %owner, actual_owner = %note.owner(), "index hit for another owner dropped");
                }
                None => {
                    tracing::debug!(note_id = %id, "stale index hit dropped");
                }
            }
        }
        Ok(notes)
    }
}
