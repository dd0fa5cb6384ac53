//! The denormalized note document kept in the search index.

use crate::domain::{Note, NoteId, OwnerId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Search-side copy of a note.
///
/// Derived from a committed [`Note`] and used only for matching. It is never
/// read back as note data: hits are resolved against the note store.
///
/// Serialized shape:
///
/// ```json
/// {"id": 7, "title": "Plan", "content": "rocket fuel design", "date": "2024-01-01", "owner_id": 1}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteProjection {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub owner_id: OwnerId,
}

impl From<&Note> for NoteProjection {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id(),
            title: note.title().to_string(),
            content: note.content().to_string(),
            date: note.date(),
            owner_id: note.owner(),
        }
    }
}
