//! Note records and validated note payloads.

use crate::domain::{NoteId, OwnerId};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// The kind of error that occurred when constructing a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseNoteErrorKind {
    EmptyTitle,
}

/// Error returned when constructing an invalid note.
#[derive(Debug, Clone)]
pub struct ParseNoteError {
    kind: ParseNoteErrorKind,
}

impl fmt::Display for ParseNoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseNoteErrorKind::EmptyTitle => write!(f, "invalid note: title cannot be empty"),
        }
    }
}

impl std::error::Error for ParseNoteError {}

/// The editable part of a note: what a create or edit request carries.
///
/// # Examples
///
/// ```
/// use forgegrid::domain::NoteDraft;
///
/// let draft = NoteDraft::new("  Plan ", "rocket fuel design").unwrap();
/// assert_eq!(draft.title(), "Plan");
/// assert!(NoteDraft::new("   ", "body").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    title: String,
    content: String,
}

impl NoteDraft {
    /// Creates a draft, trimming the title.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if the title is empty or whitespace-only.
    /// Content may be empty.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, ParseNoteError> {
        let title = title.into();
        let trimmed = title.trim();

        if trimmed.is_empty() {
            return Err(ParseNoteError {
                kind: ParseNoteErrorKind::EmptyTitle,
            });
        }

        Ok(Self {
            title: trimmed.to_string(),
            content: content.into(),
        })
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the content.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A note as held by the note store, the authoritative record.
///
/// `date` is the calendar date of original authorship. Edits replace title
/// and content but never the date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    id: NoteId,
    #[serde(rename = "owner_id")]
    owner: OwnerId,
    title: String,
    content: String,
    date: NaiveDate,
}

impl Note {
    /// Assembles a note from a stored id, owner and validated draft.
    pub fn new(id: NoteId, owner: OwnerId, draft: NoteDraft, date: NaiveDate) -> Self {
        Self {
            id,
            owner,
            title: draft.title,
            content: draft.content,
            date,
        }
    }

    /// Returns the note's identifier.
    pub fn id(&self) -> NoteId {
        self.id
    }

    /// Returns the owning user.
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the creation date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns true if `owner` owns this note.
    pub fn is_owned_by(&self, owner: OwnerId) -> bool {
        self.owner == owner
    }

    /// Returns a copy of this note with title and content taken from `draft`.
    ///
    /// Identity, owner and date are carried over unchanged.
    pub fn revised(&self, draft: NoteDraft) -> Self {
        Self::new(self.id, self.owner, draft, self.date)
    }
}
