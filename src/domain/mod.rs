//! Core types: Note, NoteDraft, NoteProjection and the integer ids

mod note;
mod note_id;
mod projection;

pub use note::{Note, NoteDraft, ParseNoteError};
pub use note_id::{NoteId, OwnerId, ParseIdError};
pub use projection::NoteProjection;
