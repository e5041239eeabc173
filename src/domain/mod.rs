//! Core types: Note and NoteId

mod note;
mod note_id;

pub use note::{Note, PREVIEW_CHARS, UNTITLED};
pub use note_id::{NoteId, ParseNoteIdError};
