//! JSON encoding of a note collection for storage and backup files.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use super::StoreError;
use crate::domain::Note;

/// Suggested file name for an exported backup.
pub const BACKUP_FILENAME: &str = "study-notes-backup.json";

/// Reasons an import can be rejected.
///
/// Every variant leaves the existing collection untouched.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The document is not valid JSON.
    #[error("could not read backup file: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The top-level value is valid JSON but not an array.
    #[error("invalid backup file: expected an array of notes")]
    NotAnArray,

    /// An array element could not be read as a note.
    #[error("invalid backup file: entry {index} is not a note: {source}")]
    InvalidNote {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Two entries share an id.
    #[error("invalid backup file: duplicate note id '{id}'")]
    DuplicateId { id: String },

    /// The new collection could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ImportError {
    /// True for rejections caused by the shape of the document.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            ImportError::NotAnArray | ImportError::InvalidNote { .. } | ImportError::DuplicateId { .. }
        )
    }

    /// True when the document could not be parsed at all.
    pub fn is_read_error(&self) -> bool {
        matches!(self, ImportError::Malformed(_))
    }
}

/// Parses a JSON array of notes, enforcing unique ids.
pub fn parse_collection(document: &str) -> Result<Vec<Note>, ImportError> {
    let value: Value = serde_json::from_str(document).map_err(ImportError::Malformed)?;
    let Value::Array(items) = value else {
        return Err(ImportError::NotAnArray);
    };

    let mut seen = HashSet::with_capacity(items.len());
    let mut notes = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let note: Note = serde_json::from_value(item)
            .map_err(|source| ImportError::InvalidNote { index, source })?;
        if !seen.insert(note.id().clone()) {
            return Err(ImportError::DuplicateId {
                id: note.id().to_string(),
            });
        }
        notes.push(note);
    }
    Ok(notes)
}

/// Compact encoding used for the storage key.
pub fn encode_collection(notes: &[Note]) -> Result<String, serde_json::Error> {
    serde_json::to_string(notes)
}

/// Pretty encoding (two-space indent) used for backup files.
pub fn render_backup(notes: &[Note]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(notes)
}
