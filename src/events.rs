//! Adapter from UI events to note store calls.
//!
//! A front end (the CLI here) turns user gestures into [`UiEvent`]s and
//! renders the [`Outcome`]. The store never sees the UI.

use std::fmt;

use crate::domain::NoteId;
use crate::infra::Storage;
use crate::store::{Clock, ImportError, NoteStore, StoreError};

/// A user gesture, independent of how it was captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// "New note" button.
    NewNote,
    /// A note was picked in the list.
    Select(NoteId),
    /// The title editor changed.
    TitleInput(String),
    /// The content editor changed.
    ContentInput(String),
    /// "Delete" on the active note, already confirmed by the user.
    DeleteActive,
    /// "Export" button.
    Export,
    /// A backup file was picked and read.
    ImportFile(String),
}

/// One-line message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Imported,
    InvalidBackup,
    UnreadableBackup,
}

impl Notification {
    pub fn message(self) -> &'static str {
        match self {
            Notification::Imported => "Notes imported successfully.",
            Notification::InvalidBackup => "Invalid backup file.",
            Notification::UnreadableBackup => "Could not read backup file.",
        }
    }

    /// True for notifications that report a rejected action.
    pub fn is_error(self) -> bool {
        !matches!(self, Notification::Imported)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// What the front end should do after an event.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Backup document to hand to the user (export only).
    pub document: Option<String>,
    pub notification: Option<Notification>,
}

impl Outcome {
    fn notify(notification: Notification) -> Self {
        Self {
            document: None,
            notification: Some(notification),
        }
    }
}

/// Applies one event to the store.
///
/// Editor input and delete act on the active note and do nothing when no
/// note is active. Import rejections become notifications; only storage
/// failures are returned as errors.
pub fn apply<S: Storage, C: Clock>(
    store: &mut NoteStore<S, C>,
    event: UiEvent,
) -> Result<Outcome, StoreError> {
    match event {
        UiEvent::NewNote => {
            store.create()?;
        }
        UiEvent::Select(id) => {
            store.select(&id);
        }
        UiEvent::TitleInput(title) => {
            if let Some(note) = store.active() {
                let (id, content) = (note.id().clone(), note.content().to_string());
                store.update(&id, title, content)?;
            }
        }
        UiEvent::ContentInput(content) => {
            if let Some(note) = store.active() {
                let (id, title) = (note.id().clone(), note.title().to_string());
                store.update(&id, title, content)?;
            }
        }
        UiEvent::DeleteActive => {
            if let Some(id) = store.active_id().cloned() {
                store.delete(&id)?;
            }
        }
        UiEvent::Export => {
            return Ok(Outcome {
                document: Some(store.export()?),
                notification: None,
            });
        }
        UiEvent::ImportFile(document) => {
            return match store.import(&document) {
                Ok(_) => Ok(Outcome::notify(Notification::Imported)),
                Err(ImportError::Store(e)) => Err(e),
                Err(e) if e.is_read_error() => {
                    log::warn!("{}", e);
                    Ok(Outcome::notify(Notification::UnreadableBackup))
                }
                Err(e) => {
                    log::warn!("{}", e);
                    Ok(Outcome::notify(Notification::InvalidBackup))
                }
            };
        }
    }
    Ok(Outcome::default())
}
