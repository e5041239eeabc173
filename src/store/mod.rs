//! The note store: an in-memory collection mirrored to key-value storage.
//!
//! Every mutation builds the next collection, writes it to storage, and only
//! then replaces the in-memory copy. A failed write therefore leaves memory
//! and storage in agreement.

mod backup;
mod clock;

pub use backup::{BACKUP_FILENAME, ImportError, encode_collection, parse_collection, render_backup};
pub use clock::{Clock, ManualClock, SystemClock};

use std::cmp::Reverse;

use thiserror::Error;

use crate::domain::{Note, NoteId};
use crate::infra::{Storage, StorageError};

/// Storage key that holds the whole collection.
pub const STORAGE_KEY: &str = "studyNotes";

/// Errors from store mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to persist notes: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to encode notes: {0}")]
    Encode(#[from] serde_json::Error),
}

/// An ordered collection of notes plus the active-note pointer.
///
/// # Examples
///
/// ```
/// use study_notes::infra::MemoryStorage;
/// use study_notes::store::NoteStore;
///
/// let mut store = NoteStore::load(MemoryStorage::new()).unwrap();
/// let id = store.create().unwrap();
/// store.update(&id, "Title", "Body").unwrap();
/// assert_eq!(store.active().unwrap().title(), "Title");
/// ```
pub struct NoteStore<S: Storage, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    notes: Vec<Note>,
    active: Option<NoteId>,
}

impl<S: Storage> NoteStore<S> {
    /// Loads the collection using wall-clock time.
    pub fn load(storage: S) -> Result<Self, StoreError> {
        Self::load_with_clock(storage, SystemClock)
    }
}

impl<S: Storage, C: Clock> NoteStore<S, C> {
    /// Loads the collection from storage.
    ///
    /// A missing key or unreadable contents yield an empty collection.
    /// Only failures of the storage backend itself are returned.
    pub fn load_with_clock(storage: S, clock: C) -> Result<Self, StoreError> {
        let notes = match storage.get(STORAGE_KEY)? {
            None => Vec::new(),
            Some(text) => match parse_collection(&text) {
                Ok(notes) => notes,
                Err(e) => {
                    log::warn!("stored notes are unreadable, starting empty: {}", e);
                    Vec::new()
                }
            },
        };
        log::debug!("loaded {} notes", notes.len());

        Ok(Self {
            storage,
            clock,
            notes,
            active: None,
        })
    }

    /// Returns the notes in collection (insertion) order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Returns the notes in display order: most recently updated first.
    ///
    /// Notes with equal timestamps keep their collection order.
    pub fn sorted(&self) -> Vec<&Note> {
        let mut sorted: Vec<&Note> = self.notes.iter().collect();
        sorted.sort_by_key(|n| Reverse(n.updated_at()));
        sorted
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Looks up a note by id.
    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id() == id)
    }

    /// Returns the active note's id, if any.
    pub fn active_id(&self) -> Option<&NoteId> {
        self.active.as_ref()
    }

    /// Returns the active note, if any.
    pub fn active(&self) -> Option<&Note> {
        self.active.as_ref().and_then(|id| self.get(id))
    }

    /// Returns the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Makes `id` the active note.
    ///
    /// An unknown id clears the selection. Returns whether a note is active.
    pub fn select(&mut self, id: &NoteId) -> bool {
        self.active = self.get(id).map(|n| n.id().clone());
        self.active.is_some()
    }

    /// Startup policy: create a note when the collection is empty, otherwise
    /// keep a valid selection or select the most recently updated note.
    pub fn ensure_active(&mut self) -> Result<NoteId, StoreError> {
        if let Some(note) = self.active() {
            return Ok(note.id().clone());
        }
        match self.most_recent_id() {
            Some(id) => {
                self.active = Some(id.clone());
                Ok(id)
            }
            None => self.create(),
        }
    }

    /// Appends an empty note, persists, and makes it active.
    pub fn create(&mut self) -> Result<NoteId, StoreError> {
        let id = self.fresh_id();
        let mut next = self.notes.clone();
        next.push(Note::new(id.clone(), self.clock.now()));
        self.commit(next)?;

        log::info!("created note {}", id);
        self.active = Some(id.clone());
        Ok(id)
    }

    /// Overwrites a note's title and content.
    ///
    /// Returns `Ok(false)` without touching storage when `id` is unknown.
    pub fn update(
        &mut self,
        id: &NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<bool, StoreError> {
        let Some(index) = self.position(id) else {
            log::debug!("update ignored: no note {}", id);
            return Ok(false);
        };

        let mut next = self.notes.clone();
        next[index].edit(title, content, self.clock.now());
        self.commit(next)?;

        log::debug!("updated note {}", id);
        Ok(true)
    }

    /// Removes a note.
    ///
    /// Returns `Ok(false)` without touching storage when `id` is unknown.
    /// When the removed note was active (or nothing was active), the most
    /// recently updated remaining note becomes active, or none if the
    /// collection is now empty.
    pub fn delete(&mut self, id: &NoteId) -> Result<bool, StoreError> {
        let Some(index) = self.position(id) else {
            log::debug!("delete ignored: no note {}", id);
            return Ok(false);
        };

        let mut next = self.notes.clone();
        next.remove(index);
        self.commit(next)?;

        if self.active.is_none() || self.active.as_ref() == Some(id) {
            self.active = self.most_recent_id();
        }

        log::info!("deleted note {}", id);
        Ok(true)
    }

    /// Renders the whole collection as a pretty-printed JSON array.
    pub fn export(&self) -> Result<String, StoreError> {
        Ok(render_backup(&self.notes)?)
    }

    /// Replaces the whole collection with the notes in `document`.
    ///
    /// On success the most recently updated imported note becomes active and
    /// the number of imported notes is returned. On failure nothing changes.
    ///
    /// The active note is picked by recency, not by position in `document`,
    /// so it is the note listed first after the import.
    pub fn import(&mut self, document: &str) -> Result<usize, ImportError> {
        let notes = parse_collection(document)?;
        let count = notes.len();
        self.commit(notes)?;

        self.active = self.most_recent_id();
        log::info!("imported {} notes", count);
        Ok(count)
    }

    fn commit(&mut self, next: Vec<Note>) -> Result<(), StoreError> {
        let encoded = encode_collection(&next)?;
        self.storage.set(STORAGE_KEY, &encoded)?;
        self.notes = next;
        Ok(())
    }

    fn position(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|n| n.id() == id)
    }

    fn most_recent_id(&self) -> Option<NoteId> {
        self.sorted().first().map(|n| n.id().clone())
    }

    fn fresh_id(&self) -> NoteId {
        loop {
            let id = NoteId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
