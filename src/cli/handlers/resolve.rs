//! Note resolution utilities.

use anyhow::{Result, bail};

use crate::domain::{Note, NoteId};
use crate::infra::Storage;
use crate::store::{Clock, NoteStore};

/// Result of resolving a note identifier.
#[derive(Debug)]
pub enum ResolveResult {
    /// Exactly one note matched.
    Unique(NoteId),
    /// Multiple notes matched (ambiguous).
    Ambiguous(Vec<Note>),
    /// No notes matched.
    NotFound,
}

impl ResolveResult {
    /// Converts to the matching id, failing on ambiguity.
    ///
    /// `NotFound` is not an error: operations on a missing note are no-ops.
    pub fn into_id(self, identifier: &str) -> Result<Option<NoteId>> {
        match self {
            ResolveResult::Unique(id) => Ok(Some(id)),
            ResolveResult::NotFound => Ok(None),
            ResolveResult::Ambiguous(notes) => {
                print_ambiguous_notes(identifier, &notes);
                bail!("ambiguous note identifier");
            }
        }
    }
}

/// Prints the candidates of an ambiguous identifier.
pub(crate) fn print_ambiguous_notes(identifier: &str, notes: &[Note]) {
    eprintln!("Ambiguous: '{}' matches {} notes:", identifier, notes.len());
    for note in notes {
        eprintln!("  {} - {}", note.id(), note.display_title());
        let preview = note.preview();
        if !preview.is_empty() {
            eprintln!("      {}", preview);
        }
    }
    eprintln!();
    eprintln!("Use the full ID to specify which note you mean.");
}

/// Resolves a note identifier to a unique note.
///
/// Resolution order:
/// 1. Exact ID match
/// 2. ID prefix match (4 or more characters)
/// 3. Title match (case-insensitive)
///
/// Returns `Unique` if exactly one note matches across all methods,
/// `Ambiguous` if multiple notes match, or `NotFound` if no match.
pub fn resolve_note<S: Storage, C: Clock>(
    store: &NoteStore<S, C>,
    identifier: &str,
) -> ResolveResult {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return ResolveResult::NotFound;
    }

    // 1. Exact ID
    if let Some(note) = store.notes().iter().find(|n| n.id().as_str() == identifier) {
        return ResolveResult::Unique(note.id().clone());
    }

    let mut candidates: Vec<&Note> = Vec::new();

    // 2. ID prefix, matched case-insensitively since ULIDs are upper case
    if identifier.chars().count() >= 4 {
        let prefix = identifier.to_ascii_uppercase();
        let id_matches: Vec<&Note> = store
            .notes()
            .iter()
            .filter(|n| n.id().as_str().to_ascii_uppercase().starts_with(&prefix))
            .collect();

        // ID matches are the most precise
        if let [only] = id_matches.as_slice() {
            return ResolveResult::Unique(only.id().clone());
        }
        candidates.extend(id_matches);
    }

    // 3. Title
    let wanted = identifier.to_lowercase();
    candidates.extend(
        store
            .notes()
            .iter()
            .filter(|n| !n.title().is_empty() && n.title().to_lowercase() == wanted),
    );

    // Deduplicate by ID
    candidates.sort_by(|a, b| a.id().cmp(b.id()));
    candidates.dedup_by(|a, b| a.id() == b.id());

    match candidates.as_slice() {
        [] => ResolveResult::NotFound,
        [only] => ResolveResult::Unique(only.id().clone()),
        many => ResolveResult::Ambiguous(many.iter().map(|n| (*n).clone()).collect()),
    }
}
