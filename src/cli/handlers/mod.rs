//! Command handlers for the CLI.
//!
//! Each `handle_*` function opens the file-backed store and delegates to a
//! `*_impl` function that takes the store and an output sink, so handlers can
//! be exercised against in-memory storage.

mod backup;
mod delete;
mod list;
mod new;
mod resolve;
mod show_edit;


use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::infra::FileStorage;
use crate::store::NoteStore;

// Re-export public items
pub use backup::{handle_export, handle_import};
pub use delete::handle_delete;
pub use list::handle_list;
pub use new::handle_new;
pub use resolve::{ResolveResult, resolve_note};
pub use show_edit::{handle_edit, handle_show};

// Re-export for tests
#[cfg(test)]
pub(crate) use backup::{export_impl, import_impl};
#[cfg(test)]
pub(crate) use delete::delete_impl;
#[cfg(test)]
pub(crate) use list::list_impl;
#[cfg(test)]
pub(crate) use new::new_impl;
#[cfg(test)]
pub(crate) use show_edit::{EditorLauncher, edit_impl, show_impl};

// ===========================================
// Shared Utilities
// ===========================================

/// Opens the note store kept in `data_dir`.
pub(crate) fn open_store(data_dir: &Path) -> Result<NoteStore<FileStorage>> {
    NoteStore::load(FileStorage::new(data_dir))
        .with_context(|| format!("failed to open notes in {}", data_dir.display()))
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

/// Reads a whole file, or stdin when `path` is `-`.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
