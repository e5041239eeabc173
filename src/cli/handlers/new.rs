//! New note command handler.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use super::open_store;
use crate::cli::NewArgs;
use crate::events::{UiEvent, apply};
use crate::infra::Storage;
use crate::store::{Clock, NoteStore};

pub fn handle_new(args: &NewArgs, data_dir: &Path) -> Result<()> {
    let mut store = open_store(data_dir)?;
    new_impl(args, &mut store, &mut std::io::stdout().lock())
}

/// Creates a note, then types any initial title and content into it.
pub(crate) fn new_impl<S: Storage, C: Clock>(
    args: &NewArgs,
    store: &mut NoteStore<S, C>,
    out: &mut impl Write,
) -> Result<()> {
    apply(store, UiEvent::NewNote).context("failed to create note")?;

    if let Some(title) = &args.title {
        apply(store, UiEvent::TitleInput(title.clone())).context("failed to set title")?;
    }
    if let Some(content) = &args.content {
        apply(store, UiEvent::ContentInput(content.clone())).context("failed to set content")?;
    }

    if let Some(note) = store.active() {
        writeln!(out, "Created: {}", note)?;
        writeln!(out, "  id: {}", note.id())?;
    }
    Ok(())
}
