//! Delete command handler.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::Path;

use super::open_store;
use super::resolve::resolve_note;
use crate::cli::DeleteArgs;
use crate::events::{UiEvent, apply};
use crate::infra::Storage;
use crate::store::{Clock, NoteStore};

pub fn handle_delete(args: &DeleteArgs, data_dir: &Path) -> Result<()> {
    let mut store = open_store(data_dir)?;
    delete_impl(args, &mut store, &mut std::io::stdout().lock(), confirm_on_stdin)
}

/// Asks on stderr and reads a yes/no answer from stdin.
fn confirm_on_stdin() -> Result<bool> {
    eprint!("Delete this note? [y/N] ");
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub(crate) fn delete_impl<S: Storage, C: Clock>(
    args: &DeleteArgs,
    store: &mut NoteStore<S, C>,
    out: &mut impl Write,
    confirm: impl FnOnce() -> Result<bool>,
) -> Result<()> {
    let Some(id) = resolve_note(store, &args.note).into_id(&args.note)? else {
        log::warn!("no note matches '{}'; nothing deleted", args.note);
        return Ok(());
    };

    let Some(label) = store.get(&id).map(|n| n.to_string()) else {
        return Ok(());
    };

    if !args.yes && !confirm()? {
        writeln!(out, "Cancelled.")?;
        return Ok(());
    }

    apply(store, UiEvent::Select(id))?;
    apply(store, UiEvent::DeleteActive).context("failed to delete note")?;

    writeln!(out, "Deleted: {}", label)?;
    match store.active() {
        Some(next) => writeln!(out, "Active: {}", next)?,
        None => writeln!(out, "No notes left.")?,
    }
    Ok(())
}
