//! Export and import command handlers.

use anyhow::{Context, Result, bail};
use std::io::Write;
use std::path::Path;

use super::{open_store, read_input};
use crate::cli::{ExportArgs, ImportArgs};
use crate::events::{Notification, UiEvent, apply};
use crate::infra::Storage;
use crate::store::{Clock, NoteStore};

pub fn handle_export(args: &ExportArgs, data_dir: &Path) -> Result<()> {
    let mut store = open_store(data_dir)?;
    export_impl(args, &mut store, &mut std::io::stdout().lock())
}

/// Writes the backup to `--output`, or the document itself to `out`.
pub(crate) fn export_impl<S: Storage, C: Clock>(
    args: &ExportArgs,
    store: &mut NoteStore<S, C>,
    out: &mut impl Write,
) -> Result<()> {
    let outcome = apply(store, UiEvent::Export).context("failed to export notes")?;
    let document = outcome.document.unwrap_or_default();

    match &args.output {
        Some(path) => {
            std::fs::write(path, &document)
                .with_context(|| format!("failed to write backup to {}", path.display()))?;
            writeln!(out, "Exported {} note(s) to {}", store.len(), path.display())?;
        }
        None => writeln!(out, "{}", document)?,
    }
    Ok(())
}

pub fn handle_import(args: &ImportArgs, data_dir: &Path) -> Result<()> {
    let mut store = open_store(data_dir)?;
    import_impl(args, &mut store, &mut std::io::stdout().lock())
}

/// Restores a backup file, replacing every note.
///
/// A file that cannot be read is reported like one that is not JSON.
pub(crate) fn import_impl<S: Storage, C: Clock>(
    args: &ImportArgs,
    store: &mut NoteStore<S, C>,
    out: &mut impl Write,
) -> Result<()> {
    let notification = match read_input(&args.file) {
        Ok(document) => apply(store, UiEvent::ImportFile(document))
            .context("failed to save imported notes")?
            .notification,
        Err(e) => {
            log::warn!("{:#}", e);
            Some(Notification::UnreadableBackup)
        }
    };

    match notification {
        Some(n) if n.is_error() => bail!("{}", n),
        Some(n) => writeln!(out, "{} ({} note(s))", n, store.len())?,
        None => {}
    }
    Ok(())
}
