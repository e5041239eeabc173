//! Show and Edit command handlers.

use anyhow::{Context, Result, bail};
use std::io::Write;
use std::path::Path;
use std::process::Command;

use super::{open_store, read_input};
use super::resolve::{ResolveResult, print_ambiguous_notes, resolve_note};
use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat};
use crate::cli::{EditArgs, ShowArgs};
use crate::domain::NoteId;
use crate::events::{UiEvent, apply};
use crate::infra::Storage;
use crate::store::{Clock, NoteStore};

pub fn handle_show(args: &ShowArgs, data_dir: &Path) -> Result<()> {
    let mut store = open_store(data_dir)?;
    show_impl(args, &mut store, &mut std::io::stdout().lock())
}

pub(crate) fn show_impl<S: Storage, C: Clock>(
    args: &ShowArgs,
    store: &mut NoteStore<S, C>,
    out: &mut impl Write,
) -> Result<()> {
    let id = match &args.note {
        Some(identifier) => match resolve_note(store, identifier) {
            ResolveResult::Unique(id) => id,
            ResolveResult::Ambiguous(notes) => {
                print_ambiguous_notes(identifier, &notes);
                bail!("ambiguous note identifier");
            }
            ResolveResult::NotFound => bail!("note not found: '{}'", identifier),
        },
        None => store.ensure_active().context("failed to pick a note")?,
    };
    store.select(&id);

    let Some(note) = store.active() else {
        bail!("note not found: '{}'", id);
    };

    match args.format {
        OutputFormat::Human => {
            writeln!(out, "# {}", note.display_title())?;
            writeln!(out)?;
            writeln!(
                out,
                "ID: {}  Updated: {}",
                note.id(),
                note.updated_at().format("%Y-%m-%d %H:%M:%S")
            )?;
            writeln!(out)?;
            if !note.content().is_empty() {
                writeln!(out, "{}", note.content())?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&Output::new(note))?)?;
        }
    }

    Ok(())
}

/// Trait for launching an editor (allows mocking in tests).
pub(crate) trait EditorLauncher {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Opens a file in the user's configured editor.
fn open_in_editor(path: &Path, config: &Config) -> Result<()> {
    let editor = config.editor();

    // Parse editor command (may include args like "code --wait")
    let parts: Vec<&str> = editor.split_whitespace().collect();
    let Some((cmd, args)) = parts.split_first() else {
        bail!("editor command is empty");
    };

    let status = Command::new(cmd)
        .args(args)
        .arg(path)
        .status()
        .with_context(|| format!("failed to launch editor '{}'", editor))?;

    if !status.success() {
        bail!("editor '{}' exited with non-zero status", editor);
    }

    Ok(())
}

/// Round-trips `content` through the editor via a temporary file.
fn edit_in_editor<E: EditorLauncher>(content: &str, editor: &E) -> Result<String> {
    let mut temp = tempfile::Builder::new()
        .prefix("note-")
        .suffix(".txt")
        .tempfile()
        .context("failed to create temporary file for editing")?;
    temp.write_all(content.as_bytes())?;
    temp.flush()?;

    editor.open(temp.path())?;

    std::fs::read_to_string(temp.path()).context("failed to read edited content")
}

/// Finds the note to edit: the named one, or the active one by default.
///
/// Returns `None` when a named note does not exist.
fn target_note<S: Storage, C: Clock>(
    note: Option<&str>,
    store: &mut NoteStore<S, C>,
) -> Result<Option<NoteId>> {
    match note {
        Some(identifier) => resolve_note(store, identifier).into_id(identifier),
        None => Ok(Some(store.ensure_active()?)),
    }
}

/// Internal implementation that accepts a generic editor launcher.
pub(crate) fn edit_impl<S: Storage, C: Clock, E: EditorLauncher>(
    args: &EditArgs,
    store: &mut NoteStore<S, C>,
    out: &mut impl Write,
    editor: &E,
) -> Result<()> {
    let Some(id) = target_note(args.note.as_deref(), store)? else {
        log::warn!(
            "no note matches '{}'; nothing edited",
            args.note.as_deref().unwrap_or_default()
        );
        return Ok(());
    };
    apply(store, UiEvent::Select(id))?;

    let content = match (&args.content, &args.content_file) {
        (Some(content), _) => Some(content.clone()),
        (None, Some(path)) => Some(read_input(path)?),
        (None, None) if args.title.is_none() => {
            let current = store.active().map(|n| n.content().to_string()).unwrap_or_default();
            Some(edit_in_editor(&current, editor)?)
        }
        (None, None) => None,
    };

    if let Some(title) = &args.title {
        apply(store, UiEvent::TitleInput(title.clone())).context("failed to save title")?;
    }
    if let Some(content) = content {
        apply(store, UiEvent::ContentInput(content)).context("failed to save content")?;
    }

    if let Some(note) = store.active() {
        writeln!(out, "Edited: {}", note)?;
    }
    Ok(())
}

pub fn handle_edit(args: &EditArgs, data_dir: &Path, config: &Config) -> Result<()> {
    struct RealEditor<'a>(&'a Config);
    impl EditorLauncher for RealEditor<'_> {
        fn open(&self, path: &Path) -> Result<()> {
            open_in_editor(path, self.0)
        }
    }

    let mut store = open_store(data_dir)?;
    edit_impl(args, &mut store, &mut std::io::stdout().lock(), &RealEditor(config))
}
