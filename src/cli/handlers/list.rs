//! List command handler.

use anyhow::Result;
use std::io::Write;
use std::path::Path;

use super::{open_store, truncate_str};
use crate::cli::ListArgs;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::infra::Storage;
use crate::store::{Clock, NoteStore};

pub fn handle_list(args: &ListArgs, data_dir: &Path) -> Result<()> {
    let store = open_store(data_dir)?;
    list_impl(args, &store, &mut std::io::stdout().lock())
}

pub(crate) fn list_impl<S: Storage, C: Clock>(
    args: &ListArgs,
    store: &NoteStore<S, C>,
    out: &mut impl Write,
) -> Result<()> {
    let notes = store.sorted();

    match args.format {
        OutputFormat::Human => {
            if notes.is_empty() {
                writeln!(out, "No notes found.")?;
                return Ok(());
            }

            writeln!(out, "{:<8}  {:<40}  {:>16}", "ID", "Title", "Updated")?;
            writeln!(
                out,
                "{:<8}  {:<40}  {:>16}",
                "--------",
                "----------------------------------------",
                "----------------"
            )?;

            for note in &notes {
                let title = truncate_str(note.display_title(), 40);
                let updated = note.updated_at().format("%Y-%m-%d %H:%M").to_string();
                writeln!(out, "{:<8}  {:<40}  {:>16}", note.id().prefix(), title, updated)?;

                let preview = note.preview();
                if !preview.is_empty() {
                    writeln!(out, "{:<8}  {}", "", preview)?;
                }
            }

            writeln!(out)?;
            writeln!(out, "{} note(s)", notes.len())?;
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(|n| NoteListing::from(*n)).collect();
            let output = Output::new(listings);
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        }
    }

    Ok(())
}
