//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// notes - short study notes kept in local storage, with JSON backups
#[derive(Parser, Debug)]
#[command(name = "notes", version, about, long_about = None)]
pub struct Cli {
    /// Data directory holding the notes store (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new note
    New(NewArgs),

    /// List notes, most recently updated first
    #[command(name = "ls")]
    List(ListArgs),

    /// Show a note (defaults to the most recently updated one)
    Show(ShowArgs),

    /// Edit a note's title or content
    Edit(EditArgs),

    /// Delete a note
    #[command(name = "rm")]
    Delete(DeleteArgs),

    /// Export all notes to a JSON backup
    Export(ExportArgs),

    /// Replace all notes with the contents of a JSON backup
    Import(ImportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command
#[derive(Parser, Debug, Default)]
pub struct NewArgs {
    /// Initial title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Initial content
    #[arg(short, long)]
    pub content: Option<String>,
}

/// Arguments for the `ls` command
#[derive(Parser, Debug, Default)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Default)]
pub struct ShowArgs {
    /// Note ID, ID prefix, or title
    pub note: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug, Default)]
pub struct EditArgs {
    /// Note ID, ID prefix, or title (defaults to the most recently updated note)
    pub note: Option<String>,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New content
    #[arg(short, long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read new content from a file ("-" for stdin)
    #[arg(long)]
    pub content_file: Option<PathBuf>,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug, Default)]
pub struct DeleteArgs {
    /// Note ID, ID prefix, or title
    pub note: String,

    /// Delete without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `export` command
#[derive(Parser, Debug, Default)]
pub struct ExportArgs {
    /// Output path (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `import` command
#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// Backup file to restore ("-" for stdin)
    pub file: PathBuf,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
