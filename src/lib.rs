//! study-notes - short text notes in local storage, with JSON backup and restore

pub mod cli;
pub mod domain;
pub mod events;
pub mod infra;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::LevelFilter;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_delete, handle_edit, handle_export, handle_import, handle_list, handle_new,
        handle_show,
    },
};

/// Initializes logging; `RUST_LOG` overrides the level chosen by `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;
    let data_dir = config.data_dir(cli.dir.as_ref());
    log::debug!("using data directory {}", data_dir.display());

    match &cli.command {
        Command::New(args) => handle_new(args, &data_dir),
        Command::List(args) => handle_list(args, &data_dir),
        Command::Show(args) => handle_show(args, &data_dir),
        Command::Edit(args) => handle_edit(args, &data_dir, &config),
        Command::Delete(args) => handle_delete(args, &data_dir),
        Command::Export(args) => handle_export(args, &data_dir),
        Command::Import(args) => handle_import(args, &data_dir),
        Command::Completions(args) => {
            let mut command = Cli::command();
            clap_complete::generate(args.shell, &mut command, "notes", &mut std::io::stdout());
            Ok(())
        }
    }
}
