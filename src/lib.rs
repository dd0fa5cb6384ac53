//! forgegrid - personal notes kept in a relational store with a fuzzy
//! full-text search index alongside

pub mod cli;
pub mod domain;
pub mod logging;
pub mod query;
pub mod search;
pub mod service;
pub mod store;
pub mod sync;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_edit, handle_list, handle_new, handle_reindex, handle_rm, handle_search,
        handle_show, open_service, require_user,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        clap_complete::generate(
            args.shell,
            &mut Cli::command(),
            "forgegrid",
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    let config = Config::load()?;
    let data_dir = config.data_dir(cli.dir.as_ref());

    if let Command::Reindex(args) = &cli.command {
        let service = open_service(&data_dir, &config)?;
        return handle_reindex(args, &service);
    }

    // Resolved before anything is opened, so a missing user touches no files.
    let owner = require_user(cli.user)?;
    let service = open_service(&data_dir, &config)?;
    let preview = config.preview_chars();

    match &cli.command {
        Command::New(args) => handle_new(args, &service, owner),
        Command::Edit(args) => handle_edit(args, &service, owner),
        Command::Rm(args) => handle_rm(args, &service, owner),
        Command::Show(args) => handle_show(args, &service, owner),
        Command::List(args) => handle_list(args, &service, owner, preview),
        Command::Search(args) => handle_search(args, &service, owner, preview),
        Command::Reindex(_) | Command::Completions(_) => Ok(()),
    }
}
