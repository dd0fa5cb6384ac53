//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::{NoteId, OwnerId};
use output::OutputFormat;

/// forgegrid - personal notes with fuzzy search
#[derive(Parser, Debug)]
#[command(name = "forgegrid", version, about, long_about = None)]
pub struct Cli {
    /// Data directory holding the note store and search index (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Id of the user the command acts for
    #[arg(short = 'u', long, global = true, env = "FORGEGRID_USER")]
    pub user: Option<OwnerId>,

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

    /// Change a note's title or content
    Edit(EditArgs),

    /// Delete a note
    Rm(RmArgs),

    /// Show a note's contents
    Show(ShowArgs),

    /// List your notes, newest first
    #[command(name = "ls")]
    List(ListArgs),

    /// Fuzzy full-text search across your notes
    Search(SearchArgs),

    /// Rebuild the search index from the note store
    Reindex(ReindexArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Note title
    #[arg(short, long)]
    pub title: String,

    /// Note content (read from stdin when omitted and stdin is not a terminal)
    #[arg(short, long)]
    pub content: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note id
    pub id: NoteId,

    /// New title (keeps the current one when omitted)
    #[arg(short, long)]
    pub title: Option<String>,

    /// New content (keeps the current one when omitted)
    #[arg(short, long)]
    pub content: Option<String>,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Note id
    pub id: NoteId,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note id
    pub id: NoteId,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search term; blank lists every note
    #[arg(default_value = "")]
    pub term: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `reindex` command
#[derive(Parser, Debug)]
pub struct ReindexArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
