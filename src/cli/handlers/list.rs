//! List and search command handlers.

use anyhow::{Context, Result};

use super::Service;
use crate::cli::output::{OutputFormat, print_json, projections, render_listing};
use crate::cli::{ListArgs, SearchArgs};
use crate::domain::{Note, OwnerId};

fn print_notes(
    notes: &[Note],
    format: OutputFormat,
    preview_chars: usize,
    empty: &str,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("{}", empty);
            } else {
                println!("{}", render_listing(notes, preview_chars));
            }
        }
        OutputFormat::Json => print_json(projections(notes))?,
    }
    Ok(())
}

pub fn handle_list(
    args: &ListArgs,
    service: &Service,
    owner: OwnerId,
    preview_chars: usize,
) -> Result<()> {
    let notes = service.list(owner).context("failed to list notes")?;
    print_notes(&notes, args.format, preview_chars, "No notes found.")
}

/// Runs a search. An unavailable index is an error, never an empty result.
pub fn handle_search(
    args: &SearchArgs,
    service: &Service,
    owner: OwnerId,
    preview_chars: usize,
) -> Result<()> {
    let notes = service.search(owner, &args.term)?;
    print_notes(&notes, args.format, preview_chars, "No matching notes found.")
}
