//! Handlers for single-note commands: new, edit, rm, show.

use anyhow::{Context, Result, bail};
use std::io::{IsTerminal, Read};

use super::{Service, report_sync};
use crate::cli::output::{OutputFormat, print_json, render_note};
use crate::cli::{EditArgs, NewArgs, RmArgs, ShowArgs};
use crate::domain::{NoteDraft, NoteProjection, OwnerId};

/// Reads note content from stdin when it is piped in.
fn content_from_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut content = String::new();
    stdin
        .read_to_string(&mut content)
        .context("failed to read note content from stdin")?;
    Ok(content)
}

pub fn handle_new(args: &NewArgs, service: &Service, owner: OwnerId) -> Result<()> {
    let content = match &args.content {
        Some(content) => content.clone(),
        None => content_from_stdin()?,
    };
    let draft = NoteDraft::new(&args.title, content)?;
    let created = service
        .create(owner, draft)
        .context("failed to create note")?;
    report_sync(&format!("note {} was saved", created.id), &created.sync);

    match args.format {
        OutputFormat::Human => println!("Created note {}", created.id),
        OutputFormat::Json => print_json(&created)?,
    }
    Ok(())
}

pub fn handle_edit(args: &EditArgs, service: &Service, owner: OwnerId) -> Result<()> {
    if args.title.is_none() && args.content.is_none() {
        bail!("nothing to change: pass --title and/or --content");
    }

    let current = service.get(owner, args.id)?;
    let title = args.title.as_deref().unwrap_or(current.title());
    let content = args.content.as_deref().unwrap_or(current.content());
    let draft = NoteDraft::new(title, content)?;

    let sync = service.edit(owner, args.id, draft)?;
    report_sync(&format!("note {} was updated", args.id), &sync);
    println!("Edited note {}", args.id);
    Ok(())
}

pub fn handle_rm(args: &RmArgs, service: &Service, owner: OwnerId) -> Result<()> {
    let sync = service.delete(owner, args.id)?;
    report_sync(&format!("note {} was deleted", args.id), &sync);
    println!("Deleted note {}", args.id);
    Ok(())
}

pub fn handle_show(args: &ShowArgs, service: &Service, owner: OwnerId) -> Result<()> {
    let note = service.get(owner, args.id)?;
    match args.format {
        OutputFormat::Human => println!("{}", render_note(&note)),
        OutputFormat::Json => print_json(NoteProjection::from(&note))?,
    }
    Ok(())
}
