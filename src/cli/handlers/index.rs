//! Reindex command handler.

use anyhow::{Result, bail};

use super::Service;
use crate::cli::ReindexArgs;
use crate::cli::output::{OutputFormat, print_json};

pub fn handle_reindex(args: &ReindexArgs, service: &Service) -> Result<()> {
    let report = service.rebuild_index()?;

    match args.format {
        OutputFormat::Human => println!("Indexed {} notes", report.indexed),
        OutputFormat::Json => print_json(&report)?,
    }

    if report.failed > 0 {
        bail!("{} notes could not be indexed", report.failed);
    }
    Ok(())
}
