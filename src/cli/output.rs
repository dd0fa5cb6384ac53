//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{Note, NoteProjection};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Prints `data` wrapped in [`Output`] as pretty JSON.
pub fn print_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&Output::new(data))?);
    Ok(())
}

/// Converts notes into their wire shape for JSON output.
pub fn projections(notes: &[Note]) -> Vec<NoteProjection> {
    notes.iter().map(NoteProjection::from).collect()
}

/// Shortens note content for listings.
///
/// Keeps the first `budget` characters and appends `...` only when something
/// was cut. Line breaks are flattened so a preview fits on one row.
pub fn content_preview(content: &str, budget: usize) -> String {
    let flat: String = content
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.chars().count() <= budget {
        flat
    } else {
        let kept: String = flat.chars().take(budget).collect();
        format!("{}...", kept)
    }
}

/// Truncates a title to a column width, adding an ellipsis if needed.
fn truncate_title(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

/// Renders notes as a table: id, date, title, then an indented preview line.
pub fn render_listing(notes: &[Note], preview_chars: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>6}  {:<10}  {}\n", "ID", "Date", "Title"));
    out.push_str(&format!("{:>6}  {:<10}  {}\n", "------", "----------", "-----"));
    for note in notes {
        out.push_str(&format!(
            "{:>6}  {:<10}  {}\n",
            note.id(),
            note.date().format("%Y-%m-%d"),
            truncate_title(note.title(), 50)
        ));
        let preview = content_preview(note.content(), preview_chars);
        if !preview.is_empty() {
            out.push_str(&format!("{:>6}  {}\n", "", preview));
        }
    }
    out.push('\n');
    out.push_str(&format!("{} note(s)", notes.len()));
    out
}

/// Renders a single note in full.
pub fn render_note(note: &Note) -> String {
    let mut out = format!("# {}\n\n", note.title());
    out.push_str(&format!(
        "ID: {}  Date: {}\n",
        note.id(),
        note.date().format("%Y-%m-%d")
    ));
    if !note.content().is_empty() {
        out.push('\n');
        out.push_str(note.content());
    }
    out
}
