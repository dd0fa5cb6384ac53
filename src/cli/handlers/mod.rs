//! Command handlers for the CLI.

mod index;
mod list;
mod notes;


use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::config::Config;
use crate::domain::OwnerId;
use crate::search::{SearchIndex, provision};
use crate::service::NoteService;
use crate::store::SqliteNoteStore;
use crate::sync::SyncStatus;

// Re-export public items
pub use index::handle_reindex;
pub use list::{handle_list, handle_search};
pub use notes::{handle_edit, handle_new, handle_rm, handle_show};

/// The service as wired by the CLI: SQLite store, provisioned index.
pub type Service = NoteService<SqliteNoteStore, dyn SearchIndex>;

// ===========================================
// Shared Utilities
// ===========================================

/// Returns the note store database path for a data directory.
pub(crate) fn store_db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("notes.db")
}

/// Returns the search index directory for a data directory.
pub(crate) fn search_index_path(data_dir: &Path) -> PathBuf {
    data_dir.join("search-index")
}

/// Opens the note store and provisions the search index under `data_dir`.
///
/// A broken search index does not fail this call; see [`provision`].
pub fn open_service(data_dir: &Path, config: &Config) -> Result<Service> {
    let db_path = store_db_path(data_dir);
    let store = SqliteNoteStore::open(&db_path)
        .with_context(|| format!("failed to open note store at {}", db_path.display()))?;
    let index = provision(&search_index_path(data_dir), config.index_deadline());
    Ok(NoteService::new(Arc::new(store), index))
}

/// Returns the caller identity or explains how to supply one.
pub fn require_user(user: Option<OwnerId>) -> Result<OwnerId> {
    user.context("no user given: pass --user <id> or set FORGEGRID_USER")
}

/// Tells the user a committed write did not reach the search index.
pub(crate) fn report_sync(action: &str, status: &SyncStatus) {
    if let SyncStatus::Degraded { reason } = status {
        eprintln!(
            "warning: {}, but the search index was not updated ({}); run `forgegrid reindex` to repair",
            action, reason
        );
    }
}
