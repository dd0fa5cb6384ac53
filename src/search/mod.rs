//! Secondary full-text index of note projections

mod fuzzy;
mod index;
mod tantivy_index;
mod timeout;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub use fuzzy::auto_distance;
pub use index::{IndexDelete, IndexError, IndexResult, SearchIndex, UnavailableIndex};
pub use tantivy_index::TantivyIndex;
pub use timeout::TimeoutIndex;

/// Opens the search index at `path`, creating it if missing.
///
/// Startup never fails because of the index: if it cannot be opened or
/// created the error is logged and an [`UnavailableIndex`] is returned, so
/// writes degrade and searches report the outage. When `deadline` is set,
/// every call is bounded by it.
pub fn provision(path: &Path, deadline: Option<Duration>) -> Arc<dyn SearchIndex> {
    let index: Arc<dyn SearchIndex> = match TantivyIndex::open_or_create(path) {
        Ok(index) => {
            tracing::debug!(path = %path.display(), "search index ready");
            Arc::new(index)
        }
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "search index provisioning failed");
            Arc::new(UnavailableIndex::new(err.to_string()))
        }
    };

    match deadline {
        Some(deadline) => Arc::new(TimeoutIndex::new(index, deadline)),
        None => index,
    }
}
