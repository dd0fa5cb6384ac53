//! A search index that can be switched off mid-test.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use forgegrid::domain::{NoteId, NoteProjection, OwnerId};
use forgegrid::search::{IndexDelete, IndexError, IndexResult, SearchIndex, TantivyIndex};

/// Wraps a real in-memory index. While `down`, every call fails as
/// unavailable and leaves the inner index untouched.
pub struct FlakyIndex {
    inner: TantivyIndex,
    down: AtomicBool,
    failures: AtomicUsize,
}

impl FlakyIndex {
    pub fn new() -> Self {
        Self {
            inner: TantivyIndex::in_memory().expect("in-memory index"),
            down: AtomicBool::new(false),
            failures: AtomicUsize::new(0),
        }
    }

    pub fn go_down(&self) {
        self.down.store(true, Ordering::SeqCst);
    }

    pub fn come_back(&self) {
        self.down.store(false, Ordering::SeqCst);
    }

    /// Number of calls refused while down.
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &TantivyIndex {
        &self.inner
    }

    fn check(&self) -> IndexResult<()> {
        if self.down.load(Ordering::SeqCst) {
            self.failures.fetch_add(1, Ordering::SeqCst);
            return Err(IndexError::unavailable("connection refused"));
        }
        Ok(())
    }
}

impl SearchIndex for FlakyIndex {
    fn upsert(&self, projection: &NoteProjection) -> IndexResult<()> {
        self.check()?;
        self.inner.upsert(projection)
    }

    fn delete(&self, id: NoteId) -> IndexResult<IndexDelete> {
        self.check()?;
        self.inner.delete(id)
    }

    fn query(&self, owner: OwnerId, term: &str) -> IndexResult<Vec<NoteId>> {
        self.check()?;
        self.inner.query(owner, term)
    }

    fn clear(&self) -> IndexResult<()> {
        self.check()?;
        self.inner.clear()
    }
}
