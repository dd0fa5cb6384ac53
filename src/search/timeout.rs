//! Deadline enforcement for search index calls.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::domain::{NoteId, NoteProjection, OwnerId};
use crate::search::{IndexDelete, IndexError, IndexResult, SearchIndex};

type WriteJob<I> = Box<dyn FnOnce(&I) + Send>;

/// Wraps an index so that any call running past `deadline` fails as
/// `Unavailable`.
///
/// Writes (upsert, delete, clear) are applied one at a time, in submission
/// order, by a single worker thread. The deadline bounds only how long the
/// caller waits: a write that times out is still applied before any write
/// submitted after it, so a late write never overtakes a newer one.
/// Queries run on their own helper thread; a timed-out query's result is
/// discarded. Nothing is retried.
pub struct TimeoutIndex<I: ?Sized> {
    inner: Arc<I>,
    deadline: Duration,
    writes: Option<Sender<WriteJob<I>>>,
}

impl<I: SearchIndex + ?Sized + 'static> TimeoutIndex<I> {
    pub fn new(inner: Arc<I>, deadline: Duration) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded::<WriteJob<I>>();
        let worker_index = Arc::clone(&inner);
        let writes = match thread::Builder::new()
            .name("index-writer".to_string())
            .spawn(move || apply_writes::<I>(&worker_index, rx))
        {
            Ok(_) => Some(tx),
            Err(err) => {
                tracing::error!(error = %err, "search index writer thread failed to start");
                None
            }
        };
        Self {
            inner,
            deadline,
            writes,
        }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    fn wait<T>(&self, op: &'static str, rx: Receiver<IndexResult<T>>) -> IndexResult<T> {
        match rx.recv_timeout(self.deadline) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(IndexError::unavailable(format!(
                "{op} timed out after {}ms",
                self.deadline.as_millis()
            ))),
            Err(RecvTimeoutError::Disconnected) => {
                Err(IndexError::unavailable(format!("{op} aborted")))
            }
        }
    }

    /// Queues a write behind every earlier one and waits up to the deadline.
    fn ordered<T, F>(&self, op: &'static str, call: F) -> IndexResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&I) -> IndexResult<T> + Send + 'static,
    {
        let writes = self
            .writes
            .as_ref()
            .ok_or_else(|| IndexError::unavailable(format!("{op}: no writer thread")))?;
        let (tx, rx) = crossbeam_channel::bounded(1);
        let job: WriteJob<I> = Box::new(move |index| {
            let _ = tx.send(call(index));
        });
        writes
            .send(job)
            .map_err(|_| IndexError::unavailable(format!("{op}: writer thread stopped")))?;
        self.wait(op, rx)
    }

    /// Runs a read on a helper thread and waits up to the deadline.
    fn detached<T, F>(&self, op: &'static str, call: F) -> IndexResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&I) -> IndexResult<T> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let (tx, rx) = crossbeam_channel::bounded(1);
        thread::Builder::new()
            .name(format!("index-{op}"))
            .spawn(move || {
                let _ = tx.send(call(&inner));
            })
            .map_err(|e| IndexError::unavailable(format!("{op}: spawn failed: {e}")))?;
        self.wait(op, rx)
    }
}

/// Worker loop: applies queued writes in order until every sender is gone.
fn apply_writes<I: ?Sized>(index: &I, jobs: Receiver<WriteJob<I>>) {
    for job in jobs {
        // A panicking write drops its reply sender; the caller sees "aborted".
        if panic::catch_unwind(AssertUnwindSafe(|| job(index))).is_err() {
            tracing::error!("search index write panicked");
        }
    }
}

impl<I: SearchIndex + ?Sized + 'static> SearchIndex for TimeoutIndex<I> {
    fn upsert(&self, projection: &NoteProjection) -> IndexResult<()> {
        let projection = projection.clone();
        self.ordered("upsert", move |index| index.upsert(&projection))
    }

    fn delete(&self, id: NoteId) -> IndexResult<IndexDelete> {
        self.ordered("delete", move |index| index.delete(id))
    }

    fn query(&self, owner: OwnerId, term: &str) -> IndexResult<Vec<NoteId>> {
        let term = term.to_string();
        self.detached("query", move |index| index.query(owner, &term))
    }

    fn clear(&self) -> IndexResult<()> {
        self.ordered("clear", |index| index.clear())
    }
}
