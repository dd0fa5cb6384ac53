//! Tantivy-backed search index of note projections.

use std::collections::HashSet;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use chrono::Datelike;
use parking_lot::Mutex;
use tantivy::collector::{Count, TopDocs};
use tantivy::directory::error::LockError;
use tantivy::query::{BooleanQuery, FuzzyTermQuery, Occur, Query, TermQuery};
use tantivy::schema::{FAST, Field, INDEXED, IndexRecordOption, STORED, Schema, TEXT, Value};
use tantivy::tokenizer::TokenStream;
use tantivy::{
    Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, TantivyError, Term, doc,
};

use crate::domain::{NoteId, NoteProjection, OwnerId};
use crate::search::fuzzy::auto_distance;
use crate::search::{IndexDelete, IndexError, IndexResult, SearchIndex};

/// Smallest arena tantivy accepts for a single indexing thread.
const WRITER_MEMORY_BYTES: usize = 15_000_000;

/// How long a write waits for another process to release the writer lock.
const WRITER_LOCK_WAIT: Duration = Duration::from_secs(5);
const WRITER_LOCK_POLL: Duration = Duration::from_millis(20);

#[derive(Clone, Copy)]
struct Fields {
    id: Field,
    owner_id: Field,
    title: Field,
    content: Field,
    /// Days since 0001-01-01, used for date ordering.
    date: Field,
}

/// Full-text index over note projections.
///
/// Holds only a reader between calls. The directory's writer lock is taken
/// for the duration of each write and released afterwards, so several
/// processes can share one index directory.
pub struct TantivyIndex {
    index: Index,
    reader: IndexReader,
    /// Serializes writes from this handle; other handles are kept out by the
    /// directory lock.
    write_guard: Mutex<()>,
    fields: Fields,
}

impl TantivyIndex {
    /// Opens the index in `path`, creating directory and index if missing.
    pub fn open_or_create(path: &Path) -> IndexResult<Self> {
        std::fs::create_dir_all(path)
            .map_err(|e| IndexError::unavailable(format!("create {}: {}", path.display(), e)))?;
        let index = if path.join("meta.json").exists() {
            Index::open_in_dir(path)?
        } else {
            tracing::info!(path = %path.display(), "creating search index");
            Index::create_in_dir(path, build_schema())?
        };
        Self::from_index(index)
    }

    /// Creates an index held entirely in memory.
    pub fn in_memory() -> IndexResult<Self> {
        Self::from_index(Index::create_in_ram(build_schema()))
    }

    fn from_index(index: Index) -> IndexResult<Self> {
        let fields = fields_from_schema(&index.schema())?;
        // Reloaded by hand after each write and before each read, so commits
        // from this or any other handle are visible to the next query.
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;
        Ok(Self {
            index,
            reader,
            write_guard: Mutex::new(()),
            fields,
        })
    }

    /// Returns the number of projections currently searchable.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    fn id_term(&self, id: NoteId) -> Term {
        Term::from_field_i64(self.fields.id, id.get())
    }

    fn contains(&self, id: NoteId) -> IndexResult<bool> {
        let searcher = self.reader.searcher();
        let query = TermQuery::new(self.id_term(id), IndexRecordOption::Basic);
        Ok(searcher.search(&query, &Count)? > 0)
    }

    /// Runs `edit` with a freshly acquired writer, then commits.
    ///
    /// The writer is dropped on return, releasing the directory lock. While
    /// another process holds the lock this waits up to [`WRITER_LOCK_WAIT`].
    fn write<T>(&self, edit: impl FnOnce(&mut IndexWriter) -> IndexResult<T>) -> IndexResult<T> {
        let _guard = self.write_guard.lock();
        self.write_locked(edit)
    }

    /// [`Self::write`] for callers already holding `write_guard`.
    fn write_locked<T>(
        &self,
        edit: impl FnOnce(&mut IndexWriter) -> IndexResult<T>,
    ) -> IndexResult<T> {
        let mut writer = self.acquire_writer()?;
        let value = match edit(&mut writer) {
            Ok(value) => value,
            Err(err) => {
                let _ = writer.rollback();
                return Err(err);
            }
        };
        if let Err(err) = writer.commit() {
            let _ = writer.rollback();
            return Err(err.into());
        }
        self.reader.reload()?;
        Ok(value)
    }

    fn acquire_writer(&self) -> IndexResult<IndexWriter> {
        let give_up = Instant::now() + WRITER_LOCK_WAIT;
        loop {
            match self.index.writer_with_num_threads(1, WRITER_MEMORY_BYTES) {
                Ok(writer) => return Ok(writer),
                Err(TantivyError::LockFailure(LockError::LockBusy, _))
                    if Instant::now() < give_up =>
                {
                    thread::sleep(WRITER_LOCK_POLL);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Tokenizes `text` with the analyzer configured for `field`.
    fn tokens(&self, field: Field, text: &str) -> IndexResult<Vec<String>> {
        let mut analyzer = self.index.tokenizer_for_field(field)?;
        let mut stream = analyzer.token_stream(text);
        let mut seen = HashSet::new();
        let mut tokens = Vec::new();
        while stream.advance() {
            let token = stream.token().text.clone();
            if seen.insert(token.clone()) {
                tokens.push(token);
            }
        }
        Ok(tokens)
    }

    fn term_clauses(&self, term: &str) -> IndexResult<Vec<(Occur, Box<dyn Query>)>> {
        let mut clauses = Vec::new();
        for field in [self.fields.title, self.fields.content] {
            for token in self.tokens(field, term)? {
                let distance = auto_distance(&token);
                let term = Term::from_field_text(field, &token);
                let query: Box<dyn Query> = if distance == 0 {
                    Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs))
                } else {
                    Box::new(FuzzyTermQuery::new(term, distance, true))
                };
                clauses.push((Occur::Should, query));
            }
        }
        Ok(clauses)
    }
}

impl SearchIndex for TantivyIndex {
    fn upsert(&self, projection: &NoteProjection) -> IndexResult<()> {
        self.write(|writer| {
            writer.delete_term(self.id_term(projection.id));
            writer.add_document(doc!(
                self.fields.id => projection.id.get(),
                self.fields.owner_id => projection.owner_id.get(),
                self.fields.title => projection.title.clone(),
                self.fields.content => projection.content.clone(),
                self.fields.date => i64::from(projection.date.num_days_from_ce()),
            ))?;
            Ok(())
        })
    }

    fn delete(&self, id: NoteId) -> IndexResult<IndexDelete> {
        let _guard = self.write_guard.lock();
        self.reader.reload()?;
        if !self.contains(id)? {
            return Ok(IndexDelete::NotInIndex);
        }
        self.write_locked(|writer| {
            writer.delete_term(self.id_term(id));
            Ok(IndexDelete::Removed)
        })
    }

    fn query(&self, owner: OwnerId, term: &str) -> IndexResult<Vec<NoteId>> {
        let owner_clause: Box<dyn Query> = Box::new(TermQuery::new(
            Term::from_field_i64(self.fields.owner_id, owner.get()),
            IndexRecordOption::Basic,
        ));

        let query: Box<dyn Query> = if term.trim().is_empty() {
            owner_clause
        } else {
            let should = self.term_clauses(term)?;
            if should.is_empty() {
                // Nothing left after analysis, so nothing can match.
                return Ok(Vec::new());
            }
            Box::new(BooleanQuery::new(vec![
                (Occur::Must, owner_clause),
                (Occur::Must, Box::new(BooleanQuery::new(should))),
            ]))
        };

        self.reader.reload()?;
        let searcher = self.reader.searcher();
        let limit = usize::try_from(searcher.num_docs()).unwrap_or(usize::MAX).max(1);
        let top_docs = searcher.search(&*query, &TopDocs::with_limit(limit))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (_score, addr) in top_docs {
            let doc: TantivyDocument = searcher.doc(addr)?;
            let id = doc
                .get_first(self.fields.id)
                .and_then(|v| v.as_i64())
                .ok_or_else(|| IndexError::unavailable("indexed document has no id"))?;
            let date = doc
                .get_first(self.fields.date)
                .and_then(|v| v.as_i64())
                .unwrap_or(i64::MIN);
            hits.push((date, NoteId::new(id)));
        }

        // Stable sort: equal dates keep the collector's relevance order.
        hits.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(hits.into_iter().map(|(_, id)| id).collect())
    }

    fn clear(&self) -> IndexResult<()> {
        self.write(|writer| {
            writer.delete_all_documents()?;
            Ok(())
        })
    }
}

fn build_schema() -> Schema {
    let mut schema_builder = Schema::builder();
    schema_builder.add_i64_field("id", INDEXED | STORED | FAST);
    schema_builder.add_i64_field("owner_id", INDEXED | STORED);
    schema_builder.add_text_field("title", TEXT | STORED);
    schema_builder.add_text_field("content", TEXT | STORED);
    schema_builder.add_i64_field("date", STORED | FAST);
    schema_builder.build()
}

fn fields_from_schema(schema: &Schema) -> IndexResult<Fields> {
    Ok(Fields {
        id: schema.get_field("id")?,
        owner_id: schema.get_field("owner_id")?,
        title: schema.get_field("title")?,
        content: schema.get_field("content")?,
        date: schema.get_field("date")?,
    })
}
