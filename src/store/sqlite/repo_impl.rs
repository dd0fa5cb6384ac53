//! NoteRepository trait implementation for SqliteNoteStore.

use super::SqliteNoteStore;
use super::transaction::Transaction;
use crate::domain::{Note, NoteDraft, NoteId, OwnerId};
use crate::store::{NoteRepository, StoreError, StoreResult};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

/// Storage format of the `date` column.
const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_NOTE: &str = "SELECT id, owner_id, title, content, date FROM notes";

/// Raw column values of a `notes` row, before validation.
struct NoteRow {
    id: i64,
    owner_id: i64,
    title: String,
    content: String,
    date: String,
}

impl NoteRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            title: row.get(2)?,
            content: row.get(3)?,
            date: row.get(4)?,
        })
    }

    fn into_note(self) -> StoreResult<Note> {
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|e| {
            StoreError::Corrupt(format!("note {}: invalid date '{}': {}", self.id, self.date, e))
        })?;
        let draft = NoteDraft::new(self.title, self.content)
            .map_err(|e| StoreError::Corrupt(format!("note {}: {}", self.id, e)))?;
        Ok(Note::new(
            NoteId::new(self.id),
            OwnerId::new(self.owner_id),
            draft,
            date,
        ))
    }
}

fn query_notes(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> StoreResult<Vec<Note>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, NoteRow::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.into_iter().map(NoteRow::into_note).collect()
}

impl NoteRepository for SqliteNoteStore {
    fn create(&self, owner: OwnerId, draft: &NoteDraft, date: NaiveDate) -> StoreResult<NoteId> {
        let conn = self.conn();
        let tx = Transaction::begin(&conn)?;
        tx.execute(
            "INSERT INTO notes (owner_id, title, content, date) VALUES (?, ?, ?, ?)",
            params![
                owner.get(),
                draft.title(),
                draft.content(),
                date.format(DATE_FORMAT).to_string()
            ],
        )?;
        let id = NoteId::new(tx.last_insert_rowid());
        tx.commit()?;
        Ok(id)
    }

    fn get(&self, id: NoteId) -> StoreResult<Option<Note>> {
        let conn = self.conn();
        let row = conn
            .query_row(
                &format!("{SELECT_NOTE} WHERE id = ?"),
                [id.get()],
                NoteRow::from_row,
            )
            .optional()?;
        row.map(NoteRow::into_note).transpose()
    }

    fn update(&self, id: NoteId, draft: &NoteDraft) -> StoreResult<bool> {
        let conn = self.conn();
        let tx = Transaction::begin(&conn)?;
        let rows = tx.execute(
            "UPDATE notes SET title = ?, content = ? WHERE id = ?",
            params![draft.title(), draft.content(), id.get()],
        )?;
        tx.commit()?;
        Ok(rows > 0)
    }

    fn delete(&self, id: NoteId) -> StoreResult<bool> {
        let conn = self.conn();
        let tx = Transaction::begin(&conn)?;
        let rows = tx.execute("DELETE FROM notes WHERE id = ?", [id.get()])?;
        tx.commit()?;
        Ok(rows > 0)
    }

    fn list_by_owner(&self, owner: OwnerId) -> StoreResult<Vec<Note>> {
        let conn = self.conn();
        query_notes(
            &conn,
            &format!("{SELECT_NOTE} WHERE owner_id = ? ORDER BY id DESC"),
            [owner.get()],
        )
    }

    fn list_all(&self) -> StoreResult<Vec<Note>> {
        let conn = self.conn();
        query_notes(&conn, &format!("{SELECT_NOTE} ORDER BY id DESC"), [])
    }
}
