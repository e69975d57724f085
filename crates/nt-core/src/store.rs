// crates/nt-core/src/store.rs - Durable, transactional note storage
//
// The store is a small key-value layout on top of SQLite:
//
//   notes: key = 8-byte big-endian note ID  -> value = JSON Note record
//   meta:  key = "id_seq"                   -> value = 8-byte big-endian counter
//
// Both tables are WITHOUT ROWID, so a scan is ordered by key bytes and
// therefore by ascending ID. Callers still sort explicitly; the ordering is
// a property of this layout, not part of the contract.
//
// TRANSACTION MODEL:
// Every mutation goes through `NoteStore::write`, which opens an IMMEDIATE
// transaction (one writer at a time), hands a `WriteTxn` to the closure and
// commits only if the closure returns Ok. Any error or panic drops the
// transaction, which rolls it back. Reads go through `NoteStore::read`.
//
// ID ALLOCATION:
// `add` bumps the counter and inserts the note inside the same write
// transaction. Either both land or neither does, so an ID is never issued
// twice and a returned note is always on disk. Deleting notes never touches
// the counter, so IDs are not reused.

use chrono::Utc;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::note::{Note, NoteId, decode_key, encode_key};

/// How long to wait for another process holding the database lock
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(1);

const ID_SEQ_KEY: &str = "id_seq";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS notes (
    key   BLOB PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
) WITHOUT ROWID;

CREATE TABLE IF NOT EXISTS meta (
    key   TEXT PRIMARY KEY NOT NULL,
    value BLOB NOT NULL
) WITHOUT ROWID;
";

/// Errors raised by the note store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open note database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Note database {path} is locked by another process")]
    Locked { path: PathBuf },

    #[error("Storage error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to encode or decode note: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Corrupt record under key {key}: {reason}")]
    CorruptRecord { key: String, reason: String },

    #[error("Note ID sequence exhausted")]
    SequenceExhausted,

    #[error("Note {0} not found")]
    NotFound(NoteId),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Handle to an opened note database
///
/// There is no global handle: the CLI opens one `NoteStore` and passes it
/// down explicitly to whatever needs it.
pub struct NoteStore {
    conn: Connection,
    /// `None` for in-memory stores
    path: Option<PathBuf>,
}

impl NoteStore {
    /// Open (creating if needed) the database at `path`
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::open_with_timeout(path, DEFAULT_LOCK_TIMEOUT)
    }

    /// Open with an explicit bound on how long to wait for the file lock
    ///
    /// A second process holding a write lock makes this fail with
    /// `StoreError::Locked` once `lock_timeout` expires instead of hanging.
    pub fn open_with_timeout(path: &Path, lock_timeout: Duration) -> StoreResult<Self> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        conn.busy_timeout(lock_timeout)
            .map_err(|source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        let mut store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.init_schema()?;

        debug!(path = %path.display(), "opened note store");
        Ok(store)
    }

    /// Open a throwaway store that lives only as long as the handle
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn, path: None };
        store.init_schema()?;
        Ok(store)
    }

    /// Location of the database file, if it has one
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn init_schema(&mut self) -> StoreResult<()> {
        self.write(|tx| {
            tx.tx.execute_batch(SCHEMA)?;
            Ok(())
        })
    }

    /// Run `f` inside a single all-or-nothing write transaction
    ///
    /// The transaction is committed only when `f` returns `Ok`.
    pub fn write<T, F>(&mut self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&WriteTxn<'_>) -> StoreResult<T>,
    {
        let path = self.path.as_deref();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| classify(e, path))?;

        let txn = WriteTxn { tx };
        let value = f(&txn)?;
        txn.tx.commit().map_err(|e| classify(e, path))?;
        Ok(value)
    }

    /// Run `f` against a read transaction that is always rolled back
    pub fn read<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&ReadTxn<'_>) -> StoreResult<T>,
    {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| classify(e, self.path.as_deref()))?;
        f(&ReadTxn { tx })
    }

    /// Create a note with the next ID from the sequence
    pub fn add(&mut self, title: &str, body: &str) -> StoreResult<Note> {
        let note = self.write(|tx| {
            let id = tx.next_id()?;
            let note = Note::new(id, title, body, Utc::now());
            tx.put(&note)?;
            Ok(note)
        })?;

        debug!(id = note.id, "added note");
        Ok(note)
    }

    /// All notes, in no promised order
    pub fn list(&self) -> StoreResult<Vec<Note>> {
        self.read(|tx| tx.list())
    }

    pub fn get(&self, id: NoteId) -> StoreResult<Note> {
        self.read(|tx| tx.get(id)?.ok_or(StoreError::NotFound(id)))
    }

    /// Overwrite the note stored under `note.id`
    ///
    /// Title, body and completion come from `note`. The stored `created_at`
    /// is kept, so an update can never rewrite history. Updating an ID that
    /// does not exist fails with `NotFound` and writes nothing.
    pub fn update(&mut self, note: &Note) -> StoreResult<Note> {
        let saved = self.write(|tx| {
            let existing = tx.get(note.id)?.ok_or(StoreError::NotFound(note.id))?;
            let merged = Note {
                id: existing.id,
                created_at: existing.created_at,
                title: note.title.clone(),
                body: note.body.clone(),
                completed: note.completed,
            };
            tx.put(&merged)?;
            Ok(merged)
        })?;

        debug!(id = saved.id, completed = saved.completed, "updated note");
        Ok(saved)
    }

    /// Set the completion flag of an existing note
    pub fn set_completed(&mut self, id: NoteId, completed: bool) -> StoreResult<Note> {
        let mut note = self.get(id)?;
        note.completed = completed;
        self.update(&note)
    }

    /// Remove a note. Returns whether anything was removed; a missing ID
    /// is not an error.
    pub fn delete(&mut self, id: NoteId) -> StoreResult<bool> {
        let removed = self.write(|tx| tx.delete(id))?;
        debug!(id, removed, "deleted note");
        Ok(removed)
    }

    /// Last ID handed out by the sequence (0 before the first add)
    pub fn last_id(&self) -> StoreResult<NoteId> {
        self.read(|tx| read_counter(&tx.tx))
    }
}

/// Read-only view of the database for the duration of one `read` call
pub struct ReadTxn<'conn> {
    tx: Transaction<'conn>,
}

impl ReadTxn<'_> {
    pub fn get(&self, id: NoteId) -> StoreResult<Option<Note>> {
        get_note(&self.tx, id)
    }

    pub fn list(&self) -> StoreResult<Vec<Note>> {
        list_notes(&self.tx)
    }
}

/// Mutable view of the database for the duration of one `write` call
pub struct WriteTxn<'conn> {
    tx: Transaction<'conn>,
}

impl WriteTxn<'_> {
    pub fn get(&self, id: NoteId) -> StoreResult<Option<Note>> {
        get_note(&self.tx, id)
    }

    pub fn list(&self) -> StoreResult<Vec<Note>> {
        list_notes(&self.tx)
    }

    /// Advance the ID sequence and return the new value
    pub fn next_id(&self) -> StoreResult<NoteId> {
        let current = read_counter(&self.tx)?;
        let next = current
            .checked_add(1)
            .ok_or(StoreError::SequenceExhausted)?;

        self.tx.execute(
            "INSERT INTO meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![ID_SEQ_KEY, encode_key(next).as_slice()],
        )?;
        Ok(next)
    }

    /// Insert or replace the record keyed by `note.id`
    pub fn put(&self, note: &Note) -> StoreResult<()> {
        let payload = serde_json::to_string(note)?;
        self.tx.execute(
            "INSERT INTO notes (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![note.key().as_slice(), payload],
        )?;
        Ok(())
    }

    pub fn delete(&self, id: NoteId) -> StoreResult<bool> {
        let removed = self.tx.execute(
            "DELETE FROM notes WHERE key = ?1",
            rusqlite::params![encode_key(id).as_slice()],
        )?;
        Ok(removed > 0)
    }
}

fn read_counter(conn: &Connection) -> StoreResult<NoteId> {
    let raw: Option<Vec<u8>> = conn
        .query_row(
            "SELECT value FROM meta WHERE key = ?1",
            rusqlite::params![ID_SEQ_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match raw {
        None => Ok(0),
        Some(bytes) => decode_key(&bytes).ok_or_else(|| {
            StoreError::CorruptRecord {
                key: ID_SEQ_KEY.to_string(),
                reason: format!("counter holds {} bytes", bytes.len()),
            }
        }),
    }
}

fn get_note(conn: &Connection, id: NoteId) -> StoreResult<Option<Note>> {
    let payload: Option<String> = conn
        .query_row(
            "SELECT value FROM notes WHERE key = ?1",
            rusqlite::params![encode_key(id).as_slice()],
            |row| row.get(0),
        )
        .optional()?;

    payload.map(|json| decode_note(id, &json)).transpose()
}

fn list_notes(conn: &Connection) -> StoreResult<Vec<Note>> {
    let mut stmt = conn.prepare("SELECT key, value FROM notes ORDER BY key")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, Vec<u8>>(0)?, row.get::<_, String>(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|(key, json)| {
            let id = decode_key(&key).ok_or_else(|| {
                StoreError::CorruptRecord {
                    key: format!("{key:02x?}"),
                    reason: format!("note key of {} bytes", key.len()),
                }
            })?;
            decode_note(id, &json)
        })
        .collect()
}

/// Decode a payload and check it agrees with the key it was stored under
fn decode_note(id: NoteId, json: &str) -> StoreResult<Note> {
    let note: Note = serde_json::from_str(json)?;
    if note.id != id {
        return Err(StoreError::CorruptRecord {
            key: id.to_string(),
            reason: format!("payload claims id {}", note.id),
        });
    }
    Ok(note)
}

/// Turn a busy/locked SQLite error into `StoreError::Locked`
fn classify(err: rusqlite::Error, path: Option<&Path>) -> StoreError {
    match (err.sqlite_error_code(), path) {
        (Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked), Some(path)) => {
            StoreError::Locked {
                path: path.to_path_buf(),
            }
        }
        _ => StoreError::Database(err),
    }
}
