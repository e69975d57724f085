// crates/nt-core/src/lib.rs - Core library for nt
//
// nt keeps short text notes in a local database. This crate owns the data
// model and persistence; the `nt` binary (nt-cli) owns everything the user
// touches.
//
// MODULES:
// - note: the Note record, ID parsing and key encoding
// - store: transactional CRUD over an SQLite-backed key-value layout
// - config: TOML configuration schema and loading
// - paths: where the database lives by default

pub mod config;
pub mod note;
pub mod paths;
pub mod store;

pub use config::{ConfigError, ConfigManager, NtConfig};
pub use note::{Note, NoteId, NoteIdError, parse_note_id, title_from_body};
pub use store::{NoteStore, StoreError, StoreResult};
