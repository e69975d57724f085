use anyhow::{Context as AnyhowContext, Result};
use nt_core::{NoteStore, NtConfig};
use std::path::{Path, PathBuf};

/// Application context that gets passed to command handlers
///
/// Holds the one open store handle for the process. Commands receive it
/// explicitly instead of reaching for global state.
pub struct Context {
    pub store: NoteStore,
    db_path: PathBuf,
    config: NtConfig,
}

impl Context {
    /// Open the database at `db_path` with the configured lock timeout
    pub fn open(db_path: PathBuf, config: NtConfig) -> Result<Self> {
        let store = NoteStore::open_with_timeout(&db_path, config.storage.lock_timeout())
            .with_context(|| format!("Failed to open notes database: {}", db_path.display()))?;

        Ok(Self {
            store,
            db_path,
            config,
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn config(&self) -> &NtConfig {
        &self.config
    }
}
