// crates/nt-cli/src/logging.rs - tracing subscriber setup
//
// Filter comes from NT_LOG (same syntax as RUST_LOG), default "warn".
// The browser owns the terminal, so while it runs logs go to a file.

use anyhow::{Context as AnyhowContext, Result};
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "NT_LOG";

pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Log file kept beside the database: `notes.db` logs to `notes.db.log`
///
/// The suffix is appended to the whole file name, so the log can never
/// resolve to the database file itself.
pub fn log_path_for(db_path: &Path) -> PathBuf {
    let mut name = db_path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("nt"));
    name.push(".log");
    db_path.with_file_name(name)
}

pub fn init(target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match target {
        LogTarget::Stderr => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?,
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()?
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_sits_beside_database() {
        assert_eq!(
            log_path_for(Path::new("/data/nt/notes.db")),
            PathBuf::from("/data/nt/notes.db.log")
        );
        assert_eq!(log_path_for(Path::new("notes")), PathBuf::from("notes.log"));
    }

    #[test]
    fn test_log_path_never_equals_database() {
        for db in ["/tmp/app.log", "/tmp/x.db.log", "/tmp/.log"] {
            let db = Path::new(db);
            assert_ne!(log_path_for(db), db);
        }
        assert_eq!(log_path_for(Path::new("/tmp/app.log")), PathBuf::from("/tmp/app.log.log"));
    }
}
