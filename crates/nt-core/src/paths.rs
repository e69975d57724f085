// crates/nt-core/src/paths.rs - Database location

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::NtConfig;

/// File name of the database inside the data directory
pub const DB_FILE_NAME: &str = "notes.db";

/// Per-user data directory for nt, e.g. `~/.local/share/nt` on Linux
pub fn data_dir() -> io::Result<PathBuf> {
    dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .map(|dir| dir.join("nt"))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine a data directory; pass --db or set NT_DB",
            )
        })
}

/// Default database path, creating the data directory if it is missing
pub fn default_db_path() -> io::Result<PathBuf> {
    let dir = data_dir()?;
    fs::create_dir_all(&dir)?;
    Ok(dir.join(DB_FILE_NAME))
}

/// Expand a leading `~/` to the user's home directory
///
/// Anything else (including `~user/` forms) is returned untouched.
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// Pick the database path: explicit flag, then config file, then default
///
/// The flag already carries the `NT_DB` environment variable when clap
/// resolved it.
pub fn resolve_db_path(flag: Option<&Path>, config: &NtConfig) -> io::Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(expand_tilde(path));
    }

    if let Some(path) = &config.storage.path {
        return Ok(expand_tilde(Path::new(path)));
    }

    default_db_path()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_tilde(Path::new("~/notes.db")), home.join("notes.db"));
        assert_eq!(expand_tilde(Path::new("/tmp/notes.db")), PathBuf::from("/tmp/notes.db"));
        assert_eq!(expand_tilde(Path::new("rel/notes.db")), PathBuf::from("rel/notes.db"));
        assert_eq!(expand_tilde(Path::new("~other/x")), PathBuf::from("~other/x"));
    }

    #[test]
    fn test_flag_wins_over_config() {
        let mut config = NtConfig::default();
        config.storage.path = Some("/from/config.db".to_string());

        let resolved = resolve_db_path(Some(Path::new("/from/flag.db")), &config).unwrap();
        assert_eq!(resolved, PathBuf::from("/from/flag.db"));

        let resolved = resolve_db_path(None, &config).unwrap();
        assert_eq!(resolved, PathBuf::from("/from/config.db"));
    }

    #[test]
    fn test_default_path_file_name() {
        let path = data_dir().unwrap().join(DB_FILE_NAME);
        assert!(path.ends_with("nt/notes.db"));
    }
}
