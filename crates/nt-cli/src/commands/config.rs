use anyhow::Result;
use nt_core::ConfigManager;

/// Print the default configuration, annotated, to stdout
pub fn handle() -> Result<()> {
    if let Some(path) = ConfigManager::config_file_path() {
        eprintln!("# Config is read from {}", path.display());
    }
    print!("{}", ConfigManager::generate_default_config());
    Ok(())
}
