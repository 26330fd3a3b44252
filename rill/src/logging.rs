use rill_core::{config::APP_NAME, paths::xdg_dir};
use std::path::PathBuf;

const LOG_FILE_NAME: &str = "rill.log";

/// `~/.cache/rill`, honouring `XDG_CACHE_HOME`.
pub fn cache_dir() -> Option<PathBuf> {
    xdg_dir("XDG_CACHE_HOME", ".cache", APP_NAME)
}

pub fn default_log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LOG_FILE_NAME))
}

pub fn setup_logging(level: log::LevelFilter) -> anyhow::Result<()> {
    let log_file = default_log_file()
        .ok_or_else(|| anyhow::anyhow!("Unable to determine the cache directory"))?;
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    simple_log::file(log_file.to_string_lossy().into_owned(), level, 10, 10)
        .map_err(|e| anyhow::anyhow!(e))?;
    log::info!("rill logging initialised (level={level})");
    Ok(())
}
