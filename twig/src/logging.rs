use anyhow::Context;
use std::{ffi::OsString, path::PathBuf};
use twig_core::config::APP_NAME;

const LOG_FILE_NAME: &str = "twig.log";

/// `$XDG_CACHE_HOME/twig/twig.log` when that is set, otherwise under the platform cache
/// directory
pub fn log_path() -> PathBuf {
    log_path_from(std::env::var_os("XDG_CACHE_HOME"))
}

fn log_path_from(xdg_cache_home: Option<OsString>) -> PathBuf {
    xdg_cache_home
        .filter(|dir| cfg!(unix) && !dir.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_NAME)
        .join(LOG_FILE_NAME)
}

/// Install the file logger. Until this runs every `log` call is a no-op.
pub fn init(level: log::LevelFilter) -> anyhow::Result<()> {
    let path = log_path();
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    simple_log::file(path.to_string_lossy().into_owned(), level, 10, 10)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    log::info!("twig {} started (log level {level})", env!("CARGO_PKG_VERSION"));
    Ok(())
}
