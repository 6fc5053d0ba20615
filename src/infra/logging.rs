use dirs::cache_dir;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const LOG_PATH_ENV: &str = "RESMODE_LOG";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir { path: String, source: io::Error },

    #[error("failed to open log file {path}: {source}")]
    OpenFile { path: String, source: io::Error },

    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Log file to write to, if any. The terminal belongs to the TUI, so logs only go to a file.
pub fn resolve_log_path(debug: bool) -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(LOG_PATH_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    if !debug {
        return None;
    }
    cache_dir().map(|dir| dir.join("resmode").join("resmode.log"))
}

/// Installs a file-backed `tracing` subscriber. `RUST_LOG` overrides the default level.
pub fn init_logging(path: &Path, debug: bool) -> Result<(), LoggingError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| LoggingError::CreateDir {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.display().to_string(),
            source,
        })?;

    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|error| LoggingError::Install(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_creates_missing_log_directory() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("resmode.log");

        // A subscriber may already be installed by another test; only the file side matters here.
        let _ = init_logging(&path, true);

        assert!(path.exists());
    }
}
