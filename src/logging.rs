use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::error::PacerError;

/// Env var that overrides the configured log filter.
pub const LOG_ENV: &str = "PACER_LOG";

/// Builds the filter from `PACER_LOG`, falling back to `default_level`.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Installs a global subscriber appending to `path`.
///
/// A subscriber installed earlier (tests, embedding) is left in place.
pub fn init(path: &Path, default_level: &str) -> Result<(), PacerError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    if let Err(err) = installed {
        debug!(%err, path = %path.display(), "tracing subscriber already installed, keeping it");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_creates_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("pacer.log");

        init(&path, "debug").unwrap();
        tracing::info!("hello from test");

        assert!(path.exists());
    }

    #[test]
    fn init_twice_keeps_first_subscriber() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.log");
        let second = dir.path().join("second.log");

        init(&first, "debug").unwrap();
        assert!(init(&second, "debug").is_ok());
        assert!(second.exists());
    }
}
