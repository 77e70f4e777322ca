use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "ani-note.log";
pub const LOG_FILTER_ENV: &str = "ANI_NOTE_LOG";
const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to prepare log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Sends tracing output to `<data_dir>/ani-note.log`. The terminal belongs to
/// the UI, so nothing is written to stdout or stderr.
pub fn init_file_logging(data_dir: &Path) -> Result<PathBuf, LoggingError> {
    let path = data_dir.join(LOG_FILE_NAME);
    let open_error = |source| LoggingError::Open {
        path: path.clone(),
        source,
    };
    fs::create_dir_all(data_dir).map_err(open_error)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(open_error)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_from_env())
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{init_file_logging, LOG_FILE_NAME};

    #[test]
    fn creates_directory_and_log_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("nested");
        let path = init_file_logging(&nested).expect("logging");
        assert_eq!(path, nested.join(LOG_FILE_NAME));
        assert!(path.exists());
    }
}
