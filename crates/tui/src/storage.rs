use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, warn};

pub const NOTES_KEY: &str = "app_notes";
pub const PRIVATE_NOTES_KEY: &str = "app_private_notes";
pub const PRIVATE_PIN_KEY: &str = "app_private_pin";
pub const THEME_KEY: &str = "app_theme";
pub const PRIMARY_COLOR_KEY: &str = "app_primary_color";
pub const VISITED_KEY: &str = "app_visited";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid store contents: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key-value store persisted as a single JSON object.
///
/// Every `set` writes the whole map back to disk. A failed write
/// leaves the in-memory value updated.
#[derive(Debug, Default)]
pub struct LocalStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(error) if error.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Read { path, source }),
        };
        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    /// Like `open`, but a file that does not parse is moved aside to
    /// `<name>.corrupt` and an empty store bound to the same path is
    /// returned. Read failures still surface.
    pub fn open_or_reset(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        match Self::open(&path) {
            Err(StorageError::Json(source)) => {
                let backup = corrupt_backup_path(&path);
                error!(
                    path = %path.display(),
                    backup = %backup.display(),
                    "store file is unreadable, starting empty: {source}"
                );
                if let Err(rename_error) = fs::rename(&path, &backup) {
                    warn!(
                        path = %path.display(),
                        "failed to move corrupt store aside: {rename_error}"
                    );
                }
                Ok(Self {
                    path: Some(path),
                    entries: BTreeMap::new(),
                })
            }
            other => other,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.into());
        self.flush()
    }

    fn flush(&self) -> Result<(), StorageError> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, raw).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })
    }
}

fn corrupt_backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::{LocalStore, StorageError, THEME_KEY, VISITED_KEY};

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        let mut store = LocalStore::open(&path).expect("open");
        store.set(THEME_KEY, "dark").expect("set");

        let reopened = LocalStore::open(&path).expect("reopen");
        assert_eq!(reopened.get(THEME_KEY), Some("dark"));
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::open(dir.path().join("absent.json")).expect("open");
        assert_eq!(store.get(THEME_KEY), None);
    }

    #[test]
    fn corrupt_file_is_reported_by_plain_open() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").expect("write");
        assert!(matches!(LocalStore::open(&path), Err(StorageError::Json(_))));
    }

    #[test]
    fn truncated_file_is_moved_aside_and_store_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{\"app_theme\": \"da").expect("write");

        let mut store = LocalStore::open_or_reset(&path).expect("recovered");
        assert_eq!(store.get(THEME_KEY), None);
        let backup = dir.path().join("store.json.corrupt");
        assert_eq!(
            std::fs::read_to_string(&backup).expect("backup kept"),
            "{\"app_theme\": \"da"
        );

        store.set(THEME_KEY, "dark").expect("set");
        let reopened = LocalStore::open_or_reset(&path).expect("reopen");
        assert_eq!(reopened.get(THEME_KEY), Some("dark"));
    }

    #[test]
    fn non_string_values_reset_the_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{\"app_visited\": true}").expect("write");
        let store = LocalStore::open_or_reset(&path).expect("recovered");
        assert_eq!(store.get(VISITED_KEY), None);
        assert!(dir.path().join("store.json.corrupt").exists());
    }

    #[test]
    fn failed_write_keeps_value_in_memory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing-dir").join("store.json");
        let mut store = LocalStore::open(&path).expect("open");
        let result = store.set(THEME_KEY, "dark");
        assert!(matches!(result, Err(StorageError::Write { .. })));
        assert_eq!(store.get(THEME_KEY), Some("dark"));
    }

    #[test]
    fn in_memory_store_never_touches_disk() {
        let mut store = LocalStore::in_memory();
        store.set(THEME_KEY, "light").expect("set");
        assert!(store.path.is_none());
        assert_eq!(store.get(THEME_KEY), Some("light"));
    }
}
