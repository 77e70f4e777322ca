use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DATA_DIR_ENV: &str = "ANI_NOTE_DATA_DIR";
pub const KEY_DEBUG_ENV: &str = "ANI_NOTE_KEY_DEBUG";
pub const STORE_FILE_NAME: &str = "store.json";
const DEFAULT_DIR_NAME: &str = ".ani-note";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--data-dir requires a value")]
    MissingDataDir,
    #[error("cannot locate a data directory; set {DATA_DIR_ENV} or HOME")]
    NoDataDir,
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub debug_keys: bool,
    pub show_help: bool,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(env::args().skip(1), |key| env::var(key).ok())
    }

    /// Flags win over environment variables, which win over `$HOME/.ani-note`.
    pub fn from_sources(
        args: impl IntoIterator<Item = impl AsRef<str>>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut data_dir = None;
        let mut debug_keys = lookup(KEY_DEBUG_ENV)
            .as_deref()
            .and_then(parse_bool_like)
            .unwrap_or(false);
        let mut show_help = false;

        let mut args = args.into_iter().map(|arg| arg.as_ref().to_string());
        while let Some(arg) = args.next() {
            if let Some(value) = arg.strip_prefix("--data-dir=") {
                if value.is_empty() {
                    return Err(ConfigError::MissingDataDir);
                }
                data_dir = Some(PathBuf::from(value));
                continue;
            }
            if let Some(value) = arg.strip_prefix("--debug-keys=") {
                debug_keys = parse_bool_like(value).unwrap_or(false);
                continue;
            }
            match arg.as_str() {
                "--data-dir" => match args.next() {
                    Some(value) if !value.starts_with('-') => data_dir = Some(PathBuf::from(value)),
                    _ => return Err(ConfigError::MissingDataDir),
                },
                "--debug-keys" => debug_keys = true,
                "-h" | "--help" => show_help = true,
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }

        let data_dir = match data_dir {
            Some(dir) => dir,
            None => lookup(DATA_DIR_ENV)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .or_else(|| {
                    lookup("HOME")
                        .filter(|value| !value.trim().is_empty())
                        .map(|home| PathBuf::from(home).join(DEFAULT_DIR_NAME))
                })
                .ok_or(ConfigError::NoDataDir)?,
        };
        Ok(Self {
            data_dir,
            debug_keys,
            show_help,
        })
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }
}

pub fn parse_bool_like(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub const USAGE: &str = "\
Usage: ani-note [--data-dir <path>] [--debug-keys]

Options:
  --data-dir <path>  Directory for notes and settings (env: ANI_NOTE_DATA_DIR)
  --debug-keys       Log every key event (env: ANI_NOTE_KEY_DEBUG=1)
  -h, --help         Show this help

Logs go to <data-dir>/ani-note.log; filter with ANI_NOTE_LOG (e.g. debug).";
