//! Store construction options.
//!
//! Options can be built in code or, with the `config` feature, loaded from
//! TOML:
//!
//! ```toml
//! name = "sessions"
//! path = "/var/lib/app/kv.db"
//! busy_timeout_ms = 5000
//!
//! [durability]
//! synchronous = "full"
//! journal_mode = "wal"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Path value selecting a non-persistent in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// Parameters for [`KvStore::open`](super::KvStore::open).
#[derive(Debug, Clone, Deserialize)]
pub struct StoreOptions {
    /// Table holding this store's records.
    pub name: String,
    /// Database file. Defaults to `data/kv.db` under the current directory;
    /// [`MEMORY_PATH`] selects an in-memory database.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub durability: Durability,
    /// How long a statement waits on a locked database before failing.
    #[serde(default)]
    pub busy_timeout_ms: Option<u64>,
}

impl StoreOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            durability: Durability::default(),
            busy_timeout_ms: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn in_memory(self) -> Self {
        self.with_path(MEMORY_PATH)
    }

    pub fn with_durability(mut self, durability: Durability) -> Self {
        self.durability = durability;
        self
    }

    pub fn with_busy_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.busy_timeout_ms = Some(timeout_ms);
        self
    }
}

/// Where a store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorePath {
    File(PathBuf),
    Memory,
}

impl StorePath {
    /// Default database location, relative to the working directory.
    pub fn default_relative() -> PathBuf {
        Path::new("data").join("kv.db")
    }

    /// Resolve an optional configured path.
    ///
    /// `None` or an empty path becomes `<current dir>/data/kv.db`, which is
    /// why this can fail.
    pub fn resolve(path: Option<&Path>) -> std::io::Result<Self> {
        match path.filter(|p| !p.as_os_str().is_empty()) {
            Some(p) if p == Path::new(MEMORY_PATH) => Ok(Self::Memory),
            Some(p) => Ok(Self::File(p.to_path_buf())),
            None => Ok(Self::File(
                std::env::current_dir()?.join(Self::default_relative()),
            )),
        }
    }

    pub fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }

    pub fn as_file(&self) -> Option<&Path> {
        match self {
            Self::File(p) => Some(p),
            Self::Memory => None,
        }
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(p) => write!(f, "{}", p.display()),
            Self::Memory => f.write_str(MEMORY_PATH),
        }
    }
}

/// Durability pragmas applied when a store opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Durability {
    #[serde(default)]
    pub synchronous: Synchronous,
    #[serde(default)]
    pub journal_mode: JournalMode,
}

/// `PRAGMA synchronous` level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Synchronous {
    Off,
    #[default]
    Normal,
    Full,
    Extra,
}

impl Synchronous {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Normal => "NORMAL",
            Self::Full => "FULL",
            Self::Extra => "EXTRA",
        }
    }
}

/// `PRAGMA journal_mode` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalMode {
    Delete,
    Truncate,
    Persist,
    Memory,
    #[default]
    Wal,
    Off,
}

impl JournalMode {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Delete => "DELETE",
            Self::Truncate => "TRUNCATE",
            Self::Persist => "PERSIST",
            Self::Memory => "MEMORY",
            Self::Wal => "WAL",
            Self::Off => "OFF",
        }
    }
}

#[cfg(feature = "config")]
pub use self::config::ConfigError;

#[cfg(feature = "config")]
mod config {
    use std::path::Path;

    use thiserror::Error;

    use super::StoreOptions;

    /// Failure loading [`StoreOptions`] from TOML.
    #[derive(Error, Debug)]
    pub enum ConfigError {
        #[error("Failed to read config file '{path}': {source}")]
        Io {
            path: String,
            #[source]
            source: std::io::Error,
        },

        #[error("Failed to parse config: {0}")]
        Parse(#[from] toml::de::Error),
    }

    impl StoreOptions {
        /// Load options from a TOML file.
        pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
            Self::from_toml_str(&content)
        }

        /// Parse options from a TOML string.
        pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
            Ok(toml::from_str(content)?)
        }
    }
}
