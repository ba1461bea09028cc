//! Error types for the KV store module.

use thiserror::Error;

use crate::codec::CodecError;

/// Errors that can occur during KV store operations.
#[derive(Error, Debug)]
pub enum KvError {
    #[error("Invalid table name: {0:?}")]
    InvalidIdentifier(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Value for key {key:?} could not be converted: {source}")]
    Codec {
        key: String,
        #[source]
        source: CodecError,
    },
}

impl KvError {
    pub(crate) fn codec(key: &str, source: CodecError) -> Self {
        Self::Codec {
            key: key.to_string(),
            source,
        }
    }
}
