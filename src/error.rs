//! Unified error type for the simple-kv library.
//!
//! This module provides a single [`Error`] type that encompasses all errors
//! that can occur in the library, making it easier to handle errors in
//! application code.

use thiserror::Error;

use crate::codec::CodecError;
#[cfg(feature = "config")]
use crate::kv::ConfigError;
use crate::kv::KvError;

/// Unified error type for all simple-kv operations.
///
/// # Example
///
/// ```ignore
/// use simple_kv::{KvStore, Result, StoreOptions};
///
/// fn bump(store: &KvStore<u64>, key: &str) -> Result<u64> {
///     let next = store.get(key)?.unwrap_or(0) + 1;
///     store.set(key, &next)?;
///     Ok(next)
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Error from key-value store operations.
    #[error(transparent)]
    Kv(#[from] KvError),

    /// Error converting a value outside of a store.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Error loading store options.
    #[cfg(feature = "config")]
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if this is a KV store error.
    pub fn is_kv(&self) -> bool {
        matches!(self, Self::Kv(_))
    }

    /// Returns `true` if the table name given to a store was rejected.
    pub fn is_invalid_identifier(&self) -> bool {
        matches!(self, Self::Kv(KvError::InvalidIdentifier(_)))
    }

    /// Returns `true` if a value could not be encoded or decoded, whether
    /// directly or while reading or writing a store.
    pub fn is_codec(&self) -> bool {
        matches!(self, Self::Codec(_) | Self::Kv(KvError::Codec { .. }))
    }

    /// Returns `true` if this is a configuration error.
    #[cfg(feature = "config")]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns `true` if this is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Kv(KvError::Io(_)))
    }
}
