//! Key-value store module.
//!
//! This module provides a persistent key-value store where each store owns
//! one SQLite table. Values are serialized to text through a
//! [`Codec`](crate::codec::Codec) before they are written.

mod error;
mod options;
mod schema;
mod store;
mod table;

pub use error::KvError;
#[cfg(feature = "config")]
pub use options::ConfigError;
pub use options::{Durability, JournalMode, MEMORY_PATH, StoreOptions, StorePath, Synchronous};
pub use schema::AUTONUM_TABLE;
pub use store::KvStore;
pub use table::TableName;
