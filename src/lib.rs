//! A typed key-value store on top of SQLite.
//!
//! Each [`KvStore`] owns one SQLite connection and one table of
//! `(key TEXT PRIMARY KEY, value TEXT)` rows. Values of any serde type are
//! converted to text by a pluggable [`Codec`](codec::Codec), JSON by default.
//!
//! # Quick Start
//!
//! ```ignore
//! use simple_kv::prelude::*;
//!
//! let users: KvStore<serde_json::Value> =
//!     KvStore::open(StoreOptions::new("users").with_path("data/app.db"))?;
//!
//! users.set("ada", &serde_json::json!({"role": "admin"}))?;
//! assert!(users.has("ada")?);
//! let role = users.ensure("grace", serde_json::json!({"role": "guest"}))?;
//! ```
//!
//! # Modules
//!
//! - [`kv`] - The store, its options and table identifiers
//! - [`codec`] - The value serialization boundary
//! - [`error`] - Unified error type
//! - [`prelude`] - Convenient re-exports
//!
//! # Feature Flags
//!
//! - `config` - Load [`StoreOptions`] from TOML
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `full` - Enable all features

mod logging;
pub mod codec;
pub mod error;
pub mod kv;
pub mod prelude;

// Re-export the unified error type
pub use error::{Error, Result};

// Re-export KV types at crate root for convenience
pub use codec::{Codec, CodecError, JsonCodec};
pub use kv::{KvError, KvStore, StoreOptions, StorePath, TableName};
