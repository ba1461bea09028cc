//! Convenient re-exports for common usage patterns.
//!
//! # Example
//!
//! ```ignore
//! use simple_kv::prelude::*;
//!
//! let store: KvStore<String> = KvStore::open(StoreOptions::new("notes"))?;
//! store.set("todo", &"write tests".to_string())?;
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Serialization boundary
pub use crate::codec::{Codec, CodecError, JsonCodec};

// KV store types
pub use crate::kv::{Durability, JournalMode, KvError, KvStore, StoreOptions, StorePath, Synchronous};
