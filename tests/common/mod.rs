//! Common test utilities and fixtures.
//!
//! Shared value types and a helper that opens stores inside a temporary
//! directory, so every test gets its own database file.

#![allow(dead_code)]

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use simple_kv::{KvStore, StoreOptions};
use tempfile::TempDir;

// =============================================================================
// Value Types
// =============================================================================

/// Small record used for the basic get/set tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counter {
    pub n: u32,
}

/// Record with nested and optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub age: u8,
    pub tags: Vec<String>,
    pub manager: Option<Box<Person>>,
}

impl Person {
    pub fn new(name: &str, age: u8) -> Self {
        Self {
            name: name.to_string(),
            age,
            tags: Vec::new(),
            manager: None,
        }
    }
}

// =============================================================================
// Test Database
// =============================================================================

/// Temporary directory holding a database file for the test's duration.
pub struct TestDb {
    pub dir: TempDir,
}

impl TestDb {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Database file inside a not-yet-existing subdirectory.
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("data").join("kv.db")
    }

    pub fn options(&self, name: &str) -> StoreOptions {
        StoreOptions::new(name).with_path(self.path())
    }

    pub fn open<V>(&self, name: &str) -> anyhow::Result<KvStore<V>>
    where
        V: Serialize + DeserializeOwned,
    {
        Ok(KvStore::open(self.options(name))?)
    }
}
