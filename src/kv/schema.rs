//! SQL text for a store's table.
//!
//! Statements are rendered once per store from the quoted table name and
//! reused through the connection's prepared statement cache.

use super::table::TableName;

/// Auto-numbering table created alongside every data table.
///
/// Nothing reads or writes it yet; it is part of the on-disk layout so files
/// stay compatible with stores that do.
pub const AUTONUM_TABLE: &str = "internal::autonum";

pub(crate) const CREATE_AUTONUM: &str =
    "CREATE TABLE IF NOT EXISTS \"internal::autonum\" (name TEXT PRIMARY KEY, value INTEGER)";

/// Statements bound to one data table.
#[derive(Debug, Clone)]
pub(crate) struct Statements {
    pub create: String,
    pub select_value: String,
    pub upsert: String,
    pub exists: String,
    pub delete: String,
    pub clear: String,
    pub select_keys: String,
    pub select_entries: String,
    pub count: String,
}

impl Statements {
    pub fn new(table: &TableName) -> Self {
        let t = table.quoted();
        Self {
            create: format!("CREATE TABLE IF NOT EXISTS {t} (key TEXT PRIMARY KEY, value TEXT)"),
            select_value: format!("SELECT value FROM {t} WHERE key = ?1"),
            upsert: format!("INSERT OR REPLACE INTO {t} (key, value) VALUES (?1, ?2)"),
            exists: format!("SELECT 1 FROM {t} WHERE key = ?1"),
            delete: format!("DELETE FROM {t} WHERE key = ?1"),
            clear: format!("DELETE FROM {t}"),
            select_keys: format!("SELECT key FROM {t}"),
            select_entries: format!("SELECT key, value FROM {t}"),
            count: format!("SELECT COUNT(*) FROM {t}"),
        }
    }
}
