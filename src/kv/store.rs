//! KV store implementation on top of SQLite.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::codec::{Codec, JsonCodec};
use crate::logging::{debug, info, trace, warn};

use super::error::KvError;
use super::options::{Durability, StoreOptions, StorePath};
use super::schema::{CREATE_AUTONUM, Statements};
use super::table::TableName;

/// A typed key-value store backed by a single SQLite table.
///
/// Every value is written through the store's [`Codec`] (JSON by default) and
/// kept as text next to its key. Keys are unique; writing an existing key
/// replaces its value.
///
/// # Example
///
/// ```ignore
/// use simple_kv::{KvStore, StoreOptions};
///
/// #[derive(Serialize, Deserialize)]
/// struct Session { user: String, expires: u64 }
///
/// let sessions: KvStore<Session> =
///     KvStore::open(StoreOptions::new("sessions").with_path("data/app.db"))?;
///
/// sessions.set("abc", &Session { user: "ada".into(), expires: 1700000000 })?;
/// if let Some(session) = sessions.get("abc")? {
///     println!("{} until {}", session.user, session.expires);
/// }
///
/// for (key, session) in sessions.entries()? {
///     println!("{key}: {}", session.user);
/// }
///
/// sessions.delete("abc")?;
/// ```
///
/// # Persistence
///
/// The store owns one connection for its whole life. It is opened with
/// `synchronous = NORMAL` and write-ahead logging unless the options say
/// otherwise, and closed when the store is dropped or [`close`](Self::close)d.
/// Several stores may point at the same file, with different or identical
/// tables; SQLite's own locking arbitrates between them.
pub struct KvStore<V, C = JsonCodec> {
    conn: Connection,
    table: TableName,
    path: StorePath,
    sql: Statements,
    codec: C,
    _value: PhantomData<fn() -> V>,
}

impl<V> KvStore<V, JsonCodec>
where
    V: Serialize + DeserializeOwned,
{
    /// Open (creating if needed) the store described by `options`, storing
    /// values as JSON.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use simple_kv::{KvStore, StoreOptions};
    ///
    /// // data/kv.db under the current directory
    /// let store: KvStore<u64> = KvStore::open(StoreOptions::new("counters"))?;
    /// ```
    pub fn open(options: StoreOptions) -> Result<Self, KvError> {
        Self::open_with_codec(options, JsonCodec)
    }

    /// Open a store in a private in-memory database.
    pub fn in_memory(name: &str) -> Result<Self, KvError> {
        Self::open(StoreOptions::new(name).in_memory())
    }
}

impl<V, C> KvStore<V, C>
where
    V: Serialize + DeserializeOwned,
    C: Codec,
{
    /// Open (creating if needed) the store described by `options`, storing
    /// values with `codec`.
    ///
    /// Opening is idempotent: the tables are created only if they do not exist
    /// yet and existing rows are left untouched.
    pub fn open_with_codec(options: StoreOptions, codec: C) -> Result<Self, KvError> {
        let table = TableName::new(options.name)?;
        let path = StorePath::resolve(options.path.as_deref())?;
        debug!(table = %table, path = %path, "opening KV store");

        let conn = match &path {
            StorePath::Memory => Connection::open_in_memory()?,
            StorePath::File(file) => {
                ensure_parent_dir(file)?;
                Connection::open(file)?
            }
        };

        apply_durability(&conn, options.durability)?;
        if let Some(timeout_ms) = options.busy_timeout_ms {
            conn.busy_timeout(Duration::from_millis(timeout_ms))?;
        }

        let sql = Statements::new(&table);
        conn.execute(CREATE_AUTONUM, [])?;
        conn.execute(&sql.create, [])?;

        info!(table = %table, path = %path, codec = codec.name(), "KV store opened");
        Ok(Self {
            conn,
            table,
            path,
            sql,
            codec,
            _value: PhantomData,
        })
    }

    /// Get the value stored under `key`.
    pub fn get(&self, key: &str) -> Result<Option<V>, KvError> {
        trace!(table = %self.table, key = key, "getting value");
        let mut stmt = self.conn.prepare_cached(&self.sql.select_value)?;
        let text: Option<String> = stmt.query_row(params![key], |row| row.get(0)).optional()?;
        text.map(|text| self.decode(key, &text)).transpose()
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// Fails with [`KvError::Codec`] without writing anything if the encoded
    /// text does not decode back into a `V` (JSON turns `NaN` into `null`,
    /// for one).
    pub fn set(&self, key: &str, value: &V) -> Result<(), KvError> {
        trace!(table = %self.table, key = key, "setting value");
        let text = self
            .codec
            .encode(value)
            .map_err(|e| KvError::codec(key, e))?;
        self.decode(key, &text)?;
        let mut stmt = self.conn.prepare_cached(&self.sql.upsert)?;
        stmt.execute(params![key, text])?;
        Ok(())
    }

    /// Return the value under `key`, storing `default` first if there is none.
    ///
    /// The check and the write are separate statements; a concurrent writer
    /// on the same file can slip in between them.
    pub fn ensure(&self, key: &str, default: V) -> Result<V, KvError> {
        if let Some(existing) = self.get(key)? {
            return Ok(existing);
        }
        self.set(key, &default)?;
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Check whether `key` has a value.
    pub fn has(&self, key: &str) -> Result<bool, KvError> {
        let mut stmt = self.conn.prepare_cached(&self.sql.exists)?;
        Ok(stmt.exists(params![key])?)
    }

    /// Remove `key`. Returns `true` if a row was removed.
    pub fn delete(&self, key: &str) -> Result<bool, KvError> {
        trace!(table = %self.table, key = key, "deleting value");
        let mut stmt = self.conn.prepare_cached(&self.sql.delete)?;
        Ok(stmt.execute(params![key])? > 0)
    }

    /// Remove every record in this store's table.
    #[cfg_attr(not(feature = "logging"), allow(unused_variables))]
    pub fn clear(&self) -> Result<(), KvError> {
        let mut stmt = self.conn.prepare_cached(&self.sql.clear)?;
        let removed = stmt.execute([])?;
        debug!(table = %self.table, removed = removed, "table cleared");
        Ok(())
    }

    /// All keys, in no particular order.
    pub fn keys(&self) -> Result<Vec<String>, KvError> {
        let mut stmt = self.conn.prepare_cached(&self.sql.select_keys)?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// All values, in no particular order.
    pub fn values(&self) -> Result<Vec<V>, KvError> {
        Ok(self.entries()?.into_iter().map(|(_, value)| value).collect())
    }

    /// All `(key, value)` pairs, in no particular order.
    pub fn entries(&self) -> Result<Vec<(String, V)>, KvError> {
        let mut stmt = self.conn.prepare_cached(&self.sql.select_entries)?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (key, text) = row?;
            let value = self.decode(&key, &text)?;
            entries.push((key, value));
        }
        Ok(entries)
    }

    /// Number of records.
    pub fn size(&self) -> Result<usize, KvError> {
        let mut stmt = self.conn.prepare_cached(&self.sql.count)?;
        let count = stmt.query_row([], |row| {
            let count: i64 = row.get(0)?;
            usize::try_from(count).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, count))
        })?;
        Ok(count)
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> Result<bool, KvError> {
        Ok(self.size()? == 0)
    }

    fn decode(&self, key: &str, text: &str) -> Result<V, KvError> {
        self.codec.decode(text).map_err(|e| KvError::codec(key, e))
    }
}

impl<V, C> KvStore<V, C> {
    /// Table name this store reads and writes.
    pub fn name(&self) -> &str {
        self.table.as_str()
    }

    /// Validated table identifier.
    pub fn table(&self) -> &TableName {
        &self.table
    }

    /// Resolved database location.
    pub fn path(&self) -> &StorePath {
        &self.path
    }

    /// Codec used for every value in this store.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// The underlying connection, for anything the typed API does not cover.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Close the connection, reporting any error SQLite raises on close.
    ///
    /// Dropping the store also closes it, but silently.
    pub fn close(self) -> Result<(), KvError> {
        info!(table = %self.table, "closing KV store");
        self.conn.close().map_err(|(_, e)| KvError::Sqlite(e))
    }
}

impl<V, C> fmt::Debug for KvStore<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KvStore")
            .field("table", &self.table)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

fn ensure_parent_dir(file: &Path) -> Result<(), KvError> {
    let Some(parent) = file.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }
    debug!(dir = %parent.display(), "creating database directory");
    std::fs::create_dir_all(parent)?;
    Ok(())
}

fn apply_durability(conn: &Connection, durability: Durability) -> Result<(), KvError> {
    conn.execute_batch(&format!(
        "PRAGMA synchronous = {}",
        durability.synchronous.as_sql()
    ))?;

    // journal_mode answers with the mode actually in effect
    let requested = durability.journal_mode.as_sql();
    let mode: String = conn.query_row(&format!("PRAGMA journal_mode = {requested}"), [], |row| {
        row.get(0)
    })?;
    if !mode.eq_ignore_ascii_case(requested) {
        warn!(requested = requested, actual = %mode, "journal mode not applied");
    }

    debug!(
        synchronous = durability.synchronous.as_sql(),
        journal_mode = %mode,
        "durability settings applied"
    );
    Ok(())
}
