//! [`SqliteKv`] — the SQLite implementation of [`KeyValueStore`].

use std::path::Path;

use rusqlite::{Connection, OptionalExtension as _};
use tracing::debug;

use sicap_core::settings::KeyValueStore;

use crate::{
  Error, Result,
  schema::{SCHEMA, SCHEMA_VERSION},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A settings store backed by a single SQLite file.
pub struct SqliteKv {
  conn: Connection,
}

impl SqliteKv {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening settings database");
    Self::init(Connection::open(path)?)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> { Self::init(Connection::open_in_memory()?) }

  fn init(conn: Connection) -> Result<Self> {
    let found: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    if found > SCHEMA_VERSION {
      return Err(Error::SchemaVersion { found, supported: SCHEMA_VERSION });
    }
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn })
  }

  /// Delete `key`; returns whether it was present.
  pub fn remove(&self, key: &str) -> Result<bool> {
    let n = self.conn.execute("DELETE FROM settings WHERE key = ?1", rusqlite::params![key])?;
    Ok(n > 0)
  }
}

impl KeyValueStore for SqliteKv {
  type Error = Error;

  fn get(&self, key: &str) -> Result<Option<String>> {
    let value = self
      .conn
      .query_row(
        "SELECT value FROM settings WHERE key = ?1",
        rusqlite::params![key],
        |r| r.get(0),
      )
      .optional()?;
    Ok(value)
  }

  fn set(&mut self, key: &str, value: &str) -> Result<()> {
    self.conn.execute(
      "INSERT INTO settings (key, value) VALUES (?1, ?2)
       ON CONFLICT(key) DO UPDATE SET
         value      = excluded.value,
         updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
      rusqlite::params![key, value],
    )?;
    debug!(key, "setting written");
    Ok(())
  }
}
