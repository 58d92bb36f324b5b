//! The settings backend the dashboard writes its sidebar preference to.

use std::path::Path;

use sicap_core::settings::{KeyValueStore, MemoryKv};
use sicap_store_sqlite::SqliteKv;
use tracing::warn;

/// SQLite when the database opens, otherwise a process-local map so the UI
/// still works (the preference just does not survive a restart).
pub enum Prefs {
  Sqlite(SqliteKv),
  Memory(MemoryKv),
}

impl Prefs {
  pub fn open(path: &Path) -> Self {
    match SqliteKv::open(path) {
      Ok(kv) => Self::Sqlite(kv),
      Err(e) => {
        warn!(path = %path.display(), error = %e, "settings database unavailable; not persisting");
        Self::Memory(MemoryKv::new())
      }
    }
  }
}

impl KeyValueStore for Prefs {
  type Error = sicap_store_sqlite::Error;

  fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
    match self {
      Self::Sqlite(kv) => kv.get(key),
      Self::Memory(kv) => kv.get(key).map_err(|e| match e {}),
    }
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
    match self {
      Self::Sqlite(kv) => kv.set(key, value),
      Self::Memory(kv) => kv.set(key, value).map_err(|e| match e {}),
    }
  }
}
