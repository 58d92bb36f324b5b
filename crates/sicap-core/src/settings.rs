//! Application settings and the key-value interface they persist through.
//!
//! The dashboard persists exactly one preference: whether the sidebar is
//! collapsed. It is read once at start-up and written on every change.

use std::{collections::HashMap, convert::Infallible};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A string-keyed, string-valued persistence backend.
///
/// Implemented in-memory here and by `sicap-store-sqlite`.
pub trait KeyValueStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The value stored under `key`, or `None` if it was never set.
  fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

  /// Store `value` under `key`, replacing any previous value.
  fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// Process-local backend; nothing outlives the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
  entries: HashMap<String, String>,
}

impl MemoryKv {
  pub fn new() -> Self { Self::default() }
}

impl KeyValueStore for MemoryKv {
  type Error = Infallible;

  fn get(&self, key: &str) -> Result<Option<String>, Infallible> {
    Ok(self.entries.get(key).cloned())
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), Infallible> {
    self.entries.insert(key.to_owned(), value.to_owned());
    Ok(())
  }
}

// ─── Settings ────────────────────────────────────────────────────────────────

/// Key under which the sidebar preference is stored.
pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebar-collapsed";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
  pub sidebar_collapsed: bool,
}

fn backend<E: std::error::Error + Send + Sync + 'static>(err: E) -> Error {
  Error::Backend(Box::new(err))
}

impl AppSettings {
  /// Read settings from `store`. A missing key yields the default
  /// (expanded sidebar).
  pub fn load<S: KeyValueStore>(store: &S) -> Result<Self> {
    let sidebar_collapsed = match store.get(SIDEBAR_COLLAPSED_KEY).map_err(backend)? {
      Some(raw) => serde_json::from_str(&raw)?,
      None => false,
    };
    debug!(sidebar_collapsed, "settings loaded");
    Ok(Self { sidebar_collapsed })
  }

  /// Write every setting to `store`.
  pub fn save<S: KeyValueStore>(&self, store: &mut S) -> Result<()> {
    let raw = serde_json::to_string(&self.sidebar_collapsed)?;
    store.set(SIDEBAR_COLLAPSED_KEY, &raw).map_err(backend)?;
    debug!(sidebar_collapsed = self.sidebar_collapsed, "settings saved");
    Ok(())
  }

  /// Flip the sidebar preference and return the new value.
  pub fn toggle_sidebar(&mut self) -> bool {
    self.sidebar_collapsed = !self.sidebar_collapsed;
    self.sidebar_collapsed
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_key_loads_default() {
    let store = MemoryKv::new();
    assert_eq!(AppSettings::load(&store).unwrap(), AppSettings::default());
  }

  #[test]
  fn save_writes_json_bool() {
    let mut store = MemoryKv::new();
    let mut settings = AppSettings::default();
    assert!(settings.toggle_sidebar());
    settings.save(&mut store).unwrap();
    assert_eq!(store.get(SIDEBAR_COLLAPSED_KEY).unwrap().as_deref(), Some("true"));
    assert!(AppSettings::load(&store).unwrap().sidebar_collapsed);

    assert!(!settings.toggle_sidebar());
    settings.save(&mut store).unwrap();
    assert_eq!(store.get(SIDEBAR_COLLAPSED_KEY).unwrap().as_deref(), Some("false"));
  }

  #[test]
  fn malformed_value_is_an_error() {
    let mut store = MemoryKv::new();
    store.set(SIDEBAR_COLLAPSED_KEY, "yes please").unwrap();
    assert!(matches!(AppSettings::load(&store), Err(Error::Serialization(_))));
  }
}
