//! SQLite backend for SI-CAP application settings.
//!
//! Implements [`sicap_core::settings::KeyValueStore`] over a single table, so
//! preferences survive between runs of the dashboard.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteKv;
