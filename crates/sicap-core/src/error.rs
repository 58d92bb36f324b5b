//! Error types for `sicap-core`.
//!
//! Data operations on stores and matrices are total; these errors only arise
//! at the edges, when parsing external text or talking to a settings backend.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown {kind} option: {value:?}")]
  UnknownOption { kind: &'static str, value: String },

  #[error("semester out of range: {0} (expected 1..=8)")]
  SemesterOutOfRange(u8),

  #[error("unknown route: {0:?}")]
  UnknownRoute(String),

  #[error("invalid record id: {0}")]
  InvalidRecordId(#[from] uuid::Error),

  #[error("settings backend error: {0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
