//! Structured error types for the alert service.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
  #[error("validation: {field}: {reason}")]
  Validation { field: String, reason: String },

  #[error("config: {0}")]
  Config(String),

  #[error("cannot open {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("parse: {0}")]
  Parse(#[from] csv::Error),

  #[error("database: {0}")]
  Database(#[from] sqlx_core::Error),

  #[error("reader task: {0}")]
  Task(#[from] tokio::task::JoinError),
}

impl ServiceError {
  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn config(msg: impl Into<String>) -> Self {
    Self::Config(msg.into())
  }

  /// Rejected before any storage access.
  pub fn is_validation(&self) -> bool {
    matches!(self, Self::Validation { .. })
  }
}
