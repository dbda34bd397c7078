//! Request/response types for the alert service (JSON contracts + stored rows).

use serde::{Deserialize, Serialize};
use stress_model::{ModelParameters, Record};

use crate::error::ServiceError;

pub const DEFAULT_FILEPATH: &str = "university_mental_health_iot_dataset.csv";
pub const DEFAULT_ALERT_LEVEL: i32 = 70;

// ---------------------------------------------------------------------------
// Ingestion contract
// ---------------------------------------------------------------------------

/// Ingestion invocation. Unknown fields are rejected.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestRequest {
  pub filepath: String,
  pub alert_level: i32,
  pub model_params: ModelParameters,
}

impl Default for IngestRequest {
  fn default() -> Self {
    Self {
      filepath: DEFAULT_FILEPATH.to_string(),
      alert_level: DEFAULT_ALERT_LEVEL,
      model_params: ModelParameters::default(),
    }
  }
}

impl IngestRequest {
  pub fn validate(self) -> Result<Self, ServiceError> {
    if self.filepath.trim().is_empty() {
      return Err(ServiceError::validation("filepath", "must not be empty"));
    }
    Ok(self)
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
  pub scanned: u64,
  pub high_stress: u64,
}

/// A reading that scored above the alert level, with provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRecord {
  pub filepath: String,
  pub record: Record,
  pub score: i32,
}

// ---------------------------------------------------------------------------
// Query contract
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
  #[default]
  Timestamp,
  Score,
}

impl OrderBy {
  pub fn column(self) -> &'static str {
    match self {
      Self::Timestamp => "timestamp",
      Self::Score => "score",
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
  Asc,
  #[default]
  Desc,
}

impl SortDirection {
  pub fn keyword(self) -> &'static str {
    match self {
      Self::Asc => "ASC",
      Self::Desc => "DESC",
    }
  }
}

/// Alert listing invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlertQuery {
  pub limit: i64,
  pub offset: i64,
  pub order_by: OrderBy,
  pub direction: SortDirection,
}

impl Default for AlertQuery {
  fn default() -> Self {
    Self {
      limit: 10,
      offset: 0,
      order_by: OrderBy::default(),
      direction: SortDirection::default(),
    }
  }
}

impl AlertQuery {
  pub fn validate(self) -> Result<Self, ServiceError> {
    if self.limit < 0 {
      return Err(ServiceError::validation("limit", "must not be negative"));
    }
    if self.offset < 0 {
      return Err(ServiceError::validation("offset", "must not be negative"));
    }
    Ok(self)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertRow {
  pub record_id: i32,
  pub score: i32,
  /// ISO-8601.
  pub timestamp: String,
}

// ---------------------------------------------------------------------------
// Failure body
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: String,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self { error: message.into() }
  }
}
