//! Record model and model parameters (serde contract shared with the alert service).

use serde::{Deserialize, Serialize};

/// One sensor reading. Field names match the CSV header and the JSON input.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Record {
  pub timestamp: String,
  pub location_id: i32,
  pub temperature_celsius: f64,
  pub humidity_percent: f64,
  pub air_quality_index: i32,
  pub noise_level_db: f64,
  pub lighting_lux: f64,
  pub crowd_density: i32,
  /// Raw input, unclamped at the source.
  pub stress_level: i32,
  pub sleep_hours: f64,
  pub mood_score: f64,
  pub mental_health_status: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelParameters {
  // reserved; the scoring formula does not read it
  pub threshold: i32,
}

impl Default for ModelParameters {
  fn default() -> Self {
    Self { threshold: 60 }
  }
}

/// Output: one JSON object to stdout.
#[derive(Debug, Serialize)]
pub struct ScoreOutput {
  pub score: i32,
}
