//! Stress scoring model — rule-based, deterministic; no DB, no network.
//! Used by the alert service as a library and by the binary for stdin/stdout.

mod score;
mod types;

pub use score::{normalize_stress_level, sleep_score};
pub use types::{ModelParameters, Record, ScoreOutput};

/// Scores sensor readings. Holds the caller-supplied parameters for the run.
#[derive(Debug, Clone, Default)]
pub struct StressModel {
  params: ModelParameters,
}

impl StressModel {
  pub fn new(params: ModelParameters) -> Self {
    Self { params }
  }

  pub fn params(&self) -> &ModelParameters {
    &self.params
  }

  /// Stress score 0–100, higher meaning more stress.
  ///
  /// `params.threshold` is carried but does not enter the formula.
  pub fn predict(&self, record: &Record) -> i32 {
    let stress_score = (sleep_score(record.sleep_hours) + normalize_stress_level(record.stress_level)) / 2.0;
    // `as` truncates toward zero.
    (stress_score * 100.0) as i32
  }
}
