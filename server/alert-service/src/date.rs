//! Timestamp formatting utilities.

use chrono::NaiveDateTime;

/// Canonical ISO8601 form of a stored timestamp (fraction only when non-zero).
pub fn format_iso8601(ts: &NaiveDateTime) -> String {
  ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}
