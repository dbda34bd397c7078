//! The two score components.

const SLEEP_BAND_LOW: f64 = 7.5;
const SLEEP_BAND_HIGH: f64 = 8.5;
const MAX_SLEEP_DEVIATION: f64 = 2.0;

/// 1.0 inside the recommended sleep band, linear down to 0.0 at a 2h deviation.
pub fn sleep_score(sleep_hours: f64) -> f64 {
  let deviation = if sleep_hours > SLEEP_BAND_HIGH {
    (sleep_hours - SLEEP_BAND_HIGH).min(MAX_SLEEP_DEVIATION)
  } else if sleep_hours < SLEEP_BAND_LOW {
    (SLEEP_BAND_LOW - sleep_hours).min(MAX_SLEEP_DEVIATION)
  } else {
    0.0
  };
  (MAX_SLEEP_DEVIATION - deviation) / MAX_SLEEP_DEVIATION
}

/// Stress level clamped to 0..=100, as a fraction.
pub fn normalize_stress_level(stress_level: i32) -> f64 {
  f64::from(stress_level.clamp(0, 100)) / 100.0
}
