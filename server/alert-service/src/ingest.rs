//! Ingestion pipeline: stream a CSV file, score every row, store rows above the alert level.

use std::fs::File;
use std::future::Future;
use std::path::Path;
use std::time::{Duration, Instant};

use sqlx_core::query::query;
use sqlx_core::transaction::Transaction;
use sqlx_postgres::{PgConnection, PgPool, Postgres};
use stress_model::{Record, StressModel};
use tokio::sync::mpsc;

use crate::error::ServiceError;
use crate::types::{AlertRecord, IngestSummary};
use crate::ALERT_TABLE;

/// Destination for alerts produced by one ingestion run.
///
/// Inserts are staged until `commit`; dropping a sink without committing discards them.
pub trait AlertSink: Send + Sized {
  fn insert(&mut self, alert: &AlertRecord) -> impl Future<Output = Result<(), ServiceError>> + Send;

  fn commit(self) -> impl Future<Output = Result<(), ServiceError>> + Send;
}

/// Postgres sink: one transaction per run, rolled back on drop.
pub struct PgAlertSink {
  tx: Transaction<'static, Postgres>,
}

impl PgAlertSink {
  pub async fn begin(pool: &PgPool) -> Result<Self, ServiceError> {
    Ok(Self { tx: pool.begin().await? })
  }
}

impl AlertSink for PgAlertSink {
  async fn insert(&mut self, alert: &AlertRecord) -> Result<(), ServiceError> {
    insert_alert(&mut *self.tx, alert).await
  }

  async fn commit(self) -> Result<(), ServiceError> {
    self.tx.commit().await?;
    Ok(())
  }
}

async fn insert_alert(conn: &mut PgConnection, alert: &AlertRecord) -> Result<(), ServiceError> {
  let sql = format!(
    r#"
    INSERT INTO {} (
      filepath, timestamp, location_id, temperature_celsius, humidity_percent,
      air_quality_index, noise_level_db, lighting_lux, crowd_density,
      stress_level, sleep_hours, mood_score, mental_health_status, score
    )
    VALUES ($1, $2::timestamp, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
    "#,
    ALERT_TABLE
  );
  let r = &alert.record;
  query::<Postgres>(&sql)
    .bind(&alert.filepath)
    .bind(&r.timestamp)
    .bind(r.location_id)
    .bind(r.temperature_celsius)
    .bind(r.humidity_percent)
    .bind(r.air_quality_index)
    .bind(r.noise_level_db)
    .bind(r.lighting_lux)
    .bind(r.crowd_density)
    .bind(r.stress_level)
    .bind(r.sleep_hours)
    .bind(r.mood_score)
    .bind(r.mental_health_status)
    .bind(alert.score)
    .execute(conn)
    .await?;
  Ok(())
}

/// Alerts in flight between the file reader and the inserter.
const ALERT_CHANNEL_CAPACITY: usize = 64;

/// Ingest `filepath` into `sink`, returning rows seen and rows above `alert_level`.
///
/// The file is read and scored on a blocking thread; alerts reach the sink in file
/// order through a bounded channel. All-or-nothing: a malformed row or a failed
/// insert aborts the run before `commit`, so nothing from this run is kept.
pub async fn ingest<S: AlertSink>(
  mut sink: S,
  filepath: &str,
  alert_level: i32,
  model: &StressModel,
) -> Result<IngestSummary, ServiceError> {
  tracing::info!(
    filepath,
    alert_level,
    threshold = model.params().threshold,
    "ingesting"
  );

  let (tx, mut rx) = mpsc::channel(ALERT_CHANNEL_CAPACITY);
  let path = filepath.to_string();
  let model = model.clone();
  let scan = tokio::task::spawn_blocking(move || scan_file(&path, alert_level, &model, &tx));

  // An early return drops `rx`, which stops the reader at its next send.
  while let Some(alert) = rx.recv().await {
    sink.insert(&alert).await?;
  }
  let summary = scan.await??;

  sink.commit().await?;
  tracing::info!(scanned = summary.scanned, high_stress = summary.high_stress, "ingestion committed");
  Ok(summary)
}

fn scan_file(
  filepath: &str,
  alert_level: i32,
  model: &StressModel,
  alerts: &mpsc::Sender<AlertRecord>,
) -> Result<IngestSummary, ServiceError> {
  let file = File::open(filepath).map_err(|source| ServiceError::Io {
    path: Path::new(filepath).to_path_buf(),
    source,
  })?;
  let mut reader = csv::Reader::from_reader(file);

  let mut summary = IngestSummary::default();
  let mut scoring_time = Duration::ZERO;

  for row in reader.deserialize::<Record>() {
    let record = row?;
    summary.scanned += 1;

    let started = Instant::now();
    let score = model.predict(&record);
    let elapsed = started.elapsed();
    scoring_time += elapsed;
    tracing::debug!(row = summary.scanned, score, elapsed_ns = elapsed.as_nanos() as u64, "scored");

    if score <= alert_level {
      continue;
    }

    tracing::info!(row = summary.scanned, score, timestamp = %record.timestamp, "detected high stress event");
    summary.high_stress += 1;
    let alert = AlertRecord {
      filepath: filepath.to_string(),
      record,
      score,
    };
    if alerts.blocking_send(alert).is_err() {
      // inserter gave up; its error is the one reported
      break;
    }
  }

  if summary.scanned > 0 {
    let average = scoring_time / u32::try_from(summary.scanned).unwrap_or(u32::MAX);
    tracing::info!(average_ns = average.as_nanos() as u64, "average scoring time");
  }
  Ok(summary)
}
