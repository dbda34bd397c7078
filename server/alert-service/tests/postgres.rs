//! Storage tests against a live Postgres.
//!
//! Set `DATABASE_URL` to run them; each test works in its own throwaway schema.
//! Without it they return early.

use std::io::Write;

use alert_service::{
  ingest, list_alerts, AlertQuery, IngestSummary, OrderBy, PgAlertSink, ServiceError, SortDirection,
  ALERT_TABLE,
};
use sqlx_core::query::query;
use sqlx_core::row::Row;
use sqlx_postgres::{PgConnectOptions, PgPool, Postgres};
use stress_model::StressModel;

const HEADER: &str = "timestamp,location_id,temperature_celsius,humidity_percent,air_quality_index,noise_level_db,lighting_lux,crowd_density,stress_level,sleep_hours,mood_score,mental_health_status";

// Scores 50, 80, 95 with the default model.
const ROWS: [&str; 3] = [
  "2024-05-02 03:15:00,101,22.5,40.1,50,45.0,300.0,10,0,8.0,3.0,1",
  "2024-05-02 03:20:00,102,24.0,42.3,80,55.5,280.0,25,60,8.0,2.5,1",
  "2024-05-02 03:25:00.500,103,26.1,48.9,144,63.2,253.6,50,90,8.0,2.0,2",
];

/// A pool pinned to a fresh schema holding the alert table.
struct Scratch {
  admin: PgPool,
  pool: PgPool,
  schema: String,
}

impl Scratch {
  async fn open(name: &str) -> Option<Self> {
    let url = match std::env::var("DATABASE_URL") {
      Ok(url) => url,
      Err(_) => {
        eprintln!("{}: DATABASE_URL not set, skipping", name);
        return None;
      }
    };
    let base: PgConnectOptions = url.parse().expect("DATABASE_URL");
    let schema = format!("alert_service_{}_{}", name, std::process::id());

    let admin = PgPool::connect_with(base.clone()).await.unwrap();
    query::<Postgres>(&format!("DROP SCHEMA IF EXISTS {} CASCADE", schema))
      .execute(&admin)
      .await
      .unwrap();
    query::<Postgres>(&format!("CREATE SCHEMA {}", schema))
      .execute(&admin)
      .await
      .unwrap();

    let pool = PgPool::connect_with(base.options([("search_path", schema.as_str())]))
      .await
      .unwrap();
    query::<Postgres>(include_str!("../sql/high_stress_alerts.sql"))
      .execute(&pool)
      .await
      .unwrap();
    Some(Self { admin, pool, schema })
  }

  async fn alert_count(&self) -> i64 {
    let row = query::<Postgres>(&format!("SELECT COUNT(*) AS n FROM {}", ALERT_TABLE))
      .fetch_one(&self.pool)
      .await
      .unwrap();
    row.try_get("n").unwrap()
  }

  async fn ingest_rows(&self, rows: &[&str]) -> Result<IngestSummary, ServiceError> {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "{}", HEADER).unwrap();
    for row in rows {
      writeln!(f, "{}", row).unwrap();
    }
    f.flush().unwrap();

    let sink = PgAlertSink::begin(&self.pool).await?;
    ingest(sink, f.path().to_str().unwrap(), 70, &StressModel::default()).await
  }

  async fn close(self) {
    self.pool.close().await;
    query::<Postgres>(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
      .execute(&self.admin)
      .await
      .unwrap();
  }
}

#[tokio::test]
async fn score_desc_page_returns_highest_first() {
  let Some(db) = Scratch::open("score_desc").await else { return };

  let summary = db.ingest_rows(&ROWS).await.unwrap();
  assert_eq!(summary, IngestSummary { scanned: 3, high_stress: 2 });
  assert_eq!(db.alert_count().await, 2);

  let page = list_alerts(
    &db.pool,
    &AlertQuery {
      limit: 2,
      offset: 0,
      order_by: OrderBy::Score,
      direction: SortDirection::Desc,
    },
  )
  .await
  .unwrap();
  let scores: Vec<i32> = page.iter().map(|a| a.score).collect();
  assert_eq!(scores, vec![95, 80]);
  assert_eq!(page[0].timestamp, "2024-05-02T03:25:00.500");
  assert_eq!(page[1].timestamp, "2024-05-02T03:20:00");

  db.close().await;
}

#[tokio::test]
async fn pagination_past_the_end_is_empty() {
  let Some(db) = Scratch::open("past_end").await else { return };
  db.ingest_rows(&ROWS).await.unwrap();

  let newest_first = list_alerts(&db.pool, &AlertQuery::default()).await.unwrap();
  assert_eq!(newest_first.len(), 2);
  assert_eq!(newest_first[0].score, 95);
  assert!(newest_first.iter().all(|a| a.timestamp.contains('T')));

  let second_page = list_alerts(&db.pool, &AlertQuery { limit: 1, offset: 1, ..AlertQuery::default() })
    .await
    .unwrap();
  assert_eq!(second_page.len(), 1);
  assert_eq!(second_page[0].score, 80);

  let past_end = list_alerts(&db.pool, &AlertQuery { offset: 10, ..AlertQuery::default() })
    .await
    .unwrap();
  assert!(past_end.is_empty());

  db.close().await;
}

#[tokio::test]
async fn failed_runs_leave_no_rows_behind() {
  let Some(db) = Scratch::open("rollback").await else { return };
  db.ingest_rows(&ROWS).await.unwrap();
  assert_eq!(db.alert_count().await, 2);

  // Alerts for rows 2 and 3 are inserted before the malformed row is reached.
  let bad_temperature = "2024-05-02 03:30:00,104,warm,48.9,144,63.2,253.6,50,90,8.0,2.0,2";
  let err = db.ingest_rows(&[ROWS[1], ROWS[2], bad_temperature]).await.unwrap_err();
  assert!(matches!(err, ServiceError::Parse(_)), "{}", err);
  assert_eq!(db.alert_count().await, 2);

  // Rejected by the `::timestamp` cast on insert.
  let bad_timestamp = "not-a-time,105,26.1,48.9,144,63.2,253.6,50,90,8.0,2.0,2";
  let err = db.ingest_rows(&[ROWS[2], bad_timestamp]).await.unwrap_err();
  assert!(matches!(err, ServiceError::Database(_)), "{}", err);
  assert_eq!(db.alert_count().await, 2);

  db.close().await;
}
