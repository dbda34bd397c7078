//! Alert query service: paginated, sortable reads over stored alerts.

use chrono::NaiveDateTime;
use sqlx_core::query::query;
use sqlx_core::row::Row;
use sqlx_postgres::{PgPool, PgRow, Postgres};

use crate::date;
use crate::error::ServiceError;
use crate::types::{AlertQuery, AlertRow, OrderBy, SortDirection};
use crate::ALERT_TABLE;

/// SELECT for one sort choice. Column and direction come from closed enums, so
/// only `LIMIT`/`OFFSET` are bound. Ties fall back to storage order.
pub fn select_sql(order_by: OrderBy, direction: SortDirection) -> String {
  format!(
    "SELECT record_id, score, timestamp FROM {} ORDER BY {} {} LIMIT $1 OFFSET $2",
    ALERT_TABLE,
    order_by.column(),
    direction.keyword()
  )
}

/// Fetch one page of alerts. An offset past the end yields an empty page.
pub async fn list_alerts(pool: &PgPool, q: &AlertQuery) -> Result<Vec<AlertRow>, ServiceError> {
  let sql = select_sql(q.order_by, q.direction);
  tracing::debug!(limit = q.limit, offset = q.offset, %sql, "listing alerts");

  let rows = query::<Postgres>(&sql)
    .bind(q.limit)
    .bind(q.offset)
    .fetch_all(pool)
    .await?;

  rows.iter().map(alert_row).collect()
}

fn alert_row(row: &PgRow) -> Result<AlertRow, ServiceError> {
  let timestamp: NaiveDateTime = row.try_get("timestamp")?;
  Ok(AlertRow {
    record_id: row.try_get("record_id")?,
    score: row.try_get("score")?,
    timestamp: date::format_iso8601(&timestamp),
  })
}
