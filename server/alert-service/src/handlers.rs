//! HTTP handlers: the invocation boundary where every error becomes `{"error": ...}`.

use axum::{
  body::Bytes,
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use stress_model::StressModel;

use crate::alerts;
use crate::error::ServiceError;
use crate::ingest::{self, PgAlertSink};
use crate::state::AppState;
use crate::types::{AlertQuery, AlertRow, ErrorOutput, IngestRequest, IngestSummary};

impl ServiceError {
  pub fn status(&self) -> StatusCode {
    if self.is_validation() {
      StatusCode::BAD_REQUEST
    } else {
      StatusCode::INTERNAL_SERVER_ERROR
    }
  }
}

impl IntoResponse for ServiceError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    } else {
      tracing::warn!(error = %self, "request rejected");
    }
    (status, Json(ErrorOutput::new(self.to_string()))).into_response()
  }
}

/// Decode a JSON body; an empty body means all defaults.
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ServiceError> {
  let body = if body.iter().all(u8::is_ascii_whitespace) {
    &b"{}"[..]
  } else {
    body
  };
  serde_json::from_slice(body).map_err(|e| ServiceError::validation("body", &e.to_string()))
}

pub async fn health() -> &'static str {
  "ok"
}

pub async fn ingest(
  State(state): State<Arc<AppState>>,
  body: Bytes,
) -> Result<Json<IngestSummary>, ServiceError> {
  let req = parse_body::<IngestRequest>(&body)?.validate()?;
  let model = StressModel::new(req.model_params);

  let sink = PgAlertSink::begin(&state.pool).await?;
  let summary = ingest::ingest(sink, &req.filepath, req.alert_level, &model).await?;
  Ok(Json(summary))
}

pub async fn alerts(
  State(state): State<Arc<AppState>>,
  body: Bytes,
) -> Result<Json<Vec<AlertRow>>, ServiceError> {
  let q = parse_body::<AlertQuery>(&body)?.validate()?;
  let rows = alerts::list_alerts(&state.pool, &q).await?;
  Ok(Json(rows))
}
