//! Binary entrypoint for the stress alert service.

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use alert_service::{AppState, ServiceConfig};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(tracing_subscriber::fmt::layer())
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "alert_service=info,tower_http=info".into()))
    .init();

  if let Err(e) = run().await {
    tracing::error!(error = %e, "alert-service exiting");
    std::process::exit(1);
  }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
  let config = ServiceConfig::from_env()?;
  tracing::info!(db = ?config.db, max_connections = config.max_connections, "connecting");

  let pool = config.db.connect(config.max_connections).await?;
  let state = Arc::new(AppState { pool });

  let app = Router::new()
    .route("/health", get(alert_service::health))
    .route("/ingest", post(alert_service::ingest_handler))
    .route("/alerts", post(alert_service::alerts_handler))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state);

  tracing::info!("alert-service listening on http://{}", config.bind);
  let listener = tokio::net::TcpListener::bind(config.bind).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
