//! Stress Alert Service
//!
//! Streams sensor-reading CSV files through the stress model, stores readings
//! scoring above the alert level, and serves paginated reads over them.

mod alerts;
mod date;
mod handlers;
mod ingest;
mod state;

pub mod config;
pub mod error;
pub mod types;

/// Canonical table holding stored alerts.
pub const ALERT_TABLE: &str = "high_stress_alerts";

pub use alerts::{list_alerts, select_sql};
pub use config::{DbConfig, ServiceConfig};
pub use error::ServiceError;
pub use handlers::{alerts as alerts_handler, health, ingest as ingest_handler};
pub use ingest::{ingest, AlertSink, PgAlertSink};
pub use state::AppState;
pub use types::{AlertQuery, AlertRecord, AlertRow, IngestRequest, IngestSummary, OrderBy, SortDirection};
