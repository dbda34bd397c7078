//! Process configuration, read once at startup into explicit structs.

use std::net::SocketAddr;

use sqlx_postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::error::ServiceError;

pub const DEFAULT_DB_PORT: u16 = 5432;

/// Postgres connection settings. Acts as the connection factory.
#[derive(Clone)]
pub struct DbConfig {
  pub host: String,
  pub database: String,
  pub user: String,
  pub password: String,
  pub port: u16,
}

impl std::fmt::Debug for DbConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("DbConfig")
      .field("host", &self.host)
      .field("database", &self.database)
      .field("user", &self.user)
      .field("password", &"<redacted>")
      .field("port", &self.port)
      .finish()
  }
}

impl DbConfig {
  /// Read `DB_HOST`, `DB_NAME`, `DB_USER`, `DB_PASSWORD` and optional `DB_PORT`.
  pub fn from_env() -> Result<Self, ServiceError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServiceError> {
    let required = |key: &str| lookup(key).ok_or_else(|| ServiceError::config(format!("{} must be set", key)));
    let port = match lookup("DB_PORT") {
      Some(raw) => raw
        .parse()
        .map_err(|_| ServiceError::config(format!("DB_PORT must be a valid u16, got {:?}", raw)))?,
      None => DEFAULT_DB_PORT,
    };
    Ok(Self {
      host: required("DB_HOST")?,
      database: required("DB_NAME")?,
      user: required("DB_USER")?,
      password: required("DB_PASSWORD")?,
      port,
    })
  }

  pub fn connect_options(&self) -> PgConnectOptions {
    PgConnectOptions::new()
      .host(&self.host)
      .port(self.port)
      .username(&self.user)
      .password(&self.password)
      .database(&self.database)
  }

  /// Open a pool. Each invocation checks out its own connection and returns it on drop.
  pub async fn connect(&self, max_connections: u32) -> Result<PgPool, ServiceError> {
    let pool = PgPoolOptions::new()
      .max_connections(max_connections)
      .connect_with(self.connect_options())
      .await?;
    Ok(pool)
  }
}

/// Service settings.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
  /// Bind address; internal only by default.
  pub bind: SocketAddr,
  pub max_connections: u32,
  pub db: DbConfig,
}

impl ServiceConfig {
  pub fn from_env() -> Result<Self, ServiceError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServiceError> {
    let bind = match lookup("BIND_ADDR") {
      Some(raw) => raw
        .parse()
        .map_err(|_| ServiceError::config(format!("BIND_ADDR must be host:port, got {:?}", raw)))?,
      None => SocketAddr::from(([127, 0, 0, 1], 5005)),
    };
    let max_connections = match lookup("DB_MAX_CONNECTIONS") {
      Some(raw) => match raw.parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => return Err(ServiceError::config(format!("DB_MAX_CONNECTIONS must be a positive integer, got {:?}", raw))),
      },
      None => 5,
    };
    Ok(Self {
      bind,
      max_connections,
      db: DbConfig::from_lookup(&lookup)?,
    })
  }
}
