use std::time::Duration;

use anyhow::{Context, Result, bail};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::config::DatabaseConfig;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const SQLITE_BUSY_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    pub fn from_url(url: &str) -> Result<Self> {
        let normalized = url.trim().to_ascii_lowercase();
        if normalized.starts_with("postgres://") || normalized.starts_with("postgresql://") {
            Ok(Backend::Postgres)
        } else if normalized.starts_with("sqlite:") {
            Ok(Backend::Sqlite)
        } else {
            bail!(
                "unsupported database url '{}'; expected scheme postgres://, postgresql://, or sqlite:",
                redact_url(url)
            )
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Postgres => "postgres",
            Backend::Sqlite => "sqlite",
        }
    }
}

/// Opens the pool and brings the `users`/`todos` tables in line with the entities.
pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    let backend = Backend::from_url(&cfg.url)?;

    let mut options = ConnectOptions::new(cfg.url.clone());
    options
        .max_connections(cfg.max_connections)
        .min_connections(cfg.min_idle)
        .connect_timeout(CONNECT_TIMEOUT)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .with_context(|| format!("failed to connect to {} database", backend.as_str()))?;

    if backend == Backend::Sqlite {
        db.execute_unprepared("PRAGMA foreign_keys = ON").await?;
        db.execute_unprepared(&format!("PRAGMA busy_timeout = {SQLITE_BUSY_TIMEOUT_MS}"))
            .await?;
    }

    info!(backend = backend.as_str(), "syncing database schema from entities");
    db.get_schema_registry("todo_api::db::entities::*")
        .sync(&db)
        .await
        .context("failed to sync database schema")?;
    Ok(db)
}

fn redact_url(url: &str) -> String {
    match url.trim().split_once(':') {
        Some((scheme, _)) => format!("{scheme}:<redacted>"),
        None => "<invalid-url>".to_string(),
    }
}
