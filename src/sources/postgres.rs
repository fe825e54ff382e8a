use crate::config::DbConfig;
use crate::models::ListingRow;
use crate::sources::traits::RowStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use std::time::Duration;
use tracing::{debug, info};

const SELECT_ROWS: &str = r#"
    SELECT id::int8             AS id,
           adresse,
           stadtteil,
           qm::float8           AS qm,
           kaltmiete::float8    AS kaltmiete,
           warmmiete::float8    AS warmmiete,
           created_at::timestamptz AS created_at
    FROM wohnungen
    ORDER BY id
    LIMIT $1
"#;

/// `wohnungen` table in PostgreSQL
pub struct PgRowStore {
    pool: PgPool,
}

impl PgRowStore {
    /// Set up a lazily connecting pool; the server starts even if the
    /// database is down and reports failures per request.
    pub fn connect_lazy(config: &DbConfig) -> Self {
        // The server only accepts encrypted connections and uses a
        // self-signed certificate, so require TLS without verifying it.
        let mut options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .ssl_mode(PgSslMode::Require);
        if let Some(user) = &config.user {
            options = options.username(user);
        }
        if let Some(password) = &config.password {
            options = options.password(password);
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy_with(options);

        info!("Database pool for {}:{}/{}", config.host, config.port, config.database);
        Self { pool }
    }
}

#[async_trait]
impl RowStore for PgRowStore {
    async fn fetch_rows(&self, limit: i64) -> Result<Vec<ListingRow>> {
        let rows = sqlx::query_as::<_, ListingRow>(SELECT_ROWS)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .context("Failed to query wohnungen")?;
        debug!("Fetched {} rows", rows.len());
        Ok(rows)
    }

    async fn now(&self) -> Result<DateTime<Utc>> {
        sqlx::query_scalar::<_, DateTime<Utc>>("SELECT NOW()")
            .fetch_one(&self.pool)
            .await
            .context("Database not reachable")
    }
}
