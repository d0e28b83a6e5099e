// src/db/mod.rs

use std::{env, time::Duration};

use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Builds the process-wide pool. Called once at startup; everything else
/// borrows it through `AppState`.
pub async fn connect() -> anyhow::Result<Pool<Postgres>> {
    let database_url =
        env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

    let max_connections: u32 = env_or("DB_MAX_CONNECTIONS", 10);
    let acquire_timeout: u64 = env_or("DB_ACQUIRE_TIMEOUT_SECS", 5);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(acquire_timeout))
        .connect(&database_url)
        .await?;

    tracing::info!(max_connections, "connected to PostgreSQL");
    Ok(pool)
}
