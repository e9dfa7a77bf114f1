//! PostgreSQL connection handling for the Tastr backend
//!
//! Provides pool configuration from the environment, pool construction,
//! a connectivity check, and startup bootstrap of the `foods` and `orders`
//! tables. There is no migrations system; the schema is created in place
//! when missing.

use crate::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::time::Duration;
use tracing::info;

/// Database configuration struct
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    ///
    /// # Environment Variables
    /// - `DATABASE_URL`: PostgreSQL connection URL
    /// - `DATABASE_MAX_CONNECTIONS`: Maximum number of connections (default: 10)
    /// - `DATABASE_ACQUIRE_TIMEOUT`: Acquire timeout in seconds (default: 30)
    pub fn from_env() -> DatabaseResult<Self> {
        let database_url = env::var("DATABASE_URL").map_err(|_| {
            DatabaseError::Configuration("DATABASE_URL environment variable not set".to_string())
        })?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let acquire_timeout = env::var("DATABASE_ACQUIRE_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout,
        })
    }
}

/// Initialize a PostgreSQL connection pool
pub async fn init_pool(config: &DatabaseConfig) -> DatabaseResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout))
        .connect(&config.database_url)
        .await
        .map_err(DatabaseError::Connection)?;

    info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

/// Check database connectivity
pub async fn health_check(pool: &PgPool) -> DatabaseResult<bool> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(DatabaseError::Query)?;

    Ok(true)
}

/// Create the `foods` and `orders` tables when they do not exist yet
///
/// Identifiers are UUIDs assigned by the database on insert. The `orders`
/// table denormalizes the food name/price/image as captured at placement
/// time; it is never updated afterwards.
pub async fn ensure_schema(pool: &PgPool) -> DatabaseResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS foods (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            image TEXT NOT NULL,
            description TEXT NOT NULL,
            origin TEXT NOT NULL,
            price DOUBLE PRECISION NOT NULL,
            quantity BIGINT NOT NULL,
            purchase_count BIGINT NOT NULL DEFAULT 0,
            added_by_email TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(DatabaseError::Schema)?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            food_id UUID NOT NULL,
            buyer_email TEXT NOT NULL,
            order_quantity BIGINT NOT NULL,
            food_name TEXT NOT NULL,
            food_price DOUBLE PRECISION NOT NULL,
            food_image TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(DatabaseError::Schema)?;

    info!("Database schema ensured");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_defaults() {
        unsafe {
            env::set_var("DATABASE_URL", "postgresql://localhost:5432/tastr");
            env::remove_var("DATABASE_MAX_CONNECTIONS");
            env::remove_var("DATABASE_ACQUIRE_TIMEOUT");
        }

        let config = DatabaseConfig::from_env().expect("Failed to create database config");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.acquire_timeout, 30);
    }
}
