//! Store configuration and pool construction
//!
//! The embedding application builds one `PgPool` from a `StoreConfig` and
//! passes it by reference into the repositories. There is no process-wide
//! pool singleton.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections.
/// Sized for a single web process in front of the store.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connection descriptor for the relational store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/stayfinder".to_string()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl StoreConfig {
    /// Build the connection pool this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial connection fails.
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.database_url)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_connection_limit() {
        let config = StoreConfig {
            database_url: "postgres://localhost/stayfinder".to_string(),
            ..Default::default()
        };
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_round_trips_a_bind() {
        let config = StoreConfig::default();
        let pool = config.connect().await.expect("pool creation failed");

        let result: (i64,) = sqlx::query_as("SELECT $1::bigint")
            .bind(42_i64)
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 42);
    }
}
