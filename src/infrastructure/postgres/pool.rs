//! PostgreSQL pool creation backed by sqlx.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::sync::broadcast;

use crate::config::{ConnectionString, DatabaseConfig};

use super::retry::{connect_with_retry, ConnectionError, Connector, RetryPolicy};

/// Opens a [`PgPool`] sized and timed from [`DatabaseConfig`].
///
/// Each call establishes one connection eagerly, so an unreachable server or
/// rejected credentials fail the attempt instead of the first query.
#[derive(Debug, Clone)]
pub struct PgConnector {
    config: DatabaseConfig,
}

impl PgConnector {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.config.pool_size)
            .acquire_timeout(self.config.connect_timeout())
            .idle_timeout(self.config.idle_timeout())
    }
}

#[async_trait]
impl Connector for PgConnector {
    type Pool = PgPool;

    async fn connect(&self, url: &ConnectionString) -> Result<PgPool, sqlx::Error> {
        let pool = self.options().connect(url.as_str()).await?;

        tracing::debug!(
            pool_size = self.config.pool_size,
            "PostgreSQL connection pool created"
        );

        Ok(pool)
    }
}

/// Connect with the retry budget and pool settings from `config`.
pub async fn connect_to_database(
    url: &ConnectionString,
    config: &DatabaseConfig,
    shutdown: &mut broadcast::Receiver<()>,
) -> Result<PgPool, ConnectionError> {
    let connector = PgConnector::new(config);
    connect_with_retry(&connector, url, &RetryPolicy::from(config), shutdown).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::shutdown::ShutdownSignal;

    fn unreachable_config(max_retries: u32) -> DatabaseConfig {
        DatabaseConfig {
            max_retries,
            retry_delay_seconds: 0,
            connect_timeout_seconds: 1,
            ..DatabaseConfig::default()
        }
    }

    #[test]
    fn test_connector_keeps_config() {
        let config = DatabaseConfig {
            pool_size: 3,
            ..DatabaseConfig::default()
        };
        let connector = PgConnector::new(&config);
        assert_eq!(connector.config.pool_size, 3);
        assert_eq!(connector.options().get_max_connections(), 3);
    }

    #[tokio::test]
    async fn test_unreachable_server_exhausts_budget() {
        // Port 1 on loopback refuses connections
        let url = ConnectionString::new("postgres://u:p@127.0.0.1:1/d");
        let signal = ShutdownSignal::new();
        let mut shutdown = signal.subscribe();

        let result = tokio::time::timeout(
            Duration::from_secs(20),
            connect_to_database(&url, &unreachable_config(2), &mut shutdown),
        )
        .await
        .expect("bounded by acquire timeout");

        match result {
            Err(ConnectionError::Exhausted { attempts, source }) => {
                assert_eq!(attempts, 2);
                assert!(source.is_some());
            }
            other => panic!("expected exhausted, got {:?}", other.map(|_| ())),
        }
    }
}
