//! Bounded, fixed-delay retry for establishing a database pool.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::config::{ConnectionString, DatabaseConfig};

/// Terminal outcome of [`connect_with_retry`] when no pool was produced.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Every attempt in the retry budget failed.
    #[error("ran out of retries connecting to the database ({attempts} attempts)")]
    Exhausted {
        attempts: u32,
        /// Last attempt's failure; `None` when the budget allowed no attempts
        #[source]
        source: Option<sqlx::Error>,
    },

    /// Shutdown was signalled before a pool was established.
    #[error("database connection cancelled by shutdown after {attempts} attempts")]
    Cancelled { attempts: u32 },
}

impl ConnectionError {
    pub fn attempts(&self) -> u32 {
        match self {
            ConnectionError::Exhausted { attempts, .. } | ConnectionError::Cancelled { attempts } => {
                *attempts
            }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ConnectionError::Cancelled { .. })
    }
}

/// Retry budget and the fixed wait between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts. Zero means no attempt is made.
    pub max_retries: u32,
    /// Wait after a failed attempt (not applied after the last one)
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            retry_delay: Duration::from_secs(5),
        }
    }
}

impl From<&DatabaseConfig> for RetryPolicy {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            retry_delay: config.retry_delay(),
        }
    }
}

/// Opens a pool for a connection string. One call is one attempt.
#[async_trait]
pub trait Connector: Send + Sync {
    type Pool: Send;

    async fn connect(&self, url: &ConnectionString) -> Result<Self::Pool, sqlx::Error>;
}

/// Attempt to open a pool up to `policy.max_retries` times.
///
/// Attempts run one at a time. A message on `shutdown` (or the channel
/// closing) aborts the in-flight attempt or the pending delay and yields
/// [`ConnectionError::Cancelled`].
#[tracing::instrument(
    name = "connect_with_retry",
    skip_all,
    fields(
        url = %url,
        max_retries = policy.max_retries,
        retry_delay_ms = policy.retry_delay.as_millis() as u64
    )
)]
pub async fn connect_with_retry<C: Connector>(
    connector: &C,
    url: &ConnectionString,
    policy: &RetryPolicy,
    shutdown: &mut broadcast::Receiver<()>,
) -> Result<C::Pool, ConnectionError> {
    let mut attempts: u32 = 0;
    let mut last_error: Option<sqlx::Error> = None;

    while attempts < policy.max_retries {
        let result = tokio::select! {
            biased;
            _ = shutdown.recv() => return Err(cancelled(attempts)),
            result = connector.connect(url) => result,
        };
        attempts += 1;

        match result {
            Ok(pool) => {
                tracing::info!(attempt = attempts, "Connected to the database");
                return Ok(pool);
            }
            Err(e) => {
                let retrying = attempts < policy.max_retries;
                tracing::warn!(
                    error = %e,
                    attempt = attempts,
                    max_retries = policy.max_retries,
                    retrying,
                    "Failed to connect to the database"
                );
                last_error = Some(e);

                if retrying {
                    tokio::select! {
                        biased;
                        _ = shutdown.recv() => return Err(cancelled(attempts)),
                        _ = tokio::time::sleep(policy.retry_delay) => {}
                    }
                }
            }
        }
    }

    tracing::error!(
        attempts,
        error = last_error.as_ref().map(tracing::field::display),
        "Ran out of retries to connect to the database"
    );

    Err(ConnectionError::Exhausted {
        attempts,
        source: last_error,
    })
}

fn cancelled(attempts: u32) -> ConnectionError {
    tracing::info!(attempts, "Database connection cancelled by shutdown");
    ConnectionError::Cancelled { attempts }
}
