//! Startup composition: resolve `POSTGRES_*` settings, then connect.

use sqlx::PgPool;
use tokio::sync::broadcast;

use crate::config::{resolve, DatabaseConfig, EnvSource};
use crate::error::Result;
use crate::postgres::{connect_with_retry, Connector, PgConnector, RetryPolicy};

/// Resolve configuration from `env` and open a pool through `connector`.
///
/// A configuration failure returns before any connection attempt.
pub async fn bootstrap_with<C, E>(
    connector: &C,
    env: &E,
    policy: &RetryPolicy,
    shutdown: &mut broadcast::Receiver<()>,
) -> Result<C::Pool>
where
    C: Connector,
    E: EnvSource + ?Sized,
{
    let resolved = resolve(env)?;
    let url = resolved.connection_string();

    tracing::info!(
        url = %url,
        max_retries = policy.max_retries,
        "Database configuration resolved"
    );

    Ok(connect_with_retry(connector, &url, policy, shutdown).await?)
}

/// [`bootstrap_with`] using a sqlx pool configured from `config`.
pub async fn bootstrap<E>(
    env: &E,
    config: &DatabaseConfig,
    shutdown: &mut broadcast::Receiver<()>,
) -> Result<PgPool>
where
    E: EnvSource + ?Sized,
{
    bootstrap_with(
        &PgConnector::new(config),
        env,
        &RetryPolicy::from(config),
        shutdown,
    )
    .await
}
