//! PostgreSQL connection establishment.
//!
//! Provides the retrying connect loop and the sqlx-backed pool connector.

pub mod pool;
pub mod retry;

pub use pool::{connect_to_database, PgConnector};
pub use retry::{connect_with_retry, ConnectionError, Connector, RetryPolicy};
