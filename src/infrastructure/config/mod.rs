mod resolver;
mod settings;

pub use resolver::{
    resolve, ConfigKey, ConfigurationError, ConnectionString, EnvSource, ProcessEnv,
    ResolvedConfig, POSTGRES_DB, POSTGRES_HOST, POSTGRES_PASSWORD, POSTGRES_PORT, POSTGRES_USER,
    RECOGNIZED_KEYS,
};
pub use settings::{DatabaseConfig, LogConfig, OtelConfig, Settings};
