// Infrastructure layer (shared components)
pub mod infrastructure;

pub use infrastructure::config;
pub use infrastructure::error;
pub use infrastructure::postgres;

// Application layer
pub mod bootstrap;

// Supporting modules
pub mod shutdown;
pub mod telemetry;

pub use bootstrap::{bootstrap, bootstrap_with};
pub use error::{BootstrapError, Result};
