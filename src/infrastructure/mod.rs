//! Infrastructure layer modules
//!
//! - `config`: settings and `POSTGRES_*` resolution
//! - `error`: top-level error type
//! - `postgres`: connection pool and retrying connect loop

pub mod config;
pub mod error;
pub mod postgres;
