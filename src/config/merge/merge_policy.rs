//! Merge rules: built-in defaults applied before any source.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("pool.workers", crate::config::default_workers() as i64)?
        .set_default("pool.thread_name", crate::config::default_thread_name())?
        .set_default("wait.default_timeout_ms", crate::config::default_timeout_ms() as i64)
}
