//! Configuration System
//!
//! Layered configuration for executors, blocking waits and logging. Sources
//! are applied lowest to highest: built-in defaults, the global config file,
//! an explicit config file, then `RESULT_FUTURE__SECTION__KEY` environment
//! variables.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

mod merge;
mod sources;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FuturesConfig {
    /// Worker pool used for task futures
    #[serde(default)]
    pub pool: PoolConfig,

    /// Blocking wait behavior
    #[serde(default)]
    pub wait: WaitConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Worker pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Worker thread name prefix; workers are named `<prefix>-<index>`
    #[serde(default = "default_thread_name")]
    pub thread_name: String,
}

pub(crate) fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

pub(crate) fn default_thread_name() -> String {
    "result-future-worker".to_string()
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            thread_name: default_thread_name(),
        }
    }
}

/// Blocking wait configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitConfig {
    /// Timeout applied by callers that do not pick their own (milliseconds)
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,
}

pub(crate) fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: default_timeout_ms(),
        }
    }
}

impl WaitConfig {
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }
}

const MAX_WORKERS: usize = 1024;

impl FuturesConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.pool.workers == 0 || self.pool.workers > MAX_WORKERS {
            errors.push(format!(
                "pool.workers must be between 1 and {}, got {}",
                MAX_WORKERS, self.pool.workers
            ));
        }
        if self.pool.thread_name.trim().is_empty() {
            errors.push("pool.thread_name cannot be empty".to_string());
        }
        if let Err(e) = self.logging.validate() {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors.join("; ")))
        }
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Loads `FuturesConfig` from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, global file, `explicit_file` (if any) and environment.
    pub fn load(explicit_file: Option<&Path>) -> Result<FuturesConfig, ConfigError> {
        let mut builder = merge::merge_policy::builder_with_defaults()?;
        builder = sources::global_file::add_to_builder(builder)?;
        if let Some(path) = explicit_file {
            builder = sources::explicit_file::add_to_builder(builder, path);
        }
        builder = sources::environment::add_to_builder(builder);

        let config: FuturesConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a single file on top of the defaults, ignoring other sources.
    pub fn load_from_file(path: &Path) -> Result<FuturesConfig, ConfigError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::explicit_file::add_to_builder(builder, path);
        let config: FuturesConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Location of the global config file for this platform.
    pub fn global_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }
}
