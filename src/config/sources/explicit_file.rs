//! Explicit config file source, passed by the caller (for example `--config`).

use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use std::path::Path;

/// Add `path` as a required source; a missing file fails the build.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>, path: &Path) -> ConfigBuilder<DefaultState> {
    builder.add_source(File::from(path).required(true))
}
