//! CLI domain: clap definitions and the run context behind the `rfut` binary.

mod parse;
mod route;

pub use parse::{Cli, Commands};
pub use route::RunContext;
