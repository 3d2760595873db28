//! CLI parse: clap types for rfut. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rfut - exercise result futures from the command line
#[derive(Parser)]
#[command(name = "rfut")]
#[command(about = "Run task, latch and mapping scenarios on result futures")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over defaults and the global file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run tasks on the worker pool and report each outcome
    Task {
        /// Number of tasks to submit
        #[arg(long, default_value_t = 4)]
        count: usize,
        /// Simulated work per task (milliseconds)
        #[arg(long, default_value_t = 10)]
        delay_ms: u64,
        /// Make every Nth task fail
        #[arg(long)]
        fail_every: Option<usize>,
        /// Cancel the first task right after submitting it
        #[arg(long)]
        cancel_first: bool,
    },
    /// Complete a latch from a producer thread while this thread waits
    Latch {
        /// Value the producer completes the latch with
        #[arg(long, default_value_t = 42, allow_negative_numbers = true)]
        value: i64,
        /// Producer delay before completing (milliseconds)
        #[arg(long, default_value_t = 50)]
        producer_delay_ms: u64,
        /// Wait timeout (milliseconds); defaults to wait.default_timeout_ms
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Fail the latch instead of completing it with a value
        #[arg(long)]
        fail: bool,
    },
    /// Print the effective configuration as TOML
    Config,
}
