//! CLI route: run context and command dispatch.

use crate::cli::parse::Commands;
use crate::config::{ConfigLoader, FuturesConfig};
use crate::executor::{MainLoopExecutor, SharedExecutor, WorkerPool};
use crate::future::{LatchFuture, ResultFuture, ResultFutureExt, TaskFuture};
use crate::outcome::Outcome;
use anyhow::Context;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Runtime context for CLI execution, built from the layered configuration.
pub struct RunContext {
    config: FuturesConfig,
}

impl RunContext {
    pub fn new(config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = ConfigLoader::load(config_path.as_deref())
            .context("Failed to load configuration")?;
        Ok(Self { config })
    }

    pub fn from_config(config: FuturesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FuturesConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> anyhow::Result<String> {
        match command {
            Commands::Task {
                count,
                delay_ms,
                fail_every,
                cancel_first,
            } => self.run_tasks(*count, *delay_ms, *fail_every, *cancel_first),
            Commands::Latch {
                value,
                producer_delay_ms,
                timeout_ms,
                fail,
            } => Ok(self.run_latch(*value, *producer_delay_ms, *timeout_ms, *fail)),
            Commands::Config => Ok(self.config.to_toml_string()?),
        }
    }

    fn run_tasks(
        &self,
        count: usize,
        delay_ms: u64,
        fail_every: Option<usize>,
        cancel_first: bool,
    ) -> anyhow::Result<String> {
        let pool = WorkerPool::new(&self.config.pool).context("Failed to start pool")?;
        let main_loop = MainLoopExecutor::new();
        main_loop.bind_current_thread();
        let results: SharedExecutor = Arc::new(main_loop.clone());
        let lines = Arc::new(Mutex::new(BTreeMap::new()));

        let mut tasks = Vec::with_capacity(count);
        for index in 0..count {
            let fails = fail_every.map_or(false, |n| n > 0 && (index + 1) % n == 0);
            let task = TaskFuture::execute(
                move || {
                    thread::sleep(Duration::from_millis(delay_ms));
                    if fails {
                        anyhow::bail!("task {} failed on purpose", index);
                    }
                    Ok(index * 10)
                },
                &pool,
                Some(results.clone()),
            );
            if cancel_first && index == 0 {
                task.cancel();
            }

            let sink = lines.clone();
            task.map(|value| format!("ok {}", value))
                .on_result(move |outcome: Outcome<String>| {
                    let line = match outcome {
                        Outcome::Success(text) => text,
                        Outcome::Failure(e) => format!("failed: {}", e),
                    };
                    sink.lock().insert(index, line);
                });
            tasks.push(task);
        }

        let timeout = self.config.wait.default_timeout();
        for task in &tasks {
            task.wait_timeout(timeout);
        }
        // Workers post result deliveries after waking waiters; join them first.
        pool.shutdown();
        let delivered = main_loop.run_pending();
        debug!(delivered, "Delivered task results on main loop");

        let lines = lines.lock();
        let mut output = String::new();
        for (index, task) in tasks.iter().enumerate() {
            let line = if task.is_cancelled() {
                "cancelled".to_string()
            } else {
                lines
                    .get(&index)
                    .cloned()
                    .unwrap_or_else(|| "pending".to_string())
            };
            let _ = writeln!(output, "task {}: {}", index, line);
        }
        info!(count, "Task run finished");
        Ok(output.trim_end().to_string())
    }

    fn run_latch(
        &self,
        value: i64,
        producer_delay_ms: u64,
        timeout_ms: Option<u64>,
        fail: bool,
    ) -> String {
        let latch = LatchFuture::new(None);
        let producer = latch.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(producer_delay_ms));
            if fail {
                producer.fail(anyhow::anyhow!("producer reported failure"))
            } else {
                producer.succeed(value)
            }
        });

        let timeout = timeout_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| self.config.wait.default_timeout());
        let outcome = latch.wait_timeout(timeout);
        let report = if outcome.is_timeout() {
            latch.cancel();
            format!("timed out after {}ms", timeout.as_millis())
        } else {
            match outcome {
                Outcome::Success(value) => format!("value: {}", value),
                Outcome::Failure(e) => format!("failed: {}", e),
            }
        };

        if handle.join().is_err() {
            debug!("Latch producer thread panicked");
        }
        report
    }
}
