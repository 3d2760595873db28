//! Worker pool backed by an owned multi-thread tokio runtime.
//!
//! Jobs are blocking closures, so they go to the runtime's blocking pool
//! through a [`TokioExecutor`]. The blocking pool is capped at
//! `PoolConfig::workers` threads.

use super::{Executor, Job, TokioExecutor};
use crate::config::PoolConfig;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::runtime::{Builder, Handle, Runtime};
use tracing::{debug, warn};

/// Sized pool of named worker threads.
pub struct WorkerPool {
    runtime: Mutex<Option<Runtime>>,
    executor: TokioExecutor,
}

impl WorkerPool {
    pub fn new(config: &PoolConfig) -> std::io::Result<Self> {
        let workers = config.workers.max(1);
        let thread_name = config.thread_name.clone();
        let next_index = Arc::new(AtomicUsize::new(0));

        let runtime = Builder::new_multi_thread()
            .worker_threads(workers)
            .max_blocking_threads(workers)
            .thread_name_fn(move || {
                let index = next_index.fetch_add(1, Ordering::Relaxed);
                format!("{}-{}", thread_name, index)
            })
            .build()?;
        debug!(workers, "Worker pool started");

        let executor = TokioExecutor::new(runtime.handle().clone());
        Ok(Self {
            runtime: Mutex::new(Some(runtime)),
            executor,
        })
    }

    /// Executor submitting straight to this pool's runtime.
    pub fn executor(&self) -> &TokioExecutor {
        &self.executor
    }

    /// Stop accepting jobs and wait for running jobs to return.
    ///
    /// Jobs still queued when the runtime shuts down are dropped without
    /// running. Called from inside a tokio runtime (including one of this
    /// pool's own jobs) it does not wait.
    pub fn shutdown(&self) {
        let Some(runtime) = self.runtime.lock().take() else {
            return;
        };
        if Handle::try_current().is_ok() {
            runtime.shutdown_background();
            debug!("Worker pool shut down in background");
        } else {
            drop(runtime);
            debug!("Worker pool shut down");
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.runtime.lock().is_none()
    }
}

impl Executor for WorkerPool {
    fn execute(&self, job: Job) {
        let runtime = self.runtime.lock();
        if runtime.is_none() {
            warn!("Worker pool is shut down; job dropped");
            return;
        }
        self.executor.execute(job);
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
