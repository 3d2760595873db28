//! Execution contexts
//!
//! An [`Executor`] runs a unit of work, either right away or by scheduling it.
//! Futures use executors to decide where listeners and mappers run; executors
//! are always passed in explicitly so tests can substitute deterministic ones.

use std::sync::Arc;

mod inline;
mod main_loop;
mod tokio_handle;
mod worker_pool;

pub use inline::InlineExecutor;
pub use main_loop::{CallbackId, MainLoopExecutor};
pub use tokio_handle::TokioExecutor;
pub use worker_pool::WorkerPool;

/// A unit of work handed to an executor.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Shared executor handle, as stored by futures.
pub type SharedExecutor = Arc<dyn Executor>;

/// Capability to run a unit of work.
pub trait Executor: Send + Sync {
    fn execute(&self, job: Job);
}

impl<E: Executor + ?Sized> Executor for Arc<E> {
    fn execute(&self, job: Job) {
        (**self).execute(job)
    }
}

/// Run `job` on `executor` if one is given, otherwise on the calling thread.
pub(crate) fn dispatch(executor: Option<&SharedExecutor>, job: Job) {
    match executor {
        Some(executor) => executor.execute(job),
        None => job(),
    }
}
