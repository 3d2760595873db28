use super::{Executor, Job};
use tokio::runtime::Handle;

/// Runs jobs on a tokio runtime's blocking pool.
#[derive(Clone)]
pub struct TokioExecutor {
    handle: Handle,
}

impl TokioExecutor {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Executor for the runtime the caller is running in, if any.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Executor for TokioExecutor {
    fn execute(&self, job: Job) {
        // The join handle is dropped; the job still runs to completion.
        self.handle.spawn_blocking(move || job());
    }
}
