//! Task Futures
//!
//! A task future owns a callable and resolves with whatever it returns.
//! Errors and panics raised by the callable become failures. Cancelling before
//! the task starts skips the callable entirely; cancelling while it runs
//! discards its result.

use super::listener::{BoxResultListener, CancelListener, CompletionListener};
use super::state::FutureState;
use super::{FutureValue, ResultFuture};
use crate::error::FutureError;
use crate::executor::{Executor, SharedExecutor};
use crate::outcome::Outcome;
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

type Callable<V> = Box<dyn FnOnce() -> anyhow::Result<V> + Send>;

/// Future that runs a computation and resolves with its result.
pub struct TaskFuture<V> {
    state: Arc<FutureState<V>>,
    callable: Arc<Mutex<Option<Callable<V>>>>,
}

impl<V> Clone for TaskFuture<V> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            callable: Arc::clone(&self.callable),
        }
    }
}

impl<V: FutureValue> TaskFuture<V> {
    /// Create a task that runs when [`TaskFuture::run`] is called.
    pub fn new<F>(callable: F, default_result_executor: Option<SharedExecutor>) -> Self
    where
        F: FnOnce() -> anyhow::Result<V> + Send + 'static,
    {
        Self {
            state: Arc::new(FutureState::pending("task", default_result_executor)),
            callable: Arc::new(Mutex::new(Some(Box::new(callable)))),
        }
    }

    /// Create a task and submit it to `executor` right away.
    ///
    /// If the executor drops the job without running it, the task resolves
    /// to a failure carrying [`FutureError::Rejected`].
    pub fn execute<F, E>(
        callable: F,
        executor: &E,
        default_result_executor: Option<SharedExecutor>,
    ) -> Self
    where
        F: FnOnce() -> anyhow::Result<V> + Send + 'static,
        E: Executor + ?Sized,
    {
        let task = Self::new(callable, default_result_executor);
        let runner = SubmittedRun {
            task: Some(task.clone()),
        };
        executor.execute(Box::new(move || runner.run()));
        task
    }

    /// Resolve a task whose job was dropped before it started.
    fn reject(&self) {
        if self.callable.lock().take().is_none() {
            return;
        }
        let reason = FutureError::Rejected("job dropped before it ran".to_string());
        if self.state.complete(Outcome::failure(reason.into())) {
            warn!("Executor dropped task job; task rejected");
        }
    }

    /// Run the callable on the calling thread.
    ///
    /// Returns false without running anything if the task already ran or was
    /// cancelled before it started.
    pub fn run(&self) -> bool {
        let Some(callable) = self.callable.lock().take() else {
            trace!("Task already ran or was cancelled");
            return false;
        };
        if self.state.is_cancelled() {
            debug!("Task cancelled before start; skipping");
            return false;
        }

        let outcome = match panic::catch_unwind(AssertUnwindSafe(callable)) {
            Ok(result) => Outcome::from(result),
            Err(payload) => {
                Outcome::failure(FutureError::Panicked(panic_message(payload.as_ref())).into())
            }
        };
        if !self.state.complete(outcome) {
            debug!("Task finished after cancellation; result discarded");
        }
        true
    }
}

/// A task handed to an executor. Rejects the task if dropped unrun.
struct SubmittedRun<V: FutureValue> {
    task: Option<TaskFuture<V>>,
}

impl<V: FutureValue> SubmittedRun<V> {
    fn run(mut self) {
        if let Some(task) = self.task.take() {
            task.run();
        }
    }
}

impl<V: FutureValue> Drop for SubmittedRun<V> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.reject();
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

impl<V: FutureValue> ResultFuture<V> for TaskFuture<V> {
    fn is_result_ready(&self) -> bool {
        self.state.is_result_ready()
    }

    fn wait(&self) -> Outcome<V> {
        self.state.wait()
    }

    fn wait_timeout(&self, timeout: Duration) -> Outcome<V> {
        self.state.wait_timeout(timeout)
    }

    fn peek_result(&self) -> Option<Outcome<V>> {
        self.state.peek()
    }

    fn cancel(&self) -> bool {
        if !self.state.cancel() {
            return false;
        }
        // Release the callable's captures if it never started.
        self.callable.lock().take();
        true
    }

    fn is_cancelled(&self) -> bool {
        self.state.is_cancelled()
    }

    fn on_cancel_with(
        &self,
        listener: CancelListener,
        executor: Option<SharedExecutor>,
    ) -> Result<(), FutureError> {
        self.state.on_cancel(listener, executor)
    }

    fn on_result_with(&self, listener: BoxResultListener<V>, executor: Option<SharedExecutor>) {
        self.state.on_result(listener, executor)
    }

    fn on_completed_with(&self, listener: CompletionListener, executor: Option<SharedExecutor>) {
        self.state.on_completed(listener, executor)
    }

    fn default_result_executor(&self) -> Option<SharedExecutor> {
        self.state.default_executor()
    }
}
