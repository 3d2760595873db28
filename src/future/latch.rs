//! Latch Futures
//!
//! A latch starts pending and is opened by a producer calling one of the
//! completion methods. The first completion or cancellation wins; blocked
//! waiters are released when the latch opens.

use super::listener::{BoxResultListener, CancelListener, CompletionListener};
use super::state::FutureState;
use super::{FutureValue, ResultFuture};
use crate::error::FutureError;
use crate::executor::SharedExecutor;
use crate::outcome::{Exception, Outcome};
use std::sync::Arc;
use std::time::Duration;

/// Future completed by an external producer.
pub struct LatchFuture<V> {
    state: Arc<FutureState<V>>,
}

impl<V> Clone for LatchFuture<V> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<V: FutureValue> LatchFuture<V> {
    pub fn new(default_result_executor: Option<SharedExecutor>) -> Self {
        Self {
            state: Arc::new(FutureState::pending("latch", default_result_executor)),
        }
    }

    /// Resolve with `outcome`. Returns false if already completed or cancelled.
    pub fn complete(&self, outcome: Outcome<V>) -> bool {
        self.state.complete(outcome)
    }

    pub fn succeed(&self, value: V) -> bool {
        self.complete(Outcome::success(value))
    }

    pub fn fail<E>(&self, error: E) -> bool
    where
        E: Into<anyhow::Error>,
    {
        self.complete(Outcome::failure_from(error))
    }

    pub fn fail_with(&self, exception: Exception) -> bool {
        self.complete(Outcome::failure(exception))
    }
}

impl<V: FutureValue> ResultFuture<V> for LatchFuture<V> {
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
        self.state.cancel()
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
