//! Futures that are resolved from the start.

use super::listener::{BoxResultListener, CancelListener, CompletionListener};
use super::state::FutureState;
use super::{FutureValue, ResultFuture};
use crate::error::FutureError;
use crate::executor::SharedExecutor;
use crate::outcome::{Exception, Outcome};
use std::sync::Arc;
use std::time::Duration;

/// Future constructed already holding its outcome.
///
/// It can still be cancelled once. Cancelling keeps the stored outcome
/// visible through `peek_result` and `wait`, but `is_result_ready` turns false
/// and deliveries not yet run are suppressed.
pub struct ImmediateFuture<V> {
    state: Arc<FutureState<V>>,
}

impl<V> Clone for ImmediateFuture<V> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<V: FutureValue> ImmediateFuture<V> {
    pub fn new(outcome: Outcome<V>, default_result_executor: Option<SharedExecutor>) -> Self {
        Self {
            state: Arc::new(FutureState::resolved(
                "immediate",
                outcome,
                default_result_executor,
            )),
        }
    }

    pub fn success(value: V, default_result_executor: Option<SharedExecutor>) -> Self {
        Self::new(Outcome::success(value), default_result_executor)
    }

    pub fn failure(exception: Exception, default_result_executor: Option<SharedExecutor>) -> Self {
        Self::new(Outcome::failure(exception), default_result_executor)
    }
}

impl<V: FutureValue> ResultFuture<V> for ImmediateFuture<V> {
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
