//! Result Futures
//!
//! A [`ResultFuture`] delivers exactly one [`Outcome`] or is cancelled first.
//! Consumers can poll it, block on it, or register listeners that run on an
//! executor of their choosing.
//!
//! # Listener dispatch
//!
//! When a listener is registered with an executor, delivery always goes
//! through that executor, even if the future is already resolved.
//!
//! When no executor is given, a listener runs synchronously only if the result
//! is already available. A listener registered without an executor on a
//! future that is still pending is dropped and never called. Supply an
//! executor (or give the future a default one) for futures that may not be
//! resolved yet.
//!
//! Mapping is exempt: with no executor available, a mapper runs inline on the
//! thread that completes the source.

use crate::error::FutureError;
use crate::executor::{InlineExecutor, SharedExecutor};
use crate::outcome::{Exception, Outcome, Rethrow, Unchecked, Wrapped};
use std::sync::Arc;
use std::time::Duration;

mod bridge;
mod immediate;
mod latch;
mod listener;
mod state;
mod task;

pub use bridge::OutcomeFuture;
pub use immediate::ImmediateFuture;
pub use latch::LatchFuture;
pub use listener::{
    error_adapter, success_adapter, BoxResultListener, CancelListener, CompletionListener,
    ErrorAdapter, ResultListener, SuccessAdapter,
};
pub use task::TaskFuture;

/// Values a future can carry.
pub trait FutureValue: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> FutureValue for T {}

/// Handle to a computation that completes exactly once or is cancelled.
pub trait ResultFuture<V: FutureValue>: Send + Sync {
    /// True iff completed and not cancelled. Never blocks.
    fn is_result_ready(&self) -> bool;

    /// Block until the future completes or is cancelled.
    ///
    /// A cancelled future that never had a result yields a failure carrying
    /// [`FutureError::Cancelled`].
    fn wait(&self) -> Outcome<V>;

    /// Like [`ResultFuture::wait`], but gives up after `timeout` and returns a
    /// failure carrying [`FutureError::TimedOut`] instead.
    fn wait_timeout(&self, timeout: Duration) -> Outcome<V>;

    /// The outcome if one is available. Never blocks.
    fn peek_result(&self) -> Option<Outcome<V>>;

    /// Cancel the future. Only the call that performs the transition returns true.
    fn cancel(&self) -> bool;

    fn is_cancelled(&self) -> bool;

    /// Register the single cancellation listener.
    ///
    /// Fires immediately if the future is already cancelled, is discarded if
    /// the future completed and can no longer be cancelled, and otherwise
    /// fires once when [`ResultFuture::cancel`] succeeds. Without an executor
    /// the listener runs on the cancelling thread.
    fn on_cancel_with(
        &self,
        listener: CancelListener,
        executor: Option<SharedExecutor>,
    ) -> Result<(), FutureError>;

    /// Register a result listener. See the module docs for dispatch rules.
    fn on_result_with(&self, listener: BoxResultListener<V>, executor: Option<SharedExecutor>);

    /// Register a listener told whether the future ended by cancellation.
    fn on_completed_with(&self, listener: CompletionListener, executor: Option<SharedExecutor>);

    /// Executor used by the `on_*` forms that take no executor.
    fn default_result_executor(&self) -> Option<SharedExecutor>;

    fn wait_value(&self) -> Option<V> {
        self.wait().into_value()
    }

    fn wait_value_or_err(&self) -> Result<V, Exception> {
        self.wait().into_result_with::<Rethrow>()
    }

    fn wait_value_wrapped(&self) -> Result<V, FutureError> {
        self.wait().into_result_with::<Wrapped>()
    }

    fn wait_value_unchecked(&self) -> Result<V, anyhow::Error> {
        self.wait().into_result_with::<Unchecked>()
    }

    fn peek_value(&self) -> Option<V> {
        self.peek_result().and_then(Outcome::into_value)
    }

    fn peek_value_or_err(&self) -> Result<Option<V>, Exception> {
        self.peek_result()
            .map(|outcome| outcome.into_result_with::<Rethrow>())
            .transpose()
    }

    fn peek_value_wrapped(&self) -> Result<Option<V>, FutureError> {
        self.peek_result()
            .map(|outcome| outcome.into_result_with::<Wrapped>())
            .transpose()
    }

    fn peek_value_unchecked(&self) -> Result<Option<V>, anyhow::Error> {
        self.peek_result()
            .map(|outcome| outcome.into_result_with::<Unchecked>())
            .transpose()
    }
}

/// Closure-friendly registration, mapping and async bridging for any future.
pub trait ResultFutureExt<V: FutureValue>: ResultFuture<V> {
    fn on_cancel<F>(&self, listener: F) -> Result<(), FutureError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_cancel_with(Box::new(listener), self.default_result_executor())
    }

    fn on_result<F>(&self, listener: F)
    where
        F: FnOnce(Outcome<V>) + Send + 'static,
    {
        self.on_result_with(Box::new(listener), self.default_result_executor())
    }

    fn on_completed<F>(&self, listener: F)
    where
        F: FnOnce(bool) + Send + 'static,
    {
        self.on_completed_with(Box::new(listener), self.default_result_executor())
    }

    fn on_success<F>(&self, listener: F)
    where
        F: FnOnce(V) + Send + 'static,
    {
        self.on_success_with(listener, self.default_result_executor())
    }

    fn on_success_with<F>(&self, listener: F, executor: Option<SharedExecutor>)
    where
        F: FnOnce(V) + Send + 'static,
    {
        self.on_result_with(success_adapter(listener), executor)
    }

    fn on_error<F>(&self, listener: F)
    where
        F: FnOnce(Exception) + Send + 'static,
    {
        self.on_error_with(listener, self.default_result_executor())
    }

    fn on_error_with<F>(&self, listener: F, executor: Option<SharedExecutor>)
    where
        F: FnOnce(Exception) + Send + 'static,
    {
        self.on_result_with(error_adapter(listener), executor)
    }

    /// Future of `mapper(value)`, run on the default result executor.
    fn map<R, F>(&self, mapper: F) -> LatchFuture<R>
    where
        R: FutureValue,
        F: FnOnce(V) -> R + Send + 'static,
    {
        self.map_on(None, mapper)
    }

    /// Future of `mapper(value)`, run on `executor`, else on the default
    /// result executor, else inline on the completing thread. Failures pass
    /// through without calling the mapper and cancelling this future cancels
    /// the mapped one.
    fn map_on<R, F>(&self, executor: Option<SharedExecutor>, mapper: F) -> LatchFuture<R>
    where
        R: FutureValue,
        F: FnOnce(V) -> R + Send + 'static,
    {
        self.try_map_on(executor, move |value| Ok(mapper(value)))
    }

    fn try_map<R, F>(&self, mapper: F) -> LatchFuture<R>
    where
        R: FutureValue,
        F: FnOnce(V) -> anyhow::Result<R> + Send + 'static,
    {
        self.try_map_on(None, mapper)
    }

    /// Like [`ResultFutureExt::map_on`] with a mapper that may fail.
    fn try_map_on<R, F>(&self, executor: Option<SharedExecutor>, mapper: F) -> LatchFuture<R>
    where
        R: FutureValue,
        F: FnOnce(V) -> anyhow::Result<R> + Send + 'static,
    {
        let mapped = LatchFuture::new(self.default_result_executor());
        let executor: SharedExecutor = executor
            .or_else(|| self.default_result_executor())
            .unwrap_or_else(|| Arc::new(InlineExecutor));

        let target = mapped.clone();
        self.on_result_with(
            Box::new(move |outcome: Outcome<V>| {
                target.complete(outcome.and_then(mapper));
            }),
            Some(executor),
        );

        let target = mapped.clone();
        self.on_completed_with(
            Box::new(move |cancelled| {
                if cancelled {
                    target.cancel();
                }
            }),
            Some(Arc::new(InlineExecutor)),
        );
        mapped
    }

    /// An `std::future::Future` resolving to this future's outcome.
    fn outcome_async(&self) -> OutcomeFuture<V> {
        OutcomeFuture::attach(self)
    }
}

impl<V: FutureValue, T: ResultFuture<V> + ?Sized> ResultFutureExt<V> for T {}
