//! Constructors for the concrete futures.
//!
//! Every constructor takes the default result executor explicitly; pass the
//! application's main loop executor where the listeners should land there.

use crate::executor::{Executor, SharedExecutor};
use crate::future::{FutureValue, ImmediateFuture, LatchFuture, TaskFuture};
use crate::outcome::{Exception, Outcome};

pub fn result<V: FutureValue>(
    outcome: Outcome<V>,
    default_result_executor: Option<SharedExecutor>,
) -> ImmediateFuture<V> {
    ImmediateFuture::new(outcome, default_result_executor)
}

pub fn success<V: FutureValue>(
    value: V,
    default_result_executor: Option<SharedExecutor>,
) -> ImmediateFuture<V> {
    ImmediateFuture::success(value, default_result_executor)
}

pub fn failure<V: FutureValue>(
    exception: Exception,
    default_result_executor: Option<SharedExecutor>,
) -> ImmediateFuture<V> {
    ImmediateFuture::failure(exception, default_result_executor)
}

pub fn latch<V: FutureValue>(default_result_executor: Option<SharedExecutor>) -> LatchFuture<V> {
    LatchFuture::new(default_result_executor)
}

/// A task that runs when `run` is called on it.
pub fn future_task<V, F>(
    callable: F,
    default_result_executor: Option<SharedExecutor>,
) -> TaskFuture<V>
where
    V: FutureValue,
    F: FnOnce() -> anyhow::Result<V> + Send + 'static,
{
    TaskFuture::new(callable, default_result_executor)
}

/// A task already submitted to `task_executor`.
pub fn execute_task<V, F, E>(
    callable: F,
    task_executor: &E,
    default_result_executor: Option<SharedExecutor>,
) -> TaskFuture<V>
where
    V: FutureValue,
    F: FnOnce() -> anyhow::Result<V> + Send + 'static,
    E: Executor + ?Sized,
{
    TaskFuture::execute(callable, task_executor, default_result_executor)
}
