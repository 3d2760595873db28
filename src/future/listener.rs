//! Listener types and the success/error adapters.

use crate::outcome::{Exception, Outcome};

/// Receives the outcome of a future, at most once.
pub trait ResultListener<V>: Send {
    fn on_result(self: Box<Self>, outcome: Outcome<V>);
}

impl<V, F> ResultListener<V> for F
where
    F: FnOnce(Outcome<V>) + Send,
{
    fn on_result(self: Box<Self>, outcome: Outcome<V>) {
        (*self)(outcome)
    }
}

pub type BoxResultListener<V> = Box<dyn ResultListener<V>>;

/// Runs when a future is cancelled.
pub type CancelListener = Box<dyn FnOnce() + Send>;

/// Runs when a future reaches a terminal state; the flag is `true` on cancellation.
pub type CompletionListener = Box<dyn FnOnce(bool) + Send>;

/// Forwards success values to `F` and ignores failures.
pub struct SuccessAdapter<F> {
    listener: F,
}

impl<F> SuccessAdapter<F> {
    pub fn new(listener: F) -> Self {
        Self { listener }
    }
}

impl<V, F> ResultListener<V> for SuccessAdapter<F>
where
    F: FnOnce(V) + Send,
{
    fn on_result(self: Box<Self>, outcome: Outcome<V>) {
        if let Outcome::Success(value) = outcome {
            (self.listener)(value);
        }
    }
}

/// Forwards failures to `F` and ignores success values.
pub struct ErrorAdapter<F> {
    listener: F,
}

impl<F> ErrorAdapter<F> {
    pub fn new(listener: F) -> Self {
        Self { listener }
    }
}

impl<V, F> ResultListener<V> for ErrorAdapter<F>
where
    F: FnOnce(Exception) + Send,
{
    fn on_result(self: Box<Self>, outcome: Outcome<V>) {
        if let Outcome::Failure(exception) = outcome {
            (self.listener)(exception);
        }
    }
}

pub fn success_adapter<V, F>(listener: F) -> BoxResultListener<V>
where
    V: 'static,
    F: FnOnce(V) + Send + 'static,
{
    Box::new(SuccessAdapter::new(listener))
}

pub fn error_adapter<V, F>(listener: F) -> BoxResultListener<V>
where
    V: 'static,
    F: FnOnce(Exception) + Send + 'static,
{
    Box::new(ErrorAdapter::new(listener))
}
