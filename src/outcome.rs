//! Outcome Values
//!
//! `Outcome<V>` holds the single result of an asynchronous operation: either a
//! success value or the failure that prevented it. Outcomes are immutable once
//! built and are handed out by clone, so readers never need a lock.

use crate::error::FutureError;
use std::fmt;
use std::sync::Arc;

/// A shared, cloneable failure.
///
/// Clones point at the same underlying error, so a failure that is
/// propagated through several futures stays the same object.
#[derive(Clone)]
pub struct Exception(Arc<anyhow::Error>);

impl Exception {
    pub fn new<E>(error: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Exception(Arc::new(error.into()))
    }

    /// Build a failure from a plain message.
    pub fn msg<M>(message: M) -> Self
    where
        M: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Exception(Arc::new(anyhow::Error::msg(message)))
    }

    /// True if both handles refer to the same failure.
    pub fn ptr_eq(a: &Exception, b: &Exception) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.0.downcast_ref::<E>()
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl fmt::Debug for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl std::error::Error for Exception {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&**self.0)
    }
}

impl From<FutureError> for Exception {
    fn from(err: FutureError) -> Self {
        Exception::new(err)
    }
}

/// How a stored failure is surfaced to a caller that asked for the value.
pub trait FailurePolicy {
    type Error;

    fn convert(exception: &Exception) -> Self::Error;
}

/// Hand back the stored failure itself.
#[derive(Debug, Clone, Copy)]
pub struct Rethrow;

/// Wrap the failure in [`FutureError::ExecutionFailed`].
#[derive(Debug, Clone, Copy)]
pub struct Wrapped;

/// Erase the failure into an `anyhow::Error` with the original in its chain.
#[derive(Debug, Clone, Copy)]
pub struct Unchecked;

impl FailurePolicy for Rethrow {
    type Error = Exception;

    fn convert(exception: &Exception) -> Exception {
        exception.clone()
    }
}

impl FailurePolicy for Wrapped {
    type Error = FutureError;

    fn convert(exception: &Exception) -> FutureError {
        FutureError::ExecutionFailed {
            source: exception.clone(),
        }
    }
}

impl FailurePolicy for Unchecked {
    type Error = anyhow::Error;

    fn convert(exception: &Exception) -> anyhow::Error {
        anyhow::Error::new(exception.clone()).context("Execution failed")
    }
}

/// Success value or failure for one asynchronous operation.
#[derive(Clone)]
pub enum Outcome<V> {
    Success(V),
    Failure(Exception),
}

impl<V> Outcome<V> {
    pub fn success(value: V) -> Self {
        Outcome::Success(value)
    }

    pub fn failure(exception: Exception) -> Self {
        Outcome::Failure(exception)
    }

    /// Failure from any error convertible into `anyhow::Error`.
    pub fn failure_from<E>(error: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Outcome::Failure(Exception::new(error))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Value, or `None` when this is a failure.
    pub fn value(&self) -> Option<&V> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn exception(&self) -> Option<&Exception> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(exception) => Some(exception),
        }
    }

    /// Value, or the failure converted by policy `P`.
    pub fn try_value_with<P: FailurePolicy>(&self) -> Result<&V, P::Error> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(exception) => Err(P::convert(exception)),
        }
    }

    /// Value, or the stored failure unchanged.
    pub fn try_value(&self) -> Result<&V, Exception> {
        self.try_value_with::<Rethrow>()
    }

    pub fn try_value_wrapped(&self) -> Result<&V, FutureError> {
        self.try_value_with::<Wrapped>()
    }

    pub fn try_value_unchecked(&self) -> Result<&V, anyhow::Error> {
        self.try_value_with::<Unchecked>()
    }

    pub fn into_value(self) -> Option<V> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn into_result_with<P: FailurePolicy>(self) -> Result<V, P::Error> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(exception) => Err(P::convert(&exception)),
        }
    }

    pub fn into_result(self) -> Result<V, Exception> {
        self.into_result_with::<Rethrow>()
    }

    /// Apply `mapper` to a success value; failures pass through untouched.
    pub fn map<R, F>(self, mapper: F) -> Outcome<R>
    where
        F: FnOnce(V) -> R,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(mapper(value)),
            Outcome::Failure(exception) => Outcome::Failure(exception),
        }
    }

    /// Like [`Outcome::map`] but the mapper itself may fail.
    pub fn and_then<R, F>(self, mapper: F) -> Outcome<R>
    where
        F: FnOnce(V) -> anyhow::Result<R>,
    {
        match self {
            Outcome::Success(value) => match mapper(value) {
                Ok(mapped) => Outcome::Success(mapped),
                Err(err) => Outcome::failure_from(err),
            },
            Outcome::Failure(exception) => Outcome::Failure(exception),
        }
    }

    /// True if this failure is the cancellation marker produced by `wait*`.
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self.exception().and_then(|e| e.downcast_ref::<FutureError>()),
            Some(FutureError::Cancelled)
        )
    }

    /// True if this failure is the timeout marker produced by `wait_timeout`.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self.exception().and_then(|e| e.downcast_ref::<FutureError>()),
            Some(FutureError::TimedOut(_))
        )
    }
}

impl<V, E> From<Result<V, E>> for Outcome<V>
where
    E: Into<anyhow::Error>,
{
    fn from(result: Result<V, E>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(err) => Outcome::failure_from(err),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Outcome<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success(value) => f.debug_tuple("Success").field(value).finish(),
            Outcome::Failure(exception) => f.debug_tuple("Failure").field(exception).finish(),
        }
    }
}
