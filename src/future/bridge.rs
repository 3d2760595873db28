//! Async bridge: await a `ResultFuture` from async code.

use super::{FutureValue, ResultFuture};
use crate::error::FutureError;
use crate::executor::InlineExecutor;
use crate::outcome::Outcome;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Resolves to the outcome of the future it was attached to.
///
/// If that future is cancelled, or dropped while still pending, this resolves
/// to a failure carrying [`FutureError::Cancelled`].
pub struct OutcomeFuture<V> {
    receiver: oneshot::Receiver<Outcome<V>>,
}

impl<V: FutureValue> OutcomeFuture<V> {
    pub(crate) fn attach<F>(future: &F) -> Self
    where
        F: ResultFuture<V> + ?Sized,
    {
        let (sender, receiver) = oneshot::channel();
        // A cancelled future drops its pending listeners, and with them the sender.
        future.on_result_with(
            Box::new(move |outcome: Outcome<V>| {
                let _ = sender.send(outcome);
            }),
            Some(Arc::new(InlineExecutor)),
        );
        Self { receiver }
    }
}

impl<V> Future for OutcomeFuture<V> {
    type Output = Outcome<V>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(Outcome::failure(FutureError::Cancelled.into())),
            Poll::Pending => Poll::Pending,
        }
    }
}
