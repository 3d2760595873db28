//! Shared future state machine
//!
//! One `FutureState` backs every concrete future. The phase moves
//! `Pending -> Completed | Cancelled`; futures created already resolved may
//! additionally move `Completed -> Cancelled`. The phase is written only with
//! the slot mutex held and read lock-free. Listeners are taken out of their
//! slots under the lock and invoked after it is released, so each fires at
//! most once and a listener may call back into the future.

use super::listener::{BoxResultListener, CancelListener, CompletionListener};
use super::FutureValue;
use crate::error::FutureError;
use crate::executor::{dispatch, SharedExecutor};
use crate::outcome::Outcome;
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

const PENDING: u8 = 0;
const COMPLETED: u8 = 1;
const CANCELLED: u8 = 2;

struct Slots<V> {
    cancel_registered: bool,
    cancel_listener: Option<(CancelListener, Option<SharedExecutor>)>,
    result_listeners: Vec<(BoxResultListener<V>, SharedExecutor)>,
    completion_listeners: Vec<(CompletionListener, SharedExecutor)>,
}

pub(crate) struct FutureState<V> {
    kind: &'static str,
    phase: AtomicU8,
    cancellable_when_completed: bool,
    outcome: OnceLock<Outcome<V>>,
    slots: Mutex<Slots<V>>,
    resolved: Condvar,
    default_executor: Option<SharedExecutor>,
}

impl<V: FutureValue> FutureState<V> {
    /// A pending state, completed later by a producer.
    pub(crate) fn pending(kind: &'static str, default_executor: Option<SharedExecutor>) -> Self {
        Self::build(kind, PENDING, OnceLock::new(), false, default_executor)
    }

    /// A state that starts completed but can still be cancelled once.
    pub(crate) fn resolved(
        kind: &'static str,
        outcome: Outcome<V>,
        default_executor: Option<SharedExecutor>,
    ) -> Self {
        Self::build(kind, COMPLETED, OnceLock::from(outcome), true, default_executor)
    }

    fn build(
        kind: &'static str,
        phase: u8,
        outcome: OnceLock<Outcome<V>>,
        cancellable_when_completed: bool,
        default_executor: Option<SharedExecutor>,
    ) -> Self {
        Self {
            kind,
            phase: AtomicU8::new(phase),
            cancellable_when_completed,
            outcome,
            slots: Mutex::new(Slots {
                cancel_registered: false,
                cancel_listener: None,
                result_listeners: Vec::new(),
                completion_listeners: Vec::new(),
            }),
            resolved: Condvar::new(),
            default_executor,
        }
    }

    pub(crate) fn default_executor(&self) -> Option<SharedExecutor> {
        self.default_executor.clone()
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.phase.load(Ordering::Acquire) == CANCELLED
    }

    pub(crate) fn is_result_ready(&self) -> bool {
        self.phase.load(Ordering::Acquire) == COMPLETED
    }

    pub(crate) fn peek(&self) -> Option<Outcome<V>> {
        self.outcome.get().cloned()
    }

    /// Resolve a pending state. Returns false if it already left `Pending`.
    pub(crate) fn complete(&self, outcome: Outcome<V>) -> bool {
        let mut slots = self.slots.lock();
        if self.phase.load(Ordering::Acquire) != PENDING {
            trace!(kind = self.kind, "Ignoring completion of settled future");
            return false;
        }
        // Set only here, under the lock, while pending.
        let _ = self.outcome.set(outcome.clone());
        self.phase.store(COMPLETED, Ordering::Release);

        let result_listeners = std::mem::take(&mut slots.result_listeners);
        let completion_listeners = std::mem::take(&mut slots.completion_listeners);
        if !self.cancellable_when_completed {
            slots.cancel_listener = None;
        }
        drop(slots);
        self.resolved.notify_all();

        debug!(
            kind = self.kind,
            success = outcome.is_success(),
            listeners = result_listeners.len(),
            "Future completed"
        );
        for (listener, executor) in result_listeners {
            let delivered = outcome.clone();
            executor.execute(Box::new(move || listener.on_result(delivered)));
        }
        for (listener, executor) in completion_listeners {
            executor.execute(Box::new(move || listener(false)));
        }
        true
    }

    /// Move to `Cancelled`. True only for the call that made the transition.
    pub(crate) fn cancel(&self) -> bool {
        let mut slots = self.slots.lock();
        let allowed = match self.phase.load(Ordering::Acquire) {
            PENDING => true,
            COMPLETED => self.cancellable_when_completed,
            _ => false,
        };
        if !allowed {
            return false;
        }
        self.phase.store(CANCELLED, Ordering::Release);

        let cancel_listener = slots.cancel_listener.take();
        let completion_listeners = std::mem::take(&mut slots.completion_listeners);
        // Pending result listeners are never delivered once cancelled.
        slots.result_listeners.clear();
        drop(slots);
        self.resolved.notify_all();

        debug!(kind = self.kind, "Future cancelled");
        if let Some((listener, executor)) = cancel_listener {
            dispatch(executor.as_ref(), listener);
        }
        for (listener, executor) in completion_listeners {
            executor.execute(Box::new(move || listener(true)));
        }
        true
    }

    pub(crate) fn on_cancel(
        &self,
        listener: CancelListener,
        executor: Option<SharedExecutor>,
    ) -> Result<(), FutureError> {
        let mut slots = self.slots.lock();
        if slots.cancel_registered {
            return Err(FutureError::CancelListenerAlreadyRegistered);
        }
        slots.cancel_registered = true;

        match self.phase.load(Ordering::Acquire) {
            CANCELLED => {
                drop(slots);
                dispatch(executor.as_ref(), listener);
            }
            COMPLETED if !self.cancellable_when_completed => {
                trace!(kind = self.kind, "Cancel listener discarded; future already completed");
            }
            _ => slots.cancel_listener = Some((listener, executor)),
        }
        Ok(())
    }

    pub(crate) fn on_result(
        self: &Arc<Self>,
        listener: BoxResultListener<V>,
        executor: Option<SharedExecutor>,
    ) {
        let mut slots = self.slots.lock();
        match self.phase.load(Ordering::Acquire) {
            PENDING => match executor {
                Some(executor) => slots.result_listeners.push((listener, executor)),
                None => {
                    // Without an executor there is nowhere to deliver a later result.
                    warn!(
                        kind = self.kind,
                        "Result listener registered on a pending future without an executor; it will never be called"
                    );
                }
            },
            COMPLETED => {
                drop(slots);
                let Some(outcome) = self.peek() else {
                    return;
                };
                match executor {
                    Some(executor) => {
                        let state = Arc::clone(self);
                        executor.execute(Box::new(move || {
                            if !state.is_cancelled() {
                                listener.on_result(outcome);
                            }
                        }));
                    }
                    None => listener.on_result(outcome),
                }
            }
            _ => trace!(kind = self.kind, "Result listener dropped; future cancelled"),
        }
    }

    pub(crate) fn on_completed(
        self: &Arc<Self>,
        listener: CompletionListener,
        executor: Option<SharedExecutor>,
    ) {
        let mut slots = self.slots.lock();
        match (self.phase.load(Ordering::Acquire), executor) {
            (PENDING, Some(executor)) => slots.completion_listeners.push((listener, executor)),
            (PENDING, None) => {
                warn!(
                    kind = self.kind,
                    "Completion listener registered on a pending future without an executor; it will never be called"
                );
            }
            (_, Some(executor)) => {
                drop(slots);
                let state = Arc::clone(self);
                executor.execute(Box::new(move || listener(state.is_cancelled())));
            }
            (COMPLETED, None) => {
                drop(slots);
                listener(false);
            }
            (_, None) => trace!(kind = self.kind, "Completion listener dropped; future cancelled"),
        }
    }

    /// Block until the state leaves `Pending`.
    pub(crate) fn wait(&self) -> Outcome<V> {
        let mut slots = self.slots.lock();
        while self.phase.load(Ordering::Acquire) == PENDING {
            self.resolved.wait(&mut slots);
        }
        drop(slots);
        self.settled_outcome()
    }

    /// Block until the state leaves `Pending` or `timeout` elapses.
    pub(crate) fn wait_timeout(&self, timeout: Duration) -> Outcome<V> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return self.wait();
        };
        let mut slots = self.slots.lock();
        while self.phase.load(Ordering::Acquire) == PENDING {
            if self.resolved.wait_until(&mut slots, deadline).timed_out() {
                break;
            }
        }
        let still_pending = self.phase.load(Ordering::Acquire) == PENDING;
        drop(slots);

        if still_pending {
            trace!(kind = self.kind, ?timeout, "Wait timed out");
            return Outcome::failure(FutureError::TimedOut(timeout).into());
        }
        self.settled_outcome()
    }

    fn settled_outcome(&self) -> Outcome<V> {
        match self.peek() {
            Some(outcome) => outcome,
            None => Outcome::failure(FutureError::Cancelled.into()),
        }
    }
}
