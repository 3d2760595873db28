//! Main Loop Executor
//!
//! A single designated thread drains a queue of posted jobs. `execute` runs
//! inline when the caller already is that thread and posts otherwise, so code
//! running on the loop does not pay for a round trip through the queue.
//!
//! The loop thread is whichever thread last called [`MainLoopExecutor::run`]
//! or [`MainLoopExecutor::run_pending`] (or [`MainLoopExecutor::bind_current_thread`]).

use super::{Executor, Job};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, ThreadId};
use tracing::{debug, trace};

/// Handle to a posted job, used to withdraw it before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

struct LoopQueue {
    jobs: VecDeque<(CallbackId, Job)>,
    quit: bool,
}

struct LoopShared {
    queue: Mutex<LoopQueue>,
    wakeup: Condvar,
    next_id: AtomicU64,
    loop_thread: Mutex<Option<ThreadId>>,
}

/// Executor bound to one designated loop thread.
#[derive(Clone)]
pub struct MainLoopExecutor {
    shared: Arc<LoopShared>,
}

impl Default for MainLoopExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl MainLoopExecutor {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(LoopShared {
                queue: Mutex::new(LoopQueue {
                    jobs: VecDeque::new(),
                    quit: false,
                }),
                wakeup: Condvar::new(),
                next_id: AtomicU64::new(1),
                loop_thread: Mutex::new(None),
            }),
        }
    }

    /// Make the calling thread the loop thread.
    pub fn bind_current_thread(&self) {
        *self.shared.loop_thread.lock() = Some(thread::current().id());
    }

    /// True if the calling thread is the loop thread.
    pub fn is_current(&self) -> bool {
        *self.shared.loop_thread.lock() == Some(thread::current().id())
    }

    /// Queue a job for the loop thread. Never runs it inline.
    pub fn post<F>(&self, job: F) -> CallbackId
    where
        F: FnOnce() + Send + 'static,
    {
        self.post_job(Box::new(job))
    }

    fn post_job(&self, job: Job) -> CallbackId {
        let id = CallbackId(self.shared.next_id.fetch_add(1, Ordering::Relaxed));
        let mut queue = self.shared.queue.lock();
        queue.jobs.push_back((id, job));
        trace!(callback_id = id.0, queued = queue.jobs.len(), "Posted job to main loop");
        drop(queue);
        self.shared.wakeup.notify_one();
        id
    }

    /// Withdraw a posted job that has not started yet.
    ///
    /// Returns false if the job already ran, is running, or was never posted.
    pub fn remove_callbacks(&self, id: CallbackId) -> bool {
        let mut queue = self.shared.queue.lock();
        let before = queue.jobs.len();
        queue.jobs.retain(|(queued, _)| *queued != id);
        let removed = queue.jobs.len() != before;
        if removed {
            debug!(callback_id = id.0, "Removed pending main loop job");
        }
        removed
    }

    /// Number of jobs waiting to run.
    pub fn pending(&self) -> usize {
        self.shared.queue.lock().jobs.len()
    }

    /// Bind the calling thread and run queued jobs until the queue is empty.
    ///
    /// Jobs posted while draining run in the same call. Returns the number of
    /// jobs run.
    pub fn run_pending(&self) -> usize {
        self.bind_current_thread();
        let mut ran = 0;
        loop {
            let next = self.shared.queue.lock().jobs.pop_front();
            match next {
                Some((_, job)) => {
                    job();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    /// Bind the calling thread and run jobs until [`MainLoopExecutor::quit`].
    ///
    /// Jobs still queued when the loop quits are left in place.
    pub fn run(&self) {
        self.bind_current_thread();
        debug!("Main loop started");
        loop {
            let job = {
                let mut queue = self.shared.queue.lock();
                loop {
                    if queue.quit {
                        debug!(left = queue.jobs.len(), "Main loop quit");
                        return;
                    }
                    if let Some((_, job)) = queue.jobs.pop_front() {
                        break job;
                    }
                    self.shared.wakeup.wait(&mut queue);
                }
            };
            job();
        }
    }

    /// Ask a running loop to return. Sticky: later `run` calls return at once.
    pub fn quit(&self) {
        self.shared.queue.lock().quit = true;
        self.shared.wakeup.notify_all();
    }
}

impl Executor for MainLoopExecutor {
    fn execute(&self, job: Job) {
        if self.is_current() {
            job();
        } else {
            self.post_job(job);
        }
    }
}
