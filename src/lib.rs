//! result-future: outcomes and listener-driven futures
//!
//! [`Outcome`] holds a success value or a failure. A [`ResultFuture`]
//! delivers one outcome later and can be polled, waited on, cancelled,
//! mapped, or observed through listeners dispatched onto an [`Executor`]
//! chosen by the caller.

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod future;
pub mod logging;
pub mod outcome;
pub mod result_futures;

pub use error::{ConfigError, FutureError};
pub use executor::{Executor, InlineExecutor, MainLoopExecutor, SharedExecutor};
pub use future::{
    ImmediateFuture, LatchFuture, OutcomeFuture, ResultFuture, ResultFutureExt, TaskFuture,
};
pub use outcome::{Exception, Outcome};
