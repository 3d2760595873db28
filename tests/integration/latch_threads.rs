//! Latch futures completed and cancelled across threads.

use result_future::future::{LatchFuture, ResultFuture, ResultFutureExt};
use result_future::{Exception, FutureError, InlineExecutor, SharedExecutor};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_wait_blocks_until_second_thread_completes() {
    let latch = LatchFuture::new(None);
    let producer = latch.clone();
    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(30));
        producer.succeed(42)
    });

    let started = Instant::now();
    let outcome = latch.wait();
    assert!(started.elapsed() >= Duration::from_millis(20));
    assert!(outcome.is_success());
    assert_eq!(outcome.into_value(), Some(42));
    assert!(handle.join().unwrap());

    assert!(!latch.cancel());
}

#[test]
fn test_many_waiters_released_together() {
    let latch = LatchFuture::<String>::new(None);
    let waiters: Vec<_> = (0..8)
        .map(|_| {
            let waiter = latch.clone();
            thread::spawn(move || waiter.wait_value())
        })
        .collect();

    thread::sleep(Duration::from_millis(10));
    latch.succeed("open".to_string());

    for waiter in waiters {
        assert_eq!(waiter.join().unwrap().as_deref(), Some("open"));
    }
}

#[test]
fn test_zero_timeout_returns_without_blocking() {
    let latch = LatchFuture::<u64>::new(None);
    let started = Instant::now();
    let outcome = latch.wait_timeout(Duration::ZERO);
    assert!(started.elapsed() < Duration::from_millis(500));
    assert!(outcome.is_timeout());
    assert!(matches!(
        outcome.exception().unwrap().downcast_ref::<FutureError>(),
        Some(FutureError::TimedOut(_))
    ));
}

#[test]
fn test_bounded_wait_sees_late_completion() {
    let latch = LatchFuture::new(None);
    let producer = latch.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        producer.succeed(1u8);
    });
    let outcome = latch.wait_timeout(Duration::from_secs(5));
    assert_eq!(outcome.into_value(), Some(1));
}

#[test]
fn test_wait_released_by_cancel() {
    let latch = LatchFuture::<u8>::new(None);
    let canceller = latch.clone();
    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        canceller.cancel()
    });

    assert!(latch.wait().is_cancellation());
    assert!(handle.join().unwrap());
    assert!(latch.is_cancelled());
    assert!(!latch.is_result_ready());
}

#[test]
fn test_completion_racing_cancellation_has_one_winner() {
    for _ in 0..200 {
        let inline: SharedExecutor = Arc::new(InlineExecutor);
        let latch = LatchFuture::<u32>::new(Some(inline));
        let cancel_fired = Arc::new(AtomicUsize::new(0));
        let result_fired = Arc::new(AtomicUsize::new(0));

        let c = cancel_fired.clone();
        latch
            .on_cancel(move || {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        let r = result_fired.clone();
        latch.on_result(move |_| {
            r.fetch_add(1, Ordering::SeqCst);
        });

        let barrier = Arc::new(Barrier::new(2));
        let completer = {
            let latch = latch.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                latch.succeed(1)
            })
        };
        barrier.wait();
        let cancelled = latch.cancel();
        let completed = completer.join().unwrap();

        assert!(cancelled ^ completed, "exactly one terminal transition wins");
        assert_eq!(cancel_fired.load(Ordering::SeqCst), cancelled as usize);
        assert_eq!(result_fired.load(Ordering::SeqCst), completed as usize);
    }
}

#[test]
fn test_failure_identity_survives_wait() {
    let latch = LatchFuture::<Vec<u8>>::new(None);
    let cause = Exception::new(std::io::Error::new(
        std::io::ErrorKind::ConnectionReset,
        "peer reset",
    ));
    let producer = latch.clone();
    let sent = cause.clone();
    thread::spawn(move || producer.fail_with(sent)).join().unwrap();

    let err = latch.wait_value_or_err().unwrap_err();
    assert!(Exception::ptr_eq(&err, &cause));
    assert_eq!(
        err.downcast_ref::<std::io::Error>().unwrap().kind(),
        std::io::ErrorKind::ConnectionReset
    );
}
