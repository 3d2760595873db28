//! Listener delivery onto a main loop driven by its own thread.

use result_future::future::{ResultFuture, ResultFutureExt};
use result_future::result_futures;
use result_future::{MainLoopExecutor, SharedExecutor};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_listeners_run_on_loop_thread() {
    let main_loop = MainLoopExecutor::new();
    let runner = main_loop.clone();
    let loop_thread = thread::Builder::new()
        .name("ui".to_string())
        .spawn(move || runner.run())
        .unwrap();

    let results: SharedExecutor = Arc::new(main_loop.clone());
    let latch = result_futures::latch::<u32>(Some(results));
    let (tx, rx) = mpsc::channel();
    let success_tx = tx.clone();
    latch.on_success(move |value| {
        let name = thread::current().name().map(str::to_string);
        success_tx.send((value, name)).unwrap();
    });
    latch.on_completed(move |cancelled| {
        tx.send((cancelled as u32 + 100, None)).unwrap();
    });

    latch.succeed(9);

    let mut received = vec![
        rx.recv_timeout(Duration::from_secs(5)).unwrap(),
        rx.recv_timeout(Duration::from_secs(5)).unwrap(),
    ];
    received.sort();
    assert_eq!(received[0], (9, Some("ui".to_string())));
    assert_eq!(received[1], (100, None));

    main_loop.quit();
    loop_thread.join().unwrap();
}

#[test]
fn test_queued_delivery_suppressed_by_cancel() {
    let main_loop = MainLoopExecutor::new();
    let results: SharedExecutor = Arc::new(main_loop.clone());
    let future = result_futures::success(1, Some(results));

    let (tx, rx) = mpsc::channel::<u32>();
    future.on_success(move |v| tx.send(v).unwrap());
    assert_eq!(main_loop.pending(), 1);

    assert!(future.cancel());
    main_loop.run_pending();
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_withdrawn_callback_never_runs() {
    let main_loop = MainLoopExecutor::new();
    let (tx, rx) = mpsc::channel::<&'static str>();
    let first_tx = tx.clone();
    let first = main_loop.post(move || first_tx.send("first").unwrap());
    main_loop.post(move || tx.send("second").unwrap());

    assert!(main_loop.remove_callbacks(first));
    assert!(!main_loop.remove_callbacks(first));
    assert_eq!(main_loop.run_pending(), 1);
    assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec!["second"]);
}

#[test]
fn test_quit_is_sticky() {
    let main_loop = MainLoopExecutor::new();
    main_loop.quit();
    let runner = main_loop.clone();
    thread::spawn(move || runner.run()).join().unwrap();
}
