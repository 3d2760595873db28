//! Mapping chains across immediate, latch and task futures.

use result_future::config::PoolConfig;
use result_future::executor::WorkerPool;
use result_future::future::{ResultFuture, ResultFutureExt};
use result_future::result_futures;
use result_future::{Exception, InlineExecutor, MainLoopExecutor, SharedExecutor};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn inline() -> SharedExecutor {
    Arc::new(InlineExecutor)
}

#[test]
fn test_map_doubles_resolved_value() {
    let doubled = result_futures::success(5, None).map(|x| x * 2);
    assert!(doubled.is_result_ready());
    assert_eq!(doubled.wait_value(), Some(10));
}

#[test]
fn test_map_skips_mapper_on_failure() {
    let called = Arc::new(AtomicBool::new(false));
    let cause = Exception::msg("upstream broke");
    let source = result_futures::failure::<i32>(cause.clone(), None);

    let flag = called.clone();
    let mapped = source.map(move |x| {
        flag.store(true, Ordering::SeqCst);
        x + 1
    });

    let err = mapped.wait_value_or_err().unwrap_err();
    assert!(Exception::ptr_eq(&err, &cause));
    assert!(!called.load(Ordering::SeqCst));
}

#[test]
fn test_try_map_failure_becomes_outcome() {
    let mapped = result_futures::success("12x", None).try_map(|text| {
        text.parse::<u32>()
            .map_err(|e| anyhow::anyhow!("bad number {:?}: {}", text, e))
    });
    let err = mapped.wait_value_wrapped().unwrap_err();
    assert!(err.to_string().contains("Execution failed"));
    let source = std::error::Error::source(&err).unwrap();
    assert!(source.to_string().contains("bad number"));
}

#[test]
fn test_chain_over_pending_latch_with_executor() {
    let latch = result_futures::latch::<u32>(Some(inline()));
    let chained = latch
        .map(|x| x + 1)
        .map(|x| x * 3)
        .map(|x| format!("={}", x));

    assert!(!chained.is_result_ready());
    latch.succeed(4);
    assert_eq!(chained.wait_value().as_deref(), Some("=15"));
}

#[test]
fn test_map_over_pending_latch_without_executor() {
    let latch = result_futures::latch::<u32>(None);
    let doubled = latch.map(|x| x * 2);
    assert!(!doubled.is_result_ready());

    latch.succeed(5);
    assert_eq!(
        doubled.wait_timeout(Duration::from_secs(5)).into_value(),
        Some(10)
    );
}

#[test]
fn test_map_without_executor_runs_on_completing_thread() {
    let latch = result_futures::latch::<u32>(None);
    let mapped = latch.map(|_| std::thread::current().name().map(str::to_string));

    let producer = latch.clone();
    std::thread::Builder::new()
        .name("producer".to_string())
        .spawn(move || producer.succeed(1))
        .unwrap()
        .join()
        .unwrap();

    assert_eq!(mapped.peek_value(), Some(Some("producer".to_string())));
}

#[test]
fn test_source_cancel_reaches_every_link() {
    let latch = result_futures::latch::<u32>(Some(inline()));
    let first = latch.map(|x| x + 1);
    let second = first.map(|x| x + 1);

    let cancelled = Arc::new(AtomicUsize::new(0));
    let c = cancelled.clone();
    second
        .on_cancel(move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    assert!(latch.cancel());
    assert!(first.is_cancelled());
    assert!(second.is_cancelled());
    assert_eq!(cancelled.load(Ordering::SeqCst), 1);
    assert!(second.wait().is_cancellation());
}

#[test]
fn test_mapped_cancel_leaves_source_alone() {
    let latch = result_futures::latch::<u32>(Some(inline()));
    let mapped = latch.map(|x| x + 1);

    assert!(mapped.cancel());
    assert!(!latch.is_cancelled());
    assert!(latch.succeed(1));
    assert_eq!(latch.wait_value(), Some(1));
    assert!(mapped.wait().is_cancellation());
}

#[test]
fn test_mapper_runs_on_main_loop() {
    let main_loop = MainLoopExecutor::new();
    main_loop.bind_current_thread();
    let results: SharedExecutor = Arc::new(main_loop.clone());
    let pool = WorkerPool::new(&PoolConfig {
        workers: 2,
        thread_name: "map-test".to_string(),
    })
    .unwrap();

    let task = result_futures::execute_task(
        || {
            std::thread::sleep(Duration::from_millis(5));
            Ok(21u64)
        },
        &pool,
        Some(results),
    );
    let main_thread = std::thread::current().id();
    let mapped = task.map(move |x| {
        assert_eq!(std::thread::current().id(), main_thread);
        x * 2
    });

    assert_eq!(task.wait_timeout(Duration::from_secs(5)).into_value(), Some(21));
    pool.shutdown();
    main_loop.run_pending();
    assert_eq!(mapped.peek_value(), Some(42));
}
