//! Mapping over futures behaves like mapping over the value.

use proptest::prelude::*;
use result_future::future::{ResultFuture, ResultFutureExt};
use result_future::{result_futures, Exception, InlineExecutor, SharedExecutor};
use std::sync::Arc;

/// map(f).map(g) on a future equals map(g . f) on the value
#[test]
fn test_map_composition_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(any::<i32>(), any::<i32>()), |(value, offset)| {
            let inline: SharedExecutor = Arc::new(InlineExecutor);
            let latch = result_futures::latch::<i32>(Some(inline));
            let mapped = latch
                .map(move |x| x.wrapping_add(offset))
                .map(|x| x.wrapping_mul(3));

            latch.succeed(value);
            prop_assert_eq!(
                mapped.wait_value(),
                Some(value.wrapping_add(offset).wrapping_mul(3))
            );
            Ok(())
        })
        .unwrap();
}

/// Failures reach the end of any chain with their identity intact
#[test]
fn test_failure_passes_through_chain_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(1usize..8), |depth| {
            let cause = Exception::msg("root cause");
            let mut current = result_futures::failure::<u64>(cause.clone(), None).map(|x| x + 1);
            for _ in 1..depth {
                current = current.map(|x| x + 1);
            }

            let err = current.peek_value_or_err().unwrap_err();
            prop_assert!(Exception::ptr_eq(&err, &cause));
            Ok(())
        })
        .unwrap();
}
