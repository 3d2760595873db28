//! Laws every outcome obeys regardless of the value it carries.

use proptest::prelude::*;
use result_future::{Exception, FutureError, Outcome};

/// Exactly one of success or failure holds, and the accessors agree with it
#[test]
fn test_success_failure_exclusive_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(any::<bool>(), any::<i64>(), ".*"), |(ok, value, message)| {
            let outcome = if ok {
                Outcome::success(value)
            } else {
                Outcome::failure(Exception::msg(message.clone()))
            };

            prop_assert!(outcome.is_success() != outcome.is_failure());
            prop_assert_eq!(outcome.value().is_some(), ok);
            prop_assert_eq!(outcome.exception().is_some(), !ok);
            if !ok {
                prop_assert_eq!(outcome.exception().unwrap().to_string(), message);
            }
            Ok(())
        })
        .unwrap();
}

/// All three failure policies surface the same stored exception
#[test]
fn test_failure_policies_agree_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"[a-z ]{1,40}", |message| {
            let cause = Exception::msg(message.clone());
            let outcome: Outcome<u8> = Outcome::failure(cause.clone());

            let rethrown = outcome.try_value().unwrap_err();
            prop_assert!(Exception::ptr_eq(&rethrown, &cause));

            match outcome.try_value_wrapped().unwrap_err() {
                FutureError::ExecutionFailed { source } => {
                    prop_assert!(Exception::ptr_eq(&source, &cause));
                }
                other => prop_assert!(false, "unexpected {:?}", other),
            }

            let unchecked = outcome.try_value_unchecked().unwrap_err();
            let inner = unchecked.downcast_ref::<Exception>().unwrap();
            prop_assert!(Exception::ptr_eq(inner, &cause));
            Ok(())
        })
        .unwrap();
}

/// Converting from a `Result` keeps the value or the error text
#[test]
fn test_from_result_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::result::maybe_ok(any::<u32>(), "[a-z]{1,12}"), |result| {
            let expected = result.clone();
            let outcome: Outcome<u32> =
                Outcome::from(result.map_err(|message| anyhow::anyhow!(message)));
            match expected {
                Ok(value) => prop_assert_eq!(outcome.into_value(), Some(value)),
                Err(message) => {
                    prop_assert_eq!(outcome.exception().unwrap().to_string(), message)
                }
            }
            Ok(())
        })
        .unwrap();
}
