//! Property-based tests for the `Try` laws.
//!
//! - **Monad Laws**: left identity, right identity, associativity
//! - **Map coherence**: `Try::of(|| f(x)).map(g) == Try::of(|| g(f(x)))`
//! - **failed**: a captured exception comes back unchanged
//! - **Equality and hashing**: failures compare by exception kind and message

use scalars::equality::hash_of;
use scalars::{Exception, Try};
use proptest::prelude::*;

fn try_strategy() -> impl Strategy<Value = Try<i32>> {
    prop_oneof![
        any::<i32>().prop_map(Try::Success),
        "[a-z]{1,8}".prop_map(|message| Try::Failure(Exception::error(message))),
    ]
}

fn reciprocal(n: i32) -> Try<i32> {
    if n == 0 {
        Try::Failure(Exception::illegal_argument("division by zero"))
    } else {
        Try::Success(1_000 / n)
    }
}

fn strictly_positive(n: i32) -> Try<u32> {
    Try::of(|| u32::try_from(n).unwrap_or_else(|_| panic!("negative: {n}")))
}

// =============================================================================
// Monad Laws
// =============================================================================

proptest! {
    /// Left identity: Success(a).flat_map(f) == f(a)
    #[test]
    fn prop_try_left_identity(value in any::<i32>()) {
        prop_assert_eq!(Try::Success(value).flat_map(reciprocal), reciprocal(value));
    }
}

proptest! {
    /// Right identity: m.flat_map(Success) == m
    #[test]
    fn prop_try_right_identity(value in try_strategy()) {
        prop_assert_eq!(value.clone().flat_map(Try::Success), value);
    }
}

proptest! {
    /// Associativity
    #[test]
    fn prop_try_associativity(value in try_strategy()) {
        prop_assert_eq!(
            value.clone().flat_map(reciprocal).flat_map(strictly_positive),
            value.flat_map(|n| reciprocal(n).flat_map(strictly_positive))
        );
    }
}

// =============================================================================
// Map Coherence
// =============================================================================

proptest! {
    /// Try::of(|| f(x)).map(g) == Try::of(|| g(f(x))) when neither raises
    #[test]
    fn prop_try_map_coherence(value in any::<i32>()) {
        let f = |n: i32| n.wrapping_add(7);
        let g = |n: i32| i64::from(n) * 3;
        prop_assert_eq!(Try::of(|| f(value)).map(g), Try::of(|| g(f(value))));
    }
}

proptest! {
    /// A raise inside map is indistinguishable from a raise inside the thunk
    #[test]
    fn prop_try_map_raise_coherence(message in "[a-z]{1,8}") {
        let raise = |_: i32| -> i32 { Exception::error(message.clone()).raise() };
        prop_assert_eq!(Try::Success(1).map(raise), Try::of(|| raise(1)));
    }
}

// =============================================================================
// failed
// =============================================================================

proptest! {
    /// Try::of(|| raise e).failed().get() == e
    #[test]
    fn prop_try_failed_returns_the_raised_exception(message in "[a-z]{1,8}") {
        let exception = Exception::illegal_state(message);
        let raised = exception.clone();
        let attempt = Try::of(move || -> i32 { raised.raise() });
        prop_assert_eq!(attempt.failed().get(), exception);
    }
}

proptest! {
    /// recover(f) on a success is the identity
    #[test]
    fn prop_try_recover_success_identity(value in any::<i32>()) {
        prop_assert_eq!(Try::Success(value).recover(|_| 0), Try::Success(value));
    }
}

// =============================================================================
// Equality and Hashing
// =============================================================================

proptest! {
    /// Independently built equal values compare and hash equally
    #[test]
    fn prop_try_equal_values_hash_equally(value in try_strategy()) {
        let rebuilt = match &value {
            Try::Success(n) => Try::Success(*n),
            Try::Failure(exception) => Try::Failure(Exception::error(exception.to_string())),
        };
        prop_assert_eq!(&value, &rebuilt);
        prop_assert_eq!(hash_of(&value), hash_of(&rebuilt));
    }
}

proptest! {
    /// A success never equals a failure
    #[test]
    fn prop_try_cross_shape_is_unequal(value in any::<i32>(), message in "[a-z]{1,8}") {
        let success = Try::Success(value);
        let failure = Try::Failure(Exception::error(message));
        prop_assert_ne!(success, failure);
    }
}

proptest! {
    /// Failures are equal exactly when their exceptions share kind and message
    #[test]
    fn prop_try_failure_equality_follows_exception(
        first in "[a-z]{1,4}",
        second in "[a-z]{1,4}",
    ) {
        let left: Try<i32> = Try::Failure(Exception::illegal_state(first.clone()));
        let right: Try<i32> = Try::Failure(Exception::illegal_state(second.clone()));
        prop_assert_eq!(left == right, first == second);
        if first == second {
            prop_assert_eq!(hash_of(&left), hash_of(&right));
        }

        let other_kind: Try<i32> = Try::Failure(Exception::no_such_element(first));
        prop_assert_ne!(left, other_kind);
    }
}
