//! Property-based tests for the `Either` laws.
//!
//! - **Functor/Monad Laws** on the right-biased combinators
//! - **Swap involution**
//! - **Left projection** mirrors the right bias through `swap`
//! - **Equality and hashing**: equal values hash equally, shapes never compare equal

use scalars::equality::hash_of;
use scalars::{Either, Optional};
use proptest::prelude::*;

fn either_strategy() -> impl Strategy<Value = Either<String, i32>> {
    prop_oneof![
        "[a-z]{0,8}".prop_map(Either::Left),
        any::<i32>().prop_map(Either::Right),
    ]
}

fn checked_double(n: i32) -> Either<String, i32> {
    n.checked_mul(2).map_or_else(|| Either::Left(format!("overflow at {n}")), Either::Right)
}

fn non_negative(n: i32) -> Either<String, u32> {
    u32::try_from(n).map_or_else(|_| Either::Left("negative".to_string()), Either::Right)
}

// =============================================================================
// Functor Laws
// =============================================================================

proptest! {
    /// Identity: map(id) == id
    #[test]
    fn prop_either_functor_identity(value in either_strategy()) {
        prop_assert_eq!(value.clone().map(|n| n), value);
    }
}

proptest! {
    /// Composition: map(f).map(g) == map(g . f)
    #[test]
    fn prop_either_functor_composition(value in either_strategy()) {
        let f = |n: i32| i64::from(n) + 1;
        let g = |n: i64| n * 2;
        prop_assert_eq!(value.clone().map(f).map(g), value.map(|n| g(f(n))));
    }
}

// =============================================================================
// Monad Laws
// =============================================================================

proptest! {
    /// Left identity: Right(a).flat_map(f) == f(a)
    #[test]
    fn prop_either_left_identity(value in any::<i32>()) {
        prop_assert_eq!(
            Either::<String, i32>::Right(value).flat_map(checked_double),
            checked_double(value)
        );
    }
}

proptest! {
    /// Right identity: m.flat_map(Right) == m
    #[test]
    fn prop_either_right_identity(value in either_strategy()) {
        prop_assert_eq!(value.clone().flat_map(Either::Right), value);
    }
}

proptest! {
    /// Associativity
    #[test]
    fn prop_either_associativity(value in either_strategy()) {
        prop_assert_eq!(
            value.clone().flat_map(checked_double).flat_map(non_negative),
            value.flat_map(|n| checked_double(n).flat_map(non_negative))
        );
    }
}

// =============================================================================
// Swap and Projection
// =============================================================================

proptest! {
    /// swap is an involution
    #[test]
    fn prop_either_swap_involution(value in either_strategy()) {
        prop_assert_eq!(value.clone().swap().swap(), value);
    }
}

proptest! {
    /// left().map(f) == swap().map(f).swap()
    #[test]
    fn prop_either_left_projection_mirrors_swap(value in either_strategy()) {
        let shout = |text: String| text.to_uppercase();
        prop_assert_eq!(value.clone().left().map(shout), value.swap().map(shout).swap());
    }
}

proptest! {
    /// to_option keeps exactly the right value
    #[test]
    fn prop_either_to_option(value in either_strategy()) {
        let expected = match &value {
            Either::Right(n) => Optional::Some(*n),
            Either::Left(_) => Optional::None,
        };
        prop_assert_eq!(value.to_option(), expected);
    }
}

// =============================================================================
// Equality and Hashing
// =============================================================================

proptest! {
    /// Independently built equal values compare and hash equally
    #[test]
    fn prop_either_equal_values_hash_equally(value in either_strategy()) {
        let rebuilt = match &value {
            Either::Left(text) => Either::Left(text.clone()),
            Either::Right(n) => Either::Right(*n),
        };
        prop_assert_eq!(&value, &rebuilt);
        prop_assert_eq!(hash_of(&value), hash_of(&rebuilt));
    }
}

proptest! {
    /// Left(x) != Right(x) even when both sides hold the same payload
    #[test]
    fn prop_either_cross_shape_is_unequal(text in "[a-z]{0,8}") {
        let left: Either<String, String> = Either::Left(text.clone());
        let right: Either<String, String> = Either::Right(text);
        prop_assert_ne!(left, right);
    }
}

proptest! {
    /// Equality agrees with payload equality on each side
    #[test]
    fn prop_either_equality_follows_payload(
        first in either_strategy(),
        second in either_strategy(),
    ) {
        let expected = match (&first, &second) {
            (Either::Left(a), Either::Left(b)) => a == b,
            (Either::Right(a), Either::Right(b)) => a == b,
            _ => false,
        };
        prop_assert_eq!(first == second, expected);
        if expected {
            prop_assert_eq!(hash_of(&first), hash_of(&second));
        }
    }
}
