//! Integration tests for `Optional`.

use scalars::option::option;
use scalars::{Either, Optional};
use rstest::rstest;
use std::collections::HashSet;

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_option_of_missing_value_is_empty() {
    assert!(option::<i32>(None).is_empty());
}

#[rstest]
fn test_option_of_zero_is_defined() {
    assert!(option(Some(0)).is_defined());
}

#[rstest]
fn test_empty_equals_none() {
    assert_eq!(Optional::<String>::empty(), Optional::None);
}

// =============================================================================
// Vacuous truth and defaults
// =============================================================================

#[rstest]
#[case(Optional::Some(5), 5)]
#[case(Optional::None, 0)]
fn test_get_or_else(#[case] value: Optional<i32>, #[case] expected: i32) {
    assert_eq!(value.get_or_else(|| 0), expected);
}

#[rstest]
fn test_get_or_else_is_lazy() {
    let mut evaluated = false;
    let value = Optional::Some(1).get_or_else(|| {
        evaluated = true;
        2
    });
    assert_eq!(value, 1);
    assert!(!evaluated);
}

#[rstest]
fn test_none_is_vacuously_true() {
    let none: Optional<i32> = Optional::None;
    assert!(none.forall(|_| false));
    assert!(!none.exists(|_| true));
    assert_eq!(none.filter(|_| true), Optional::None);
}

#[rstest]
#[case(Optional::Some(4), Optional::Some(4))]
#[case(Optional::Some(3), Optional::None)]
#[case(Optional::None, Optional::None)]
fn test_filter_even(#[case] value: Optional<i32>, #[case] expected: Optional<i32>) {
    assert_eq!(value.filter(|n| n % 2 == 0), expected);
}

// =============================================================================
// Folding
// =============================================================================

#[rstest]
fn test_fold_unifies_both_arms() {
    let describe = |value: Optional<i32>| value.fold(|| "empty".to_string(), |n| format!("value {n}"));
    assert_eq!(describe(Optional::Some(3)), "value 3");
    assert_eq!(describe(Optional::None), "empty");
}

#[rstest]
fn test_fold_distinct_keeps_arms_apart() {
    let folded = Optional::<i32>::None.fold_distinct(|| "nothing", |n| n * 2);
    assert_eq!(folded, Either::Left("nothing"));
}

// =============================================================================
// Side effects
// =============================================================================

#[rstest]
fn test_foreach_runs_only_for_some() {
    let mut seen = Vec::new();
    Optional::Some("a").foreach(|value| seen.push(value));
    Optional::None.foreach(|value| seen.push(value));
    assert_eq!(seen, vec!["a"]);
}

// =============================================================================
// Conversions
// =============================================================================

#[rstest]
fn test_conversions_hold_zero_or_one_element() {
    let some = Optional::Some(7);
    assert_eq!(some.to_array(), vec![7]);
    assert_eq!(some.to_list(), im::vector![7]);
    assert!(some.to_set().contains(&7));

    let none: Optional<i32> = Optional::None;
    assert!(none.to_array().is_empty());
    assert!(none.to_list().is_empty());
    assert!(none.to_set().is_empty());
}

#[rstest]
fn test_or_null_returns_the_null_sentinel() {
    assert_eq!(Optional::Some('x').or_null(), Some('x'));
    assert_eq!(Optional::<char>::None.or_null(), None);
}

#[rstest]
fn test_iteration() {
    let total: i32 = Optional::Some(3).into_iter().chain(Optional::None).sum();
    assert_eq!(total, 3);
    assert_eq!((&Optional::Some(1)).into_iter().count(), 1);
}

// =============================================================================
// Equality and hashing
// =============================================================================

#[rstest]
fn test_contains_uses_structural_equality() {
    assert!(Optional::Some(vec![1, 2]).contains(&vec![1, 2]));
    assert!(!Optional::Some(vec![1, 2]).contains(&vec![2, 1]));
}

#[rstest]
fn test_equal_values_collapse_in_hash_set() {
    let set: HashSet<Optional<String>> = [
        Optional::Some("a".to_string()),
        Optional::Some("a".to_string()),
        Optional::None,
        Optional::None,
    ]
    .into_iter()
    .collect();
    assert_eq!(set.len(), 2);
}

#[rstest]
fn test_nested_values_compare_structurally() {
    let left = Optional::Some(Optional::Some(Either::<i32, String>::Right("deep".into())));
    let right = Optional::Some(Optional::Some(Either::<i32, String>::Right("deep".into())));
    assert_eq!(left, right);
}
