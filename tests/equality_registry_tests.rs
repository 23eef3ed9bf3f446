//! Tests that replace the process-wide equality and hash functions.
//!
//! Every test holds `REGISTRY_LOCK` and restores the defaults on exit, so the
//! tests in this binary never observe each other's registrations.

use scalars::equality::{
    DynEq, DynHash, equals, hash_items, hash_of, reset_equality_function, reset_hash_function,
    set_equality_function, set_hash_function,
};
use scalars::{Either, Optional, Try};
use parking_lot::{Mutex, MutexGuard};
use rstest::{fixture, rstest};
use std::collections::HashSet;

static REGISTRY_LOCK: Mutex<()> = Mutex::new(());

/// Holds the registry for one test and restores the defaults when dropped.
struct Registry {
    _guard: MutexGuard<'static, ()>,
}

impl Drop for Registry {
    fn drop(&mut self) {
        reset_equality_function();
        reset_hash_function();
    }
}

#[fixture]
fn registry() -> Registry {
    let guard = REGISTRY_LOCK.lock();
    reset_equality_function();
    reset_hash_function();
    Registry { _guard: guard }
}

fn case_insensitive(left: &dyn DynEq, right: &dyn DynEq) -> bool {
    match (
        left.as_any().downcast_ref::<String>(),
        right.as_any().downcast_ref::<String>(),
    ) {
        (Some(left), Some(right)) => left.eq_ignore_ascii_case(right),
        _ => left.dyn_eq(right),
    }
}

#[rstest]
fn test_replacing_equality_changes_container_comparison(#[from(registry)] _registry: Registry) {
    let lower = Optional::Some("key".to_string());
    let upper = Optional::Some("KEY".to_string());
    assert_ne!(lower, upper);

    set_equality_function(case_insensitive);
    assert_eq!(lower, upper);
    assert_eq!(
        Either::<i32, String>::Right("a".into()),
        Either::<i32, String>::Right("A".into())
    );
    assert_eq!(Try::Success("x".to_string()), Try::Success("X".to_string()));

    reset_equality_function();
    assert_ne!(lower, upper);
}

#[rstest]
fn test_replacing_equality_leaves_variant_check_alone(#[from(registry)] _registry: Registry) {
    set_equality_function(|_: &dyn DynEq, _: &dyn DynEq| true);
    assert_ne!(Optional::Some(1), Optional::None);
    assert_ne!(Either::<i32, i32>::Left(1), Either::<i32, i32>::Right(1));
    assert_eq!(Optional::Some(1), Optional::Some(2));
}

#[rstest]
fn test_replacing_hash_changes_container_hashes(#[from(registry)] _registry: Registry) {
    let before = hash_of(&Optional::Some(5));
    set_hash_function(|_: &dyn DynHash| 0);
    let after = hash_of(&Optional::Some(5));
    assert_ne!(before, after);
    assert_eq!(hash_of(&Optional::Some(5)), hash_of(&Optional::Some(6)));
}

#[rstest]
fn test_consistent_replacements_collapse_set_entries(#[from(registry)] _registry: Registry) {
    set_equality_function(case_insensitive);
    set_hash_function(|item: &dyn DynHash| {
        match item.as_any().downcast_ref::<String>() {
            Some(text) => scalars::equality::default_hash(&text.to_ascii_lowercase()),
            None => scalars::equality::default_hash(item),
        }
    });

    let set: HashSet<Optional<String>> = ["Alpha", "ALPHA", "alpha", "beta"]
        .into_iter()
        .map(|text| Optional::Some(text.to_string()))
        .collect();
    assert_eq!(set.len(), 2);
}

#[rstest]
fn test_hash_items_uses_registered_function(#[from(registry)] _registry: Registry) {
    set_hash_function(|_: &dyn DynHash| 2);
    assert_eq!(hash_items(&[&1_u8, &"two"]), (31 + 2) * 31 + 2);
}

#[rstest]
fn test_nested_comparison_reenters_registry(#[from(registry)] _registry: Registry) {
    set_equality_function(|left: &dyn DynEq, right: &dyn DynEq| {
        // Optional payloads compare through the registry again.
        left.dyn_eq(right)
    });
    let nested = Optional::Some(Optional::Some(Optional::Some(1)));
    assert_eq!(nested, Optional::Some(Optional::Some(Optional::Some(1))));
    assert!(equals(&nested, &Optional::Some(Optional::Some(Optional::Some(1)))));
}
