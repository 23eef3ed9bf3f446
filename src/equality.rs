//! Process-wide equality and hash functions.
//!
//! `Optional`, `Either` and `Try` compare and hash their payloads through the
//! registry in this module instead of calling `PartialEq`/`Hash` directly, so
//! a program can swap in its own notion of equality (case-insensitive keys,
//! tolerance-based floats, ...) for every container at once.
//!
//! The registry holds exactly one equality function and one hash function.
//! Both default to the payload's own structural implementation and each can
//! be replaced independently. Replacement is process-wide and not
//! transactional: a reader may observe a new equality function paired with
//! the old hash function.
//!
//! # Examples
//!
//! ```rust
//! use scalars::equality::{equals, hash_of};
//!
//! assert!(equals(&vec![1, 2], &vec![1, 2]));
//! assert!(!equals(&1_i32, &1_i64));
//! assert_eq!(hash_of(&"key"), hash_of(&"key"));
//! ```

use std::any::Any;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHasher;

use crate::lazy::Lazily;

/// Object-safe structural equality.
///
/// Implemented for every `PartialEq + 'static` type. Values of different
/// concrete types are never equal under [`default_equality`].
pub trait DynEq: Any {
    /// Exposes the value for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Compares `self` against a type-erased value.
    fn dyn_eq(&self, other: &dyn DynEq) -> bool;
}

impl<T: PartialEq + Any> DynEq for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DynEq) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// Object-safe structural hashing.
///
/// Implemented for every `Hash + 'static` type.
pub trait DynHash: Any {
    /// Exposes the value for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Hashes `self` with [`FxHasher`].
    fn dyn_hash(&self) -> u64;
}

impl<T: Hash + Any> DynHash for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

/// The shape of a registered equality function.
pub type EqualityFn = Arc<dyn Fn(&dyn DynEq, &dyn DynEq) -> bool + Send + Sync>;

/// The shape of a registered hash function.
pub type HashFn = Arc<dyn Fn(&dyn DynHash) -> u64 + Send + Sync>;

static EQUALITY: Lazily<RwLock<EqualityFn>> =
    Lazily::new(|| RwLock::new(Arc::new(default_equality)));

static HASH: Lazily<RwLock<HashFn>> = Lazily::new(|| RwLock::new(Arc::new(default_hash)));

/// The default equality: the payload's own `PartialEq`.
pub fn default_equality(left: &dyn DynEq, right: &dyn DynEq) -> bool {
    left.dyn_eq(right)
}

/// The default hash: the payload's own `Hash` fed through [`FxHasher`].
pub fn default_hash(item: &dyn DynHash) -> u64 {
    item.dyn_hash()
}

/// Returns the currently registered equality function.
pub fn equality_function() -> EqualityFn {
    Arc::clone(&EQUALITY.get().read())
}

/// Replaces the process-wide equality function.
///
/// # Examples
///
/// ```rust
/// use scalars::equality::{DynEq, reset_equality_function, set_equality_function};
/// use scalars::Optional;
///
/// set_equality_function(|left: &dyn DynEq, right: &dyn DynEq| {
///     match (left.as_any().downcast_ref::<i32>(), right.as_any().downcast_ref::<i32>()) {
///         (Some(left), Some(right)) => left % 10 == right % 10,
///         _ => false,
///     }
/// });
/// assert_eq!(Optional::Some(3), Optional::Some(13));
/// reset_equality_function();
/// assert_ne!(Optional::Some(3), Optional::Some(13));
/// ```
pub fn set_equality_function<F>(function: F)
where
    F: Fn(&dyn DynEq, &dyn DynEq) -> bool + Send + Sync + 'static,
{
    *EQUALITY.get().write() = Arc::new(function);
}

/// Restores [`default_equality`].
pub fn reset_equality_function() {
    *EQUALITY.get().write() = Arc::new(default_equality);
}

/// Returns the currently registered hash function.
pub fn hash_function() -> HashFn {
    Arc::clone(&HASH.get().read())
}

/// Replaces the process-wide hash function.
pub fn set_hash_function<F>(function: F)
where
    F: Fn(&dyn DynHash) -> u64 + Send + Sync + 'static,
{
    *HASH.get().write() = Arc::new(function);
}

/// Restores [`default_hash`].
pub fn reset_hash_function() {
    *HASH.get().write() = Arc::new(default_hash);
}

/// Compares two values with the registered equality function.
pub fn equals(left: &dyn DynEq, right: &dyn DynEq) -> bool {
    // The lock is released before the call so nested comparisons can re-enter.
    let function = equality_function();
    function(left, right)
}

/// Hashes a value with the registered hash function.
pub fn hash_of(item: &dyn DynHash) -> u64 {
    let function = hash_function();
    function(item)
}

/// Combines the hashes of several values: `result = 31 * result + hash(item)`,
/// starting from 1 and wrapping on overflow.
///
/// # Examples
///
/// ```rust
/// use scalars::equality::{hash_items, hash_of};
///
/// let expected = 31_u64.wrapping_add(hash_of(&7_i64));
/// assert_eq!(hash_items(&[&7_i64]), expected);
/// ```
pub fn hash_items(items: &[&dyn DynHash]) -> u64 {
    let function = hash_function();
    items.iter().fold(1_u64, |result, item| {
        result.wrapping_mul(31).wrapping_add(function(*item))
    })
}
