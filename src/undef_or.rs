//! Free functions that treat a nullable value (`std::option::Option<T>`)
//! the way [`Optional`](crate::Optional) treats its two shapes.
//!
//! These are handy at the edges of a program, where values arrive as plain
//! `Option`s and converting them into `Optional` first would be noise.
//!
//! # Examples
//!
//! ```rust
//! use scalars::undef_or;
//!
//! let port: Option<u16> = Some(8080);
//! assert!(undef_or::defined(&port));
//! assert_eq!(undef_or::fold(port, || 0, |port| port + 1), 8081);
//! assert_eq!(undef_or::get_or_else(None::<u16>, || 80), 80);
//! ```

use std::hash::Hash;

/// Returns `true` when the value is present.
#[inline]
pub const fn defined<T>(value: &Option<T>) -> bool {
    value.is_some()
}

/// Applies `function` to a present value.
pub fn map<T, U>(value: Option<T>, function: impl FnOnce(T) -> U) -> Option<U> {
    value.map(function)
}

/// Applies `function` to a present value and flattens the result.
pub fn flat_map<T, U>(value: Option<T>, function: impl FnOnce(T) -> Option<U>) -> Option<U> {
    value.and_then(function)
}

/// Eliminates the value: `if_undefined()` when missing, `if_defined(t)` otherwise.
pub fn fold<T, U>(
    value: Option<T>,
    if_undefined: impl FnOnce() -> U,
    if_defined: impl FnOnce(T) -> U,
) -> U {
    match value {
        Some(value) => if_defined(value),
        None => if_undefined(),
    }
}

/// Returns the value or the lazily computed default.
pub fn get_or_else<T>(value: Option<T>, default: impl FnOnce() -> T) -> T {
    value.unwrap_or_else(default)
}

/// Returns the value or the lazily computed alternative.
pub fn or_else<T>(value: Option<T>, alternative: impl FnOnce() -> Option<T>) -> Option<T> {
    value.or_else(alternative)
}

/// Runs `function` for its side effect when the value is present.
pub fn foreach<T>(value: Option<T>, function: impl FnOnce(T)) {
    if let Some(value) = value {
        function(value);
    }
}

/// `false` when missing, `predicate(t)` otherwise.
pub fn exists<T>(value: Option<T>, predicate: impl FnOnce(T) -> bool) -> bool {
    value.is_some_and(predicate)
}

/// `true` when missing, `predicate(t)` otherwise.
pub fn forall<T>(value: Option<T>, predicate: impl FnOnce(T) -> bool) -> bool {
    value.is_none_or(predicate)
}

/// Keeps a present value only when `predicate` accepts it.
pub fn filter<T>(value: Option<T>, predicate: impl FnOnce(&T) -> bool) -> Option<T> {
    value.filter(predicate)
}

/// Keeps a present value only when `predicate` rejects it.
pub fn filter_not<T>(value: Option<T>, predicate: impl FnOnce(&T) -> bool) -> Option<T> {
    value.filter(|value| !predicate(value))
}

/// Collapses both missing shapes into the single null sentinel `None`.
#[inline]
pub fn or_null<T>(value: Option<T>) -> Option<T> {
    value
}

/// A zero- or one-element `Vec`.
pub fn to_array<T>(value: Option<T>) -> Vec<T> {
    value.into_iter().collect()
}

/// A zero- or one-element persistent list.
pub fn to_list<T: Clone>(value: Option<T>) -> im::Vector<T> {
    value.into_iter().collect()
}

/// A zero- or one-element persistent set.
pub fn to_set<T: Hash + Eq + Clone>(value: Option<T>) -> im::HashSet<T> {
    value.into_iter().collect()
}
