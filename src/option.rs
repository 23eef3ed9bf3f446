//! Optional - presence or absence of a value.
//!
//! This module provides [`Optional<T>`], the Scala-style counterpart of
//! `std::option::Option`. It carries the full Scala combinator vocabulary
//! (`fold`, `exists`, `forall`, `filter_not`, persistent conversions) and
//! compares its payload through the [equality registry](crate::equality).
//!
//! # Examples
//!
//! ```rust
//! use scalars::option::{Optional, option};
//!
//! let port = option(Some(8080)).map(|port| port + 1);
//! assert_eq!(port, Optional::Some(8081));
//!
//! let missing: Optional<u16> = option(None);
//! assert!(missing.is_empty());
//! assert_eq!(missing.get_or_else(|| 80), 80);
//! ```

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::either::Either;
use crate::equality;

/// A value that is either present (`Some`) or absent (`None`).
///
/// # Examples
///
/// ```rust
/// use scalars::Optional;
///
/// let value = Optional::Some(3);
/// assert!(value.exists(|n| n % 3 == 0));
/// assert!(Optional::<i32>::None.forall(|_| false));
/// ```
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Optional<T> {
    /// A present value.
    Some(T),
    /// No value.
    None,
}

impl<T> Default for Optional<T> {
    #[inline]
    fn default() -> Self {
        Self::None
    }
}

/// Converts a nullable value: `None` maps to [`Optional::None`], anything else
/// to [`Optional::Some`].
///
/// # Examples
///
/// ```rust
/// use scalars::option::option;
///
/// assert!(option::<i32>(None).is_empty());
/// assert!(option(Some(0)).is_defined());
/// ```
#[inline]
pub fn option<T>(value: Option<T>) -> Optional<T> {
    Optional::from(value)
}

impl<T> Optional<T> {
    // =========================================================================
    // Construction and Type Checking
    // =========================================================================

    /// The empty value, typed.
    #[inline]
    pub const fn empty() -> Self {
        Self::None
    }

    /// Returns `true` for `None`.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns `true` for `Some`.
    #[inline]
    pub const fn is_defined(&self) -> bool {
        matches!(self, Self::Some(_))
    }

    /// Borrows the payload.
    #[inline]
    pub const fn as_ref(&self) -> Optional<&T> {
        match self {
            Self::Some(value) => Optional::Some(value),
            Self::None => Optional::None,
        }
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    /// `Some(t)` becomes `Some(function(t))`; `None` stays `None`.
    #[inline]
    pub fn map<U, F>(self, function: F) -> Optional<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Some(value) => Optional::Some(function(value)),
            Self::None => Optional::None,
        }
    }

    /// Chains an optional computation, short-circuiting on `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scalars::Optional;
    ///
    /// let half = |n: i32| if n % 2 == 0 { Optional::Some(n / 2) } else { Optional::None };
    /// assert_eq!(Optional::Some(8).flat_map(half).flat_map(half), Optional::Some(2));
    /// assert_eq!(Optional::Some(6).flat_map(half).flat_map(half), Optional::None);
    /// ```
    #[inline]
    pub fn flat_map<U, F>(self, function: F) -> Optional<U>
    where
        F: FnOnce(T) -> Optional<U>,
    {
        match self {
            Self::Some(value) => function(value),
            Self::None => Optional::None,
        }
    }

    /// Eliminates the value: `if_empty()` for `None`, `if_defined(t)` for `Some(t)`.
    #[inline]
    pub fn fold<U, E, D>(self, if_empty: E, if_defined: D) -> U
    where
        E: FnOnce() -> U,
        D: FnOnce(T) -> U,
    {
        match self {
            Self::Some(value) => if_defined(value),
            Self::None => if_empty(),
        }
    }

    /// Like [`fold`](Self::fold) but keeps the two result types apart.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scalars::{Either, Optional};
    ///
    /// let described = Optional::Some(2).fold_distinct(|| "nothing", |n| n * 10);
    /// assert_eq!(described, Either::Right(20));
    /// ```
    #[inline]
    pub fn fold_distinct<U, V, E, D>(self, if_empty: E, if_defined: D) -> Either<U, V>
    where
        E: FnOnce() -> U,
        D: FnOnce(T) -> V,
    {
        match self {
            Self::Some(value) => Either::Right(if_defined(value)),
            Self::None => Either::Left(if_empty()),
        }
    }

    /// Returns the payload, or the lazily computed default for `None`.
    #[inline]
    pub fn get_or_else<F>(self, default: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Some(value) => value,
            Self::None => default(),
        }
    }

    /// Returns `self` when defined, otherwise the lazily computed alternative.
    #[inline]
    pub fn or_else<F>(self, alternative: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::Some(_) => self,
            Self::None => alternative(),
        }
    }

    /// Runs `function` for its side effect on `Some` only.
    #[inline]
    pub fn foreach<F>(self, function: F)
    where
        F: FnOnce(T),
    {
        if let Self::Some(value) = self {
            function(value);
        }
    }

    /// `predicate(t)` for `Some(t)`; `false` for `None`.
    #[inline]
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Self::Some(value) => predicate(value),
            Self::None => false,
        }
    }

    /// `predicate(t)` for `Some(t)`; vacuously `true` for `None`.
    #[inline]
    pub fn forall<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Self::Some(value) => predicate(value),
            Self::None => true,
        }
    }

    /// Demotes `Some(t)` to `None` unless `predicate(t)` holds.
    #[inline]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Self::Some(value) => {
                if predicate(&value) {
                    Self::Some(value)
                } else {
                    Self::None
                }
            }
            Self::None => Self::None,
        }
    }

    /// Demotes `Some(t)` to `None` when `predicate(t)` holds.
    #[inline]
    pub fn filter_not<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        self.filter(|value| !predicate(value))
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    /// The payload or the null sentinel (`None`).
    #[inline]
    pub fn or_null(self) -> Option<T> {
        self.into()
    }

    /// A zero- or one-element `Vec`.
    pub fn to_array(self) -> Vec<T> {
        self.into_iter().collect()
    }

    /// Iterates over the zero or one payload.
    pub fn iter(&self) -> std::option::IntoIter<&T> {
        self.as_ref().or_null().into_iter()
    }
}

impl<T: Clone> Optional<T> {
    /// A zero- or one-element persistent list.
    pub fn to_list(&self) -> im::Vector<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Hash + Eq + Clone> Optional<T> {
    /// A zero- or one-element persistent set.
    pub fn to_set(&self) -> im::HashSet<T> {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq + Any> Optional<T> {
    /// Tests the payload against `element` with the registered equality.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scalars::Optional;
    ///
    /// assert!(Optional::Some("a").contains(&"a"));
    /// assert!(!Optional::<&str>::None.contains(&"a"));
    /// ```
    pub fn contains(&self, element: &T) -> bool {
        match self {
            Self::Some(value) => equality::equals(value, element),
            Self::None => false,
        }
    }
}

// =============================================================================
// Equality, Hashing, Debug
// =============================================================================

impl<T: PartialEq + Any> PartialEq for Optional<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Some(left), Self::Some(right)) => equality::equals(left, right),
            (Self::None, Self::None) => true,
            _ => false,
        }
    }
}

impl<T: Eq + Any> Eq for Optional<T> {}

impl<T: Hash + Any> Hash for Optional<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Some(value) => {
                state.write_u8(1);
                state.write_u64(equality::hash_of(value));
            }
            Self::None => state.write_u8(0),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Optional<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Some(value) => formatter.debug_tuple("Some").field(value).finish(),
            Self::None => formatter.write_str("None"),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl<T> From<Option<T>> for Optional<T> {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Some(value),
            None => Self::None,
        }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    #[inline]
    fn from(value: Optional<T>) -> Self {
        match value {
            Optional::Some(value) => Some(value),
            Optional::None => None,
        }
    }
}

impl<T> IntoIterator for Optional<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.or_null().into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Optional<T> {
    type Item = &'a T;
    type IntoIter = std::option::IntoIter<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
