//! Either type - a value that is one of two types, right-biased.
//!
//! This module provides [`Either<L, R>`], holding exactly one of a `Left(L)`
//! or a `Right(R)`. Its combinators operate on the `Right` arm and pass a
//! `Left` through unchanged; the `Left` arm is reached through
//! [`LeftProjection`], obtained with [`Either::left`].
//!
//! # Examples
//!
//! ```rust
//! use scalars::Either;
//!
//! let parsed: Either<String, i32> = Either::Right(21);
//! assert_eq!(parsed.map(|n| n * 2), Either::Right(42));
//!
//! let failed: Either<String, i32> = Either::Left("not a number".to_string());
//! assert_eq!(failed.clone().map(|n| n * 2), failed);
//!
//! // The left projection maps the other arm.
//! let shouted = failed.left().map(|message| message.to_uppercase());
//! assert_eq!(shouted, Either::Left("NOT A NUMBER".to_string()));
//! ```

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::equality;
use crate::option::Optional;

/// A value that is either `Left(L)` or `Right(R)`.
///
/// By convention `Left` carries failure or the first alternative and
/// `Right` carries success; every combinator is biased to `Right`.
///
/// # Type Parameters
///
/// * `L` - The type of the left value
/// * `R` - The type of the right value
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    /// The left variant, conventionally representing failure.
    Left(L),
    /// The right variant, conventionally representing success.
    Right(R),
}

impl<L, R> Either<L, R> {
    // =========================================================================
    // Type Checking
    // =========================================================================

    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub const fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    /// Returns a reference to the left value if present.
    #[inline]
    pub const fn left_ref(&self) -> Option<&L> {
        match self {
            Self::Left(value) => Some(value),
            Self::Right(_) => None,
        }
    }

    /// Returns a reference to the right value if present.
    #[inline]
    pub const fn right_ref(&self) -> Option<&R> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }

    // =========================================================================
    // Right-biased Combinators
    // =========================================================================

    /// Applies `function` to a right value; a left value passes through.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scalars::Either;
    ///
    /// let right: Either<i32, String> = Either::Right("hello".to_string());
    /// assert_eq!(right.map(|s| s.len()), Either::Right(5));
    /// ```
    #[inline]
    pub fn map<R1, F>(self, function: F) -> Either<L, R1>
    where
        F: FnOnce(R) -> R1,
    {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => Either::Right(function(value)),
        }
    }

    /// Chains a computation on the right value.
    #[inline]
    pub fn flat_map<R1, F>(self, function: F) -> Either<L, R1>
    where
        F: FnOnce(R) -> Either<L, R1>,
    {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => function(value),
        }
    }

    /// Keeps a right value accepted by `predicate`; a rejected one becomes
    /// `Left(zero())`. A left value passes through.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scalars::Either;
    ///
    /// let age: Either<String, u8> = Either::Right(12);
    /// let adult = age.filter_or_else(|age| *age >= 18, || "too young".to_string());
    /// assert_eq!(adult, Either::Left("too young".to_string()));
    /// ```
    #[inline]
    pub fn filter_or_else<P, Z>(self, predicate: P, zero: Z) -> Self
    where
        P: FnOnce(&R) -> bool,
        Z: FnOnce() -> L,
    {
        match self {
            Self::Left(_) => self,
            Self::Right(value) => {
                if predicate(&value) {
                    Self::Right(value)
                } else {
                    Self::Left(zero())
                }
            }
        }
    }

    /// `predicate(r)` for a right value; `false` for a left value.
    #[inline]
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&R) -> bool,
    {
        match self {
            Self::Left(_) => false,
            Self::Right(value) => predicate(value),
        }
    }

    /// `predicate(r)` for a right value; `true` for a left value.
    #[inline]
    pub fn forall<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&R) -> bool,
    {
        match self {
            Self::Left(_) => true,
            Self::Right(value) => predicate(value),
        }
    }

    /// Runs `function` for its side effect on a right value.
    #[inline]
    pub fn foreach<F>(self, function: F)
    where
        F: FnOnce(R),
    {
        if let Self::Right(value) = self {
            function(value);
        }
    }

    /// Eliminates the Either by applying one of two functions.
    #[inline]
    pub fn fold<T, F, G>(self, left_function: F, right_function: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => left_function(value),
            Self::Right(value) => right_function(value),
        }
    }

    /// Returns the right value, or the lazily computed default.
    #[inline]
    pub fn get_or_else<F>(self, default: F) -> R
    where
        F: FnOnce() -> R,
    {
        match self {
            Self::Left(_) => default(),
            Self::Right(value) => value,
        }
    }

    /// Returns `self` when it is a right value, otherwise the lazily computed alternative.
    #[inline]
    pub fn or_else<F>(self, alternative: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::Left(_) => alternative(),
            Self::Right(_) => self,
        }
    }

    /// Swaps the Left and Right variants.
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        match self {
            Self::Left(value) => Either::Right(value),
            Self::Right(value) => Either::Left(value),
        }
    }

    /// Projects onto the left arm.
    #[inline]
    pub const fn left(self) -> LeftProjection<L, R> {
        LeftProjection { either: self }
    }

    // =========================================================================
    // Conversion Operations
    // =========================================================================

    /// `Some(r)` for a right value, `None` for a left value.
    #[inline]
    pub fn to_option(self) -> Optional<R> {
        match self {
            Self::Left(_) => Optional::None,
            Self::Right(value) => Optional::Some(value),
        }
    }

    /// One element for a right value, none for a left value.
    pub fn to_array(self) -> Vec<R> {
        self.to_option().to_array()
    }
}

impl<L, R: Clone> Either<L, R> {
    /// One element for a right value, none for a left value.
    pub fn to_list(&self) -> im::Vector<R> {
        self.right_ref().into_iter().cloned().collect()
    }
}

impl<L, R: Hash + Eq + Clone> Either<L, R> {
    /// One element for a right value, none for a left value.
    pub fn to_set(&self) -> im::HashSet<R> {
        self.right_ref().into_iter().cloned().collect()
    }
}

// =============================================================================
// Left Projection
// =============================================================================

/// The left-biased view of an [`Either`].
///
/// Mirrors the right-biased combinators for the `Left` arm.
///
/// # Examples
///
/// ```rust
/// use scalars::{Either, Optional};
///
/// let left: Either<i32, String> = Either::Left(4);
/// assert!(left.clone().left().exists(|n| *n == 4));
/// assert_eq!(left.left().to_option(), Optional::Some(4));
/// ```
#[derive(Clone, Copy)]
pub struct LeftProjection<L, R> {
    either: Either<L, R>,
}

impl<L, R> LeftProjection<L, R> {
    /// Returns the projected Either.
    #[inline]
    pub fn into_either(self) -> Either<L, R> {
        self.either
    }

    /// Applies `function` to a left value; a right value passes through.
    #[inline]
    pub fn map<L1, F>(self, function: F) -> Either<L1, R>
    where
        F: FnOnce(L) -> L1,
    {
        match self.either {
            Either::Left(value) => Either::Left(function(value)),
            Either::Right(value) => Either::Right(value),
        }
    }

    /// Chains a computation on the left value.
    #[inline]
    pub fn flat_map<L1, F>(self, function: F) -> Either<L1, R>
    where
        F: FnOnce(L) -> Either<L1, R>,
    {
        match self.either {
            Either::Left(value) => function(value),
            Either::Right(value) => Either::Right(value),
        }
    }

    /// `Some(self)` for a left value accepted by `predicate`, `None` otherwise.
    pub fn filter_to_option<P>(self, predicate: P) -> Optional<Either<L, R>>
    where
        P: FnOnce(&L) -> bool,
    {
        match self.either {
            Either::Left(value) => {
                if predicate(&value) {
                    Optional::Some(Either::Left(value))
                } else {
                    Optional::None
                }
            }
            Either::Right(_) => Optional::None,
        }
    }

    /// `predicate(l)` for a left value; `false` for a right value.
    #[inline]
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&L) -> bool,
    {
        self.either.left_ref().is_some_and(predicate)
    }

    /// `predicate(l)` for a left value; `true` for a right value.
    #[inline]
    pub fn forall<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&L) -> bool,
    {
        self.either.left_ref().is_none_or(predicate)
    }

    /// Runs `function` for its side effect on a left value.
    #[inline]
    pub fn foreach<F>(self, function: F)
    where
        F: FnOnce(L),
    {
        if let Either::Left(value) = self.either {
            function(value);
        }
    }

    /// Returns the left value, or the lazily computed default.
    #[inline]
    pub fn get_or_else<F>(self, default: F) -> L
    where
        F: FnOnce() -> L,
    {
        match self.either {
            Either::Left(value) => value,
            Either::Right(_) => default(),
        }
    }

    /// `Some(l)` for a left value, `None` for a right value.
    #[inline]
    pub fn to_option(self) -> Optional<L> {
        self.either.swap().to_option()
    }

    /// One element for a left value, none for a right value.
    pub fn to_array(self) -> Vec<L> {
        self.to_option().to_array()
    }
}

impl<L: Clone, R> LeftProjection<L, R> {
    /// One element for a left value, none for a right value.
    pub fn to_list(&self) -> im::Vector<L> {
        self.either.left_ref().into_iter().cloned().collect()
    }
}

impl<L: Hash + Eq + Clone, R> LeftProjection<L, R> {
    /// One element for a left value, none for a right value.
    pub fn to_set(&self) -> im::HashSet<L> {
        self.either.left_ref().into_iter().cloned().collect()
    }
}

impl<L: PartialEq + Any, R: PartialEq + Any> PartialEq for LeftProjection<L, R> {
    fn eq(&self, other: &Self) -> bool {
        self.either == other.either
    }
}

impl<L: Eq + Any, R: Eq + Any> Eq for LeftProjection<L, R> {}

impl<L: Hash + Any, R: Hash + Any> Hash for LeftProjection<L, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.either.hash(state);
    }
}

impl<L: fmt::Debug, R: fmt::Debug> fmt::Debug for LeftProjection<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("LeftProjection")
            .field(&self.either)
            .finish()
    }
}

// =============================================================================
// Equality, Hashing, Debug
// =============================================================================

impl<L: PartialEq + Any, R: PartialEq + Any> PartialEq for Either<L, R> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Left(left), Self::Left(right)) => equality::equals(left, right),
            (Self::Right(left), Self::Right(right)) => equality::equals(left, right),
            _ => false,
        }
    }
}

impl<L: Eq + Any, R: Eq + Any> Eq for Either<L, R> {}

impl<L: Hash + Any, R: Hash + Any> Hash for Either<L, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Left(value) => {
                state.write_u8(0);
                state.write_u64(equality::hash_of(value));
            }
            Self::Right(value) => {
                state.write_u8(1);
                state.write_u64(equality::hash_of(value));
            }
        }
    }
}

impl<L: fmt::Debug, R: fmt::Debug> fmt::Debug for Either<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left(value) => formatter.debug_tuple("Left").field(value).finish(),
            Self::Right(value) => formatter.debug_tuple("Right").field(value).finish(),
        }
    }
}

// =============================================================================
// From Implementations
// =============================================================================

impl<L, R> From<Result<R, L>> for Either<L, R> {
    /// `Ok(r)` becomes `Right(r)`, and `Err(e)` becomes `Left(e)`.
    #[inline]
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(value) => Self::Right(value),
            Err(error) => Self::Left(error),
        }
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    /// `Right(r)` becomes `Ok(r)`, and `Left(l)` becomes `Err(l)`.
    #[inline]
    fn from(either: Either<L, R>) -> Self {
        match either {
            Either::Left(value) => Err(value),
            Either::Right(value) => Ok(value),
        }
    }
}
