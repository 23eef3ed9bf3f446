//! Try - a computation that either produced a value or raised.
//!
//! [`Try<T>`] is `Success(T)` or `Failure(Exception)`. [`Try::of`] runs a
//! closure and captures any panic it raises as a `Failure`; the combinators
//! below catch panics raised by their own callbacks the same way, so errors
//! travel as values until [`Try::get`] re-raises them.
//!
//! # Examples
//!
//! ```rust
//! use scalars::{Exception, Try};
//!
//! let parsed = Try::of(|| "42".parse::<i32>().unwrap());
//! assert_eq!(parsed.map(|n| n + 1), Try::Success(43));
//!
//! let broken = Try::of(|| -> i32 { panic!("boom") });
//! assert_eq!(broken.failed().get(), Exception::error("boom"));
//! ```

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::either::Either;
use crate::equality;
use crate::exceptions::Exception;
use crate::option::Optional;

/// The outcome of a computation that may have raised.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Try<T> {
    /// The computation produced a value.
    Success(T),
    /// The computation raised.
    Failure(Exception),
}

impl<T> Try<T> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Runs `thunk`, capturing a panic as a `Failure`.
    ///
    /// The panic payload is coerced with [`Exception::from_panic`].
    pub fn of<F>(thunk: F) -> Self
    where
        F: FnOnce() -> T,
    {
        match catch_unwind(AssertUnwindSafe(thunk)) {
            Ok(value) => Self::Success(value),
            Err(payload) => Self::Failure(Exception::from_panic(payload)),
        }
    }

    /// Wraps a value.
    #[inline]
    pub const fn success(value: T) -> Self {
        Self::Success(value)
    }

    /// Wraps an exception.
    #[inline]
    pub const fn failure(exception: Exception) -> Self {
        Self::Failure(exception)
    }

    /// Wraps an arbitrary raised value, coercing it into an [`Exception`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scalars::{Exception, Try};
    ///
    /// let failure: Try<()> = Try::failure_any("disk full");
    /// assert_eq!(failure, Try::Failure(Exception::error("disk full")));
    /// ```
    pub fn failure_any<E: Any + Send>(cause: E) -> Self {
        Self::Failure(Exception::from_any(cause))
    }

    // =========================================================================
    // Type Checking
    // =========================================================================

    /// Returns `true` for `Success`.
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for `Failure`.
    #[inline]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Borrows the value.
    pub fn as_ref(&self) -> Try<&T> {
        match self {
            Self::Success(value) => Try::Success(value),
            Self::Failure(exception) => Try::Failure(exception.clone()),
        }
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    /// Applies `function` to a success; a panic in `function` becomes a `Failure`.
    pub fn map<U, F>(self, function: F) -> Try<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(value) => Try::of(|| function(value)),
            Self::Failure(exception) => Try::Failure(exception),
        }
    }

    /// Chains a computation that itself may fail; a panic in `function`
    /// becomes a `Failure`.
    pub fn flat_map<U, F>(self, function: F) -> Try<U>
    where
        F: FnOnce(T) -> Try<U>,
    {
        match self {
            Self::Success(value) => Try::of(|| function(value)).flatten(),
            Self::Failure(exception) => Try::Failure(exception),
        }
    }

    /// Recovers a failure with a value computed from the exception.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scalars::{Exception, Try};
    ///
    /// let failure: Try<usize> = Try::failure(Exception::error("offline"));
    /// assert_eq!(failure.recover(|exception| exception.message().len()), Try::Success(7));
    /// ```
    pub fn recover<F>(self, function: F) -> Self
    where
        F: FnOnce(Exception) -> T,
    {
        match self {
            Self::Success(_) => self,
            Self::Failure(exception) => Self::of(|| function(exception)),
        }
    }

    /// Recovers a failure with another `Try`.
    pub fn recover_with<F>(self, function: F) -> Self
    where
        F: FnOnce(Exception) -> Self,
    {
        match self {
            Self::Success(_) => self,
            Self::Failure(exception) => Try::of(|| function(exception)).flatten(),
        }
    }

    /// Returns `self` on success, otherwise the lazily computed alternative.
    pub fn or_else<F>(self, alternative: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::Success(_) => self,
            Self::Failure(_) => Try::of(alternative).flatten(),
        }
    }

    /// Eliminates the `Try`.
    ///
    /// Equivalent to `self.map(if_success).recover(if_failure).get()`: when
    /// `if_success` panics, `if_failure` runs on that exception. A panic in
    /// `if_failure` propagates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scalars::Try;
    ///
    /// let folded = Try::Success(42).fold(
    ///     |exception| format!("{}{}", exception.message(), exception.message().len()),
    ///     |value| -> String { panic!("{value}") },
    /// );
    /// assert_eq!(folded, "422");
    /// ```
    pub fn fold<U, E, S>(self, if_failure: E, if_success: S) -> U
    where
        E: FnOnce(Exception) -> U,
        S: FnOnce(T) -> U,
    {
        match self.map(if_success) {
            Try::Success(value) => value,
            Try::Failure(exception) => if_failure(exception),
        }
    }

    /// Returns the value.
    ///
    /// # Panics
    ///
    /// Re-raises the stored exception on `Failure`; an enclosing [`Try::of`]
    /// recovers the identical exception.
    pub fn get(self) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(exception) => exception.raise(),
        }
    }

    /// Returns the value, or the lazily computed default on failure.
    #[inline]
    pub fn get_or_else<F>(self, default: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Success(value) => value,
            Self::Failure(_) => default(),
        }
    }

    /// Inverts the `Try`: a failure becomes a success carrying its exception.
    pub fn failed(self) -> Try<Exception> {
        match self {
            Self::Success(_) => Try::Failure(Exception::unsupported_operation("Success.failed")),
            Self::Failure(exception) => Try::Success(exception),
        }
    }

    /// Runs `function` on a success.
    ///
    /// # Panics
    ///
    /// A panic raised by `function` propagates to the caller.
    pub fn foreach<F>(self, function: F)
    where
        F: FnOnce(T),
    {
        if let Self::Success(value) = self {
            function(value);
        }
    }

    /// Applies `if_success` or `if_failure`; a panic in either becomes a `Failure`.
    pub fn transform<U, S, E>(self, if_success: S, if_failure: E) -> Try<U>
    where
        S: FnOnce(T) -> Try<U>,
        E: FnOnce(Exception) -> Try<U>,
    {
        match self {
            Self::Success(value) => Try::of(|| if_success(value)).flatten(),
            Self::Failure(exception) => Try::of(|| if_failure(exception)).flatten(),
        }
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    /// `Some` on success, `None` on failure.
    pub fn to_option(self) -> Optional<T> {
        match self {
            Self::Success(value) => Optional::Some(value),
            Self::Failure(_) => Optional::None,
        }
    }

    /// `Right` on success, `Left` on failure.
    pub fn to_either(self) -> Either<Exception, T> {
        match self {
            Self::Success(value) => Either::Right(value),
            Self::Failure(exception) => Either::Left(exception),
        }
    }

    /// The value as a nullable, dropping the exception.
    pub fn to_undef_or(self) -> Option<T> {
        self.into_result().ok()
    }

    /// Converts into a standard `Result`.
    #[inline]
    pub fn into_result(self) -> Result<T, Exception> {
        self.into()
    }
}

impl<T> Try<T> {
    /// Keeps a success accepted by `predicate`.
    ///
    /// A rejected value becomes a `NoSuchElement` failure; a panicking
    /// predicate becomes a `Failure` carrying its exception. The value itself
    /// is not rendered, so `T` needs no `Debug`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scalars::{Exception, Try};
    ///
    /// let rejected = Try::Success(3).filter(|n| n % 2 == 0);
    /// assert_eq!(
    ///     rejected,
    ///     Try::Failure(Exception::no_such_element("Predicate does not hold"))
    /// );
    /// ```
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Self::Success(value) => match catch_unwind(AssertUnwindSafe(|| predicate(&value))) {
                Ok(true) => Self::Success(value),
                Ok(false) => {
                    Self::Failure(Exception::no_such_element("Predicate does not hold"))
                }
                Err(payload) => Self::Failure(Exception::from_panic(payload)),
            },
            Self::Failure(_) => self,
        }
    }
}

impl<T> Try<Try<T>> {
    /// Removes one level of nesting.
    #[inline]
    pub fn flatten(self) -> Try<T> {
        match self {
            Self::Success(inner) => inner,
            Self::Failure(exception) => Try::Failure(exception),
        }
    }
}

// =============================================================================
// Equality, Hashing, Debug
// =============================================================================

impl<T: PartialEq + Any> PartialEq for Try<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Success(left), Self::Success(right)) => equality::equals(left, right),
            (Self::Failure(left), Self::Failure(right)) => equality::equals(left, right),
            _ => false,
        }
    }
}

impl<T: Eq + Any> Eq for Try<T> {}

impl<T: Hash + Any> Hash for Try<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Success(value) => {
                state.write_u8(1);
                state.write_u64(equality::hash_of(value));
            }
            Self::Failure(exception) => {
                state.write_u8(0);
                state.write_u64(equality::hash_of(exception));
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Try<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(value) => formatter.debug_tuple("Success").field(value).finish(),
            Self::Failure(exception) => formatter.debug_tuple("Failure").field(exception).finish(),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl<T> From<Result<T, Exception>> for Try<T> {
    fn from(result: Result<T, Exception>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(exception) => Self::Failure(exception),
        }
    }
}

impl<T> From<Try<T>> for Result<T, Exception> {
    fn from(attempt: Try<T>) -> Self {
        match attempt {
            Try::Success(value) => Ok(value),
            Try::Failure(exception) => Err(exception),
        }
    }
}
