//! The error values carried by [`Try`](crate::Try) and [`Future`](crate::Future).
//!
//! Every failure travelling through this crate is an [`Exception`]. The four
//! named kinds mirror the JVM exceptions that Scala code reports contract
//! violations with; [`Exception::Error`] is the generic kind that arbitrary
//! panics are coerced into.
//!
//! # Examples
//!
//! ```rust
//! use scalars::Exception;
//!
//! let error = Exception::no_such_element("empty collection");
//! assert_eq!(error.message(), "NoSuchElementException: empty collection");
//! assert!(matches!(error, Exception::NoSuchElement(_)));
//!
//! let generic = Exception::error("boom");
//! assert_eq!(generic.message(), "boom");
//! ```

use std::any::Any;

use thiserror::Error;

/// An error value carried by `Try`, `Future` and the duration constructors.
///
/// Matching on the variant is how callers discriminate between kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Exception {
    /// An operation that makes no sense for the receiver, e.g. `Success::failed`.
    #[error("UnsupportedOperationException: {0}")]
    UnsupportedOperation(String),
    /// A requested element does not exist, e.g. a rejected `filter`.
    #[error("NoSuchElementException: {0}")]
    NoSuchElement(String),
    /// The receiver is in the wrong state, e.g. completing a promise twice.
    #[error("IllegalStateException: {0}")]
    IllegalState(String),
    /// An argument is outside of its domain, e.g. an oversized duration.
    #[error("IllegalArgumentException: {0}")]
    IllegalArgument(String),
    /// A generic error; coerced panics end up here.
    #[error("{0}")]
    Error(String),
}

const UNKNOWN_PAYLOAD: &str = "unknown panic payload";

impl Exception {
    /// Creates an [`Exception::UnsupportedOperation`].
    pub fn unsupported_operation(message: impl Into<String>) -> Self {
        Self::UnsupportedOperation(message.into())
    }

    /// Creates an [`Exception::NoSuchElement`].
    pub fn no_such_element(message: impl Into<String>) -> Self {
        Self::NoSuchElement(message.into())
    }

    /// Creates an [`Exception::IllegalState`].
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState(message.into())
    }

    /// Creates an [`Exception::IllegalArgument`].
    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::IllegalArgument(message.into())
    }

    /// Creates a generic [`Exception::Error`].
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    /// Returns the full message, including the kind prefix.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Coerces a panic payload into an `Exception`.
    ///
    /// An `Exception` payload is returned unchanged, string payloads become
    /// [`Exception::Error`] with the string as message, and boxed
    /// `std::error::Error`s contribute their `Display` text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scalars::Exception;
    /// use std::panic::catch_unwind;
    ///
    /// let payload = catch_unwind(|| panic!("boom")).unwrap_err();
    /// assert_eq!(Exception::from_panic(payload), Exception::error("boom"));
    /// ```
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<Self>() {
            Ok(exception) => return *exception,
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<String>() {
            Ok(message) => return Self::Error(*message),
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<&'static str>() {
            Ok(message) => return Self::Error((*message).to_string()),
            Err(payload) => payload,
        };
        match payload.downcast::<Box<dyn std::error::Error + Send + Sync>>() {
            Ok(error) => Self::Error(error.to_string()),
            Err(_) => Self::Error(UNKNOWN_PAYLOAD.to_string()),
        }
    }

    /// Coerces an arbitrary value into an `Exception`, like a raised non-error value.
    pub fn from_any<E: Any + Send>(cause: E) -> Self {
        Self::from_panic(Box::new(cause))
    }

    /// Raises this exception as a panic payload.
    ///
    /// A surrounding [`Try::of`](crate::Try::of) or Future combinator recovers
    /// the identical value.
    ///
    /// # Panics
    ///
    /// Always.
    pub fn raise(self) -> ! {
        std::panic::panic_any(self)
    }
}

impl From<Box<dyn Any + Send>> for Exception {
    fn from(payload: Box<dyn Any + Send>) -> Self {
        Self::from_panic(payload)
    }
}
