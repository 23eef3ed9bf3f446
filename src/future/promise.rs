use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::{Future, Shared};
use crate::attempt::Try;
use crate::exceptions::Exception;

/// The write side of an eventual value.
///
/// A promise is completed at most once. The `try_*` operations report a lost
/// race with `false`; the others treat a second completion as a caller bug
/// and return `IllegalState`.
///
/// # Examples
///
/// ```rust
/// use scalars::future::PromiseF;
/// use scalars::Exception;
///
/// let promise = PromiseF::new();
/// assert!(promise.try_success(1));
/// assert!(!promise.try_success(2));
/// assert_eq!(
///     promise.success(3).unwrap_err(),
///     Exception::illegal_state("Promise already completed.")
/// );
/// ```
pub struct PromiseF<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for PromiseF<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + 'static> Default for PromiseF<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> PromiseF<T> {
    /// Creates a pending promise.
    pub fn new() -> Self {
        Self {
            shared: Shared::pending(),
        }
    }

    pub(crate) fn from_try(result: Try<T>) -> Self {
        Self {
            shared: Shared::completed(result),
        }
    }

    /// The read side of this promise.
    pub fn future(&self) -> Future<T> {
        Future::from_shared(Arc::clone(&self.shared))
    }

    /// Returns `true` once completed.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.shared.is_completed()
    }

    /// Completes with `result` unless already completed; returns whether
    /// this call won.
    pub fn try_complete(&self, result: Try<T>) -> bool {
        self.shared.try_complete(result)
    }

    /// Completes with `result`.
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if the promise was already completed; the
    /// stored result is left untouched.
    pub fn complete(&self, result: Try<T>) -> Result<&Self, Exception> {
        if self.try_complete(result) {
            Ok(self)
        } else {
            tracing::debug!("rejected second completion of a promise");
            Err(Exception::illegal_state("Promise already completed."))
        }
    }

    /// Completes with a value.
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if the promise was already completed.
    pub fn success(&self, value: T) -> Result<&Self, Exception> {
        self.complete(Try::Success(value))
    }

    /// Completes with an exception.
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if the promise was already completed.
    pub fn failure(&self, exception: Exception) -> Result<&Self, Exception> {
        self.complete(Try::Failure(exception))
    }

    /// Completes with an arbitrary raised value, coerced into an [`Exception`].
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if the promise was already completed.
    pub fn failure_any<E: Any + Send>(&self, cause: E) -> Result<&Self, Exception> {
        self.complete(Try::failure_any(cause))
    }

    /// Completes with a value unless already completed.
    pub fn try_success(&self, value: T) -> bool {
        self.try_complete(Try::Success(value))
    }

    /// Completes with an exception unless already completed.
    pub fn try_failure(&self, exception: Exception) -> bool {
        self.try_complete(Try::Failure(exception))
    }

    /// Completes this promise with `other`'s result once it is available.
    ///
    /// Completing a promise with its own future is a no-op.
    pub fn complete_with(&self, other: &Future<T>) -> &Self {
        if !Arc::ptr_eq(&self.shared, &other.shared) {
            let promise = self.clone();
            other.on_complete(move |result| {
                promise.try_complete(result);
            });
        }
        self
    }
}

impl<T: fmt::Debug> fmt::Debug for PromiseF<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let future = Future::from_shared(Arc::clone(&self.shared));
        formatter.debug_tuple("PromiseF").field(&future).finish()
    }
}
