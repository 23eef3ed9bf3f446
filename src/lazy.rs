//! Single-shot memoization.
//!
//! [`Lazily`] wraps a creator function that runs on first demand; the result
//! is cached and the creator is dropped. The creator runs at most once even
//! when several threads race on the first access.
//!
//! # Examples
//!
//! ```rust
//! use scalars::lazy::Lazily;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! static CALLS: AtomicUsize = AtomicUsize::new(0);
//! static GREETING: Lazily<String> = Lazily::new(|| {
//!     CALLS.fetch_add(1, Ordering::SeqCst);
//!     "hello".to_string()
//! });
//!
//! assert_eq!(GREETING.get(), "hello");
//! assert_eq!(GREETING.get(), "hello");
//! assert_eq!(CALLS.load(Ordering::SeqCst), 1);
//! ```

use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

/// A lazily computed, memoized value.
///
/// # Type Parameters
///
/// * `T` - The type of the computed value
/// * `F` - The type of the creator function (defaults to `fn() -> T`, which
///   makes `Lazily` usable in `static` items)
///
/// # Panics
///
/// If the creator panics the panic propagates to the caller of [`get`](Self::get)
/// and the creator is gone; later calls panic as well.
pub struct Lazily<T, F = fn() -> T> {
    value: OnceLock<T>,
    creator: Mutex<Option<F>>,
}

impl<T, F: FnOnce() -> T> Lazily<T, F> {
    /// Creates a memoizer around `creator`. Nothing runs yet.
    #[inline]
    pub const fn new(creator: F) -> Self {
        Self {
            value: OnceLock::new(),
            creator: parking_lot::const_mutex(Some(creator)),
        }
    }

    /// Returns the value, running the creator if this is the first call.
    ///
    /// # Panics
    ///
    /// Panics if a previous call panicked inside the creator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scalars::lazy::Lazily;
    ///
    /// let lazy = Lazily::new(|| 6 * 7);
    /// assert!(!lazy.is_initialized());
    /// assert_eq!(*lazy.get(), 42);
    /// assert!(lazy.is_initialized());
    /// ```
    pub fn get(&self) -> &T {
        self.value.get_or_init(|| {
            let creator = self
                .creator
                .lock()
                .take()
                .expect("Lazily: creator panicked on a previous call");
            creator()
        })
    }

    /// Consumes the memoizer, forcing it if necessary.
    pub fn into_inner(self) -> T {
        let Self { value, creator } = self;
        match value.into_inner() {
            Some(value) => value,
            None => {
                let creator = creator
                    .into_inner()
                    .expect("Lazily: creator panicked on a previous call");
                creator()
            }
        }
    }
}

impl<T, F> Lazily<T, F> {
    /// Returns the value if it has already been computed.
    #[inline]
    pub fn try_get(&self) -> Option<&T> {
        self.value.get()
    }

    /// Returns whether the creator has already produced the value.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.value.get().is_some()
    }

    /// Returns whether the creator reference is still held.
    ///
    /// `false` once the value is cached.
    pub fn holds_creator(&self) -> bool {
        self.creator.lock().is_some()
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Lazily<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => formatter.debug_tuple("Lazily").field(value).finish(),
            None => formatter.write_str("Lazily(<uninit>)"),
        }
    }
}

/// Wraps `creator` into a zero-argument accessor that computes on first call
/// and returns clones of the cached value afterwards.
///
/// # Examples
///
/// ```rust
/// use scalars::lazy::lazily;
///
/// let accessor = lazily(|| vec![1, 2, 3]);
/// assert_eq!(accessor(), vec![1, 2, 3]);
/// assert_eq!(accessor(), vec![1, 2, 3]);
/// ```
pub fn lazily<T, F>(creator: F) -> impl Fn() -> T + Clone
where
    T: Clone,
    F: FnOnce() -> T,
{
    let memo = Arc::new(Lazily::new(creator));
    move || memo.get().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[rstest]
    fn test_creator_is_deferred_until_first_get() {
        let calls = AtomicUsize::new(0);
        let lazy = Lazily::new(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            1
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(*lazy.get(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn test_creator_is_dropped_after_first_get() {
        let lazy = Lazily::new(|| "value");
        assert!(lazy.holds_creator());
        let _ = lazy.get();
        assert!(!lazy.holds_creator());
        assert_eq!(lazy.try_get(), Some(&"value"));
    }

    #[rstest]
    fn test_creator_runs_once_across_threads() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let lazy = Arc::new(Lazily::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            42
        }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let lazy = Arc::clone(&lazy);
                thread::spawn(move || *lazy.get())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn test_accessor_returns_the_cached_value() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let accessor = lazily(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            String::from("cached")
        });
        let copy = accessor.clone();

        assert_eq!(accessor(), "cached");
        assert_eq!(copy(), "cached");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn test_into_inner_forces_uninitialized_value() {
        let lazy = Lazily::new(|| 7);
        assert_eq!(lazy.into_inner(), 7);
    }
}
