//! Future and PromiseF - the read and write sides of one eventual value.
//!
//! A [`PromiseF<T>`] is completed at most once with a [`Try<T>`]; every
//! [`Future<T>`] obtained from it observes that completion. Both handles
//! share one state cell, `Pending(observers)` or `Done(Try<T>)`, guarded by
//! a mutex, so completion is atomic across threads.
//!
//! Combinators never block. They register an observer on the receiver and
//! complete a fresh promise from it; a panic raised inside a user callback
//! becomes the failure of the resulting future.
//!
//! `Future<T>` also implements [`std::future::Future`] with
//! `Output = Result<T, Exception>`, so it can be `.await`ed on any executor.
//!
//! # Examples
//!
//! ```rust
//! use scalars::future::{PromiseF, successful_future};
//! use scalars::{Optional, Try};
//!
//! let promise = PromiseF::new();
//! let doubled = promise.future().map(|n: i32| n * 2);
//! assert!(!doubled.is_completed());
//!
//! promise.success(21).unwrap();
//! assert_eq!(doubled.value(), Optional::Some(Try::Success(42)));
//!
//! let zipped = successful_future(1).zip(&successful_future("one"));
//! assert_eq!(zipped.value(), Optional::Some(Try::Success((1, "one"))));
//! ```

mod combinators;
mod promise;

#[cfg(feature = "async")]
mod bridge;
#[cfg(feature = "async")]
pub mod runtime;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

use parking_lot::Mutex;
use smallvec::SmallVec;

use crate::attempt::Try;
use crate::exceptions::Exception;
use crate::option::Optional;

#[cfg(feature = "async")]
pub use bridge::future_from_promise;
pub use combinators::{
    failed_future, failed_promise, find_future, first_completed_of, fold_futures_left,
    future_from_try, future_never, future_unit, new_future, new_promise, promise_from_try,
    reduce_futures_left, sequence_futures, successful_future, successful_promise,
    traverse_futures,
};
pub use promise::PromiseF;

type Callback<T> = Box<dyn FnOnce(Try<T>) + Send>;

enum State<T> {
    Pending {
        callbacks: SmallVec<[Callback<T>; 2]>,
        wakers: SmallVec<[(usize, Waker); 1]>,
        next_waiter: usize,
    },
    Done(Try<T>),
}

/// The cell both handles point at.
struct Shared<T> {
    state: Mutex<State<T>>,
}

impl<T> Shared<T> {
    fn pending() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State::Pending {
                callbacks: SmallVec::new(),
                wakers: SmallVec::new(),
                next_waiter: 0,
            }),
        })
    }

    fn completed(result: Try<T>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State::Done(result)),
        })
    }

    fn is_completed(&self) -> bool {
        matches!(*self.state.lock(), State::Done(_))
    }
}

impl<T: Clone + 'static> Shared<T> {
    /// Transitions to `Done`; returns `false` if already completed.
    ///
    /// Observers run after the lock is released, on the completing thread.
    fn try_complete(&self, result: Try<T>) -> bool {
        let mut state = self.state.lock();
        if matches!(*state, State::Done(_)) {
            return false;
        }
        let State::Pending {
            callbacks, wakers, ..
        } =
            std::mem::replace(&mut *state, State::Done(result.clone()))
        else {
            return false;
        };
        drop(state);

        for (_, waker) in wakers {
            waker.wake();
        }
        for callback in callbacks {
            dispatch(callback, result.clone());
        }
        true
    }

    fn register(&self, callback: Callback<T>) {
        let mut state = self.state.lock();
        match &mut *state {
            State::Pending { callbacks, .. } => callbacks.push(callback),
            State::Done(result) => {
                let result = result.clone();
                drop(state);
                dispatch(callback, result);
            }
        }
    }

    fn value(&self) -> Optional<Try<T>> {
        match &*self.state.lock() {
            State::Pending { .. } => Optional::None,
            State::Done(result) => Optional::Some(result.clone()),
        }
    }
}

/// An observer bound to its result, waiting in the batch.
type Task = Box<dyn FnOnce()>;

thread_local! {
    /// Observers scheduled while this thread is already draining.
    static BATCH: RefCell<Option<VecDeque<Task>>> = const { RefCell::new(None) };
}

/// Runs one observer, or queues it when this thread is already running
/// observers.
///
/// The first dispatch on a thread drains the batch in a loop, so an observer
/// that completes another promise never nests the next observer on the stack.
/// A chain of any length completes in constant stack depth.
fn dispatch<T: 'static>(callback: Callback<T>, result: Try<T>) {
    let task: Task = Box::new(move || run_observer(callback, result));
    let task = BATCH.with(|batch| match batch.borrow_mut().as_mut() {
        Some(queue) => {
            queue.push_back(task);
            None
        }
        None => Some(task),
    });
    let Some(task) = task else {
        return;
    };

    BATCH.with(|batch| *batch.borrow_mut() = Some(VecDeque::new()));
    let _drainer = Drainer;
    let mut next = Some(task);
    while let Some(task) = next {
        task();
        next = BATCH.with(|batch| batch.borrow_mut().as_mut().and_then(VecDeque::pop_front));
    }
}

/// Closes the batch when the draining dispatch returns.
struct Drainer;

impl Drop for Drainer {
    fn drop(&mut self) {
        let _ = BATCH.try_with(|batch| batch.borrow_mut().take());
    }
}

/// Runs one observer; a panic is logged and contained.
fn run_observer<T>(callback: Callback<T>, result: Try<T>) {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(move || callback(result))) {
        tracing::warn!(
            error = %Exception::from_panic(payload),
            "future observer panicked"
        );
    }
}

// =============================================================================
// Future
// =============================================================================

/// The read side of an eventual value.
///
/// Cloning a `Future` yields another handle on the same state; equality and
/// hashing follow that identity, not the value.
pub struct Future<T> {
    shared: Arc<Shared<T>>,
    /// The slot this handle's waker occupies while it is being awaited.
    waiter: Option<usize>,
}

impl<T> Clone for Future<T> {
    fn clone(&self) -> Self {
        Self::from_shared(Arc::clone(&self.shared))
    }
}

impl<T> Drop for Future<T> {
    fn drop(&mut self) {
        if let Some(id) = self.waiter
            && let State::Pending { wakers, .. } = &mut *self.shared.state.lock()
        {
            wakers.retain(|(slot, _)| *slot != id);
        }
    }
}

impl<T> Future<T> {
    const fn from_shared(shared: Arc<Shared<T>>) -> Self {
        Self {
            shared,
            waiter: None,
        }
    }

    /// Returns `true` once a value or an exception has been stored.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.shared.is_completed()
    }
}

impl<T: Clone + Send + 'static> Future<T> {
    pub(crate) fn from_try(result: Try<T>) -> Self {
        Self::from_shared(Shared::completed(result))
    }

    /// The stored result, or `None` while pending.
    pub fn value(&self) -> Optional<Try<T>> {
        self.shared.value()
    }

    /// Registers `callback` to run exactly once with the result.
    ///
    /// Runs before this call returns when the future is already completed,
    /// after any observers already running on this thread. A panicking
    /// callback is logged and does not affect other observers.
    pub fn on_complete<F>(&self, callback: F)
    where
        F: FnOnce(Try<T>) + Send + 'static,
    {
        self.shared.register(Box::new(callback));
    }

    /// Runs `function` on a successful result only.
    pub fn foreach<F>(&self, function: F)
    where
        F: FnOnce(T) + Send + 'static,
    {
        self.on_complete(move |result| result.foreach(function));
    }

    /// Builds a future completed from this one's result by `step`.
    fn derive<S, F>(&self, step: F) -> Future<S>
    where
        S: Clone + Send + 'static,
        F: FnOnce(Try<T>, &PromiseF<S>) + Send + 'static,
    {
        let promise = PromiseF::new();
        let future = promise.future();
        self.on_complete(move |result| step(result, &promise));
        future
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    /// Maps a successful value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scalars::future::successful_future;
    /// use scalars::{Exception, Optional, Try};
    ///
    /// let future = successful_future(2).map(|n| -> i32 { if n > 1 { panic!("too big") } else { n } });
    /// assert_eq!(future.value(), Optional::Some(Try::Failure(Exception::error("too big"))));
    /// ```
    pub fn map<S, F>(&self, function: F) -> Future<S>
    where
        S: Clone + Send + 'static,
        F: FnOnce(T) -> S + Send + 'static,
    {
        self.derive(move |result, promise| {
            promise.try_complete(result.map(function));
        })
    }

    /// Chains an asynchronous computation; its failure propagates.
    pub fn flat_map<S, F>(&self, function: F) -> Future<S>
    where
        S: Clone + Send + 'static,
        F: FnOnce(T) -> Future<S> + Send + 'static,
    {
        self.derive(move |result, promise| match result.map(function) {
            Try::Success(next) => {
                promise.complete_with(&next);
            }
            Try::Failure(exception) => {
                promise.try_failure(exception);
            }
        })
    }

    /// Fails with `NoSuchElement` when `predicate` rejects the value.
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool + Send + 'static,
    {
        self.derive(move |result, promise| {
            promise.try_complete(result.flat_map(|value| {
                if predicate(&value) {
                    Try::Success(value)
                } else {
                    Try::Failure(Exception::no_such_element(
                        "Future.filter predicate is not satisfied",
                    ))
                }
            }));
        })
    }

    /// Redescribes the value type through `From`.
    pub fn map_to<S>(&self) -> Future<S>
    where
        S: From<T> + Clone + Send + 'static,
    {
        self.map(S::from)
    }

    /// Recovers a failure with a value computed from the exception.
    pub fn recover<F>(&self, function: F) -> Self
    where
        F: FnOnce(Exception) -> T + Send + 'static,
    {
        self.derive(move |result, promise| {
            promise.try_complete(result.recover(function));
        })
    }

    /// Recovers a failure with another future.
    pub fn recover_with<F>(&self, function: F) -> Self
    where
        F: FnOnce(Exception) -> Self + Send + 'static,
    {
        self.derive(move |result, promise| match result {
            Try::Success(value) => {
                promise.try_success(value);
            }
            Try::Failure(exception) => match Try::of(|| function(exception)) {
                Try::Success(next) => {
                    promise.complete_with(&next);
                }
                Try::Failure(raised) => {
                    promise.try_failure(raised);
                }
            },
        })
    }

    /// Inverts the future: a failure becomes a success carrying the exception,
    /// a success becomes a `NoSuchElement` failure.
    pub fn failed(&self) -> Future<Exception> {
        self.derive(|result, promise| {
            promise.try_complete(match result {
                Try::Success(_) => Try::Failure(Exception::no_such_element(
                    "Future.failed not completed with a throwable.",
                )),
                Try::Failure(exception) => Try::Success(exception),
            });
        })
    }

    /// Uses `that` when this future fails; if both fail, this future's
    /// exception is kept.
    pub fn fallback_to(&self, that: &Self) -> Self {
        let that = that.clone();
        self.derive(move |result, promise| match result {
            Try::Success(value) => {
                promise.try_success(value);
            }
            Try::Failure(exception) => {
                let promise = promise.clone();
                that.on_complete(move |fallback| {
                    promise.try_complete(fallback.recover_with(|_| Try::Failure(exception)));
                });
            }
        })
    }

    /// Maps the success and failure paths separately.
    ///
    /// A panic in either function becomes the resulting failure.
    pub fn transform<S, F, G>(&self, if_success: F, if_failure: G) -> Future<S>
    where
        S: Clone + Send + 'static,
        F: FnOnce(T) -> S + Send + 'static,
        G: FnOnce(Exception) -> Exception + Send + 'static,
    {
        self.derive(move |result, promise| {
            promise.try_complete(match result {
                Try::Success(value) => Try::of(|| if_success(value)),
                Try::Failure(exception) => match Try::of(|| if_failure(exception)) {
                    Try::Success(mapped) | Try::Failure(mapped) => Try::Failure(mapped),
                },
            });
        })
    }

    /// Maps the whole result with a single `Try -> Try` function.
    pub fn transform_try<S, F>(&self, function: F) -> Future<S>
    where
        S: Clone + Send + 'static,
        F: FnOnce(Try<T>) -> Try<S> + Send + 'static,
    {
        self.derive(move |result, promise| {
            promise.try_complete(Try::of(|| function(result)).flatten());
        })
    }

    /// Maps the whole result to another future.
    pub fn transform_with<S, F>(&self, function: F) -> Future<S>
    where
        S: Clone + Send + 'static,
        F: FnOnce(Try<T>) -> Future<S> + Send + 'static,
    {
        self.derive(move |result, promise| match Try::of(|| function(result)) {
            Try::Success(next) => {
                promise.complete_with(&next);
            }
            Try::Failure(exception) => {
                promise.try_failure(exception);
            }
        })
    }

    /// Pairs both values; fails if either side fails.
    pub fn zip<U>(&self, that: &Future<U>) -> Future<(T, U)>
    where
        U: Clone + Send + 'static,
    {
        self.zip_with(that, |left, right| (left, right))
    }

    /// Combines both values with `function`; fails if either side fails.
    pub fn zip_with<U, R, F>(&self, that: &Future<U>, function: F) -> Future<R>
    where
        U: Clone + Send + 'static,
        R: Clone + Send + 'static,
        F: FnOnce(T, U) -> R + Send + 'static,
    {
        let that = that.clone();
        self.flat_map(move |left| that.map(move |right| function(left, right)))
    }
}

impl<T: Clone + Send + 'static> std::future::Future for Future<T> {
    type Output = Result<T, Exception>;

    /// Each handle keeps at most one waker; a re-poll replaces it.
    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let mut state = this.shared.state.lock();
        match &mut *state {
            State::Done(result) => Poll::Ready(result.clone().into_result()),
            State::Pending {
                wakers,
                next_waiter,
                ..
            } => {
                let waker = context.waker();
                let stored = this
                    .waiter
                    .and_then(|id| wakers.iter_mut().find(|(slot, _)| *slot == id));
                match stored {
                    Some((_, stored)) => {
                        if !stored.will_wake(waker) {
                            stored.clone_from(waker);
                        }
                    }
                    None => {
                        let id = *next_waiter;
                        *next_waiter += 1;
                        wakers.push((id, waker.clone()));
                        this.waiter = Some(id);
                    }
                }
                Poll::Pending
            }
        }
    }
}

impl<T> PartialEq for Future<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<T> Eq for Future<T> {}

impl<T> Hash for Future<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.shared).hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Future<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.shared.state.lock() {
            State::Pending { .. } => formatter.write_str("Future(<not completed>)"),
            State::Done(result) => formatter.debug_tuple("Future").field(result).finish(),
        }
    }
}

static_assertions::assert_impl_all!(Future<i32>: Send, Sync, Clone, Unpin);
static_assertions::assert_impl_all!(PromiseF<String>: Send, Sync, Clone);
