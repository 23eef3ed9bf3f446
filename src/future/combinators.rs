//! Constructors and combinators over collections of futures.
//!
//! `sequence_futures`, `traverse_futures`, `fold_futures_left` and
//! `reduce_futures_left` walk their inputs in order and only look at the next
//! future once the previous one has resolved. Already completed inputs are
//! consumed in a loop, so long chains of ready futures do not grow the stack.
//! `first_completed_of` and `find_future` observe all inputs at once.

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Future, PromiseF};
use crate::attempt::Try;
use crate::exceptions::Exception;
use crate::lazy::Lazily;
use crate::option::Optional;

// =============================================================================
// Constructors
// =============================================================================

/// A future already completed with `value`.
pub fn successful_future<T: Clone + Send + 'static>(value: T) -> Future<T> {
    Future::from_try(Try::Success(value))
}

/// A future already failed with `exception`.
pub fn failed_future<T: Clone + Send + 'static>(exception: Exception) -> Future<T> {
    Future::from_try(Try::Failure(exception))
}

/// Runs `body` now and wraps its outcome; a panic becomes the failure.
///
/// # Examples
///
/// ```rust
/// use scalars::future::new_future;
/// use scalars::{Exception, Optional, Try};
///
/// let future = new_future(|| -> u8 { panic!("boom") });
/// assert_eq!(future.value(), Optional::Some(Try::Failure(Exception::error("boom"))));
/// ```
pub fn new_future<T, F>(body: F) -> Future<T>
where
    T: Clone + Send + 'static,
    F: FnOnce() -> T,
{
    future_from_try(Try::of(body))
}

/// A future already completed with `result`.
pub fn future_from_try<T: Clone + Send + 'static>(result: Try<T>) -> Future<T> {
    Future::from_try(result)
}

/// A pending promise.
pub fn new_promise<T: Clone + Send + 'static>() -> PromiseF<T> {
    PromiseF::new()
}

/// A promise already completed with `value`.
pub fn successful_promise<T: Clone + Send + 'static>(value: T) -> PromiseF<T> {
    PromiseF::from_try(Try::Success(value))
}

/// A promise already failed with `cause`, coerced into an [`Exception`].
pub fn failed_promise<T, E>(cause: E) -> PromiseF<T>
where
    T: Clone + Send + 'static,
    E: Any + Send,
{
    PromiseF::from_try(Try::failure_any(cause))
}

/// A promise already completed with `result`.
pub fn promise_from_try<T: Clone + Send + 'static>(result: Try<T>) -> PromiseF<T> {
    PromiseF::from_try(result)
}

static UNIT: Lazily<Future<()>> = Lazily::new(|| successful_future(()));

/// The shared, already completed unit future.
pub fn future_unit() -> Future<()> {
    UNIT.get().clone()
}

/// A future that never completes.
pub fn future_never<T: Clone + Send + 'static>() -> Future<T> {
    PromiseF::new().future()
}

// =============================================================================
// Sequential combinators
// =============================================================================

/// Collects all values in input order; the first failure in input order
/// fails the result.
///
/// # Examples
///
/// ```rust
/// use scalars::future::{failed_future, sequence_futures, successful_future};
/// use scalars::{Exception, Optional, Try};
///
/// let all = sequence_futures([successful_future(1), successful_future(2), successful_future(3)]);
/// assert_eq!(all.value(), Optional::Some(Try::Success(vec![1, 2, 3])));
///
/// let broken = sequence_futures([
///     successful_future(1),
///     failed_future(Exception::error("x")),
///     successful_future(3),
/// ]);
/// assert_eq!(broken.value(), Optional::Some(Try::Failure(Exception::error("x"))));
/// ```
pub fn sequence_futures<T, I>(futures: I) -> Future<Vec<T>>
where
    T: Clone + Send + 'static,
    I: IntoIterator<Item = Future<T>>,
{
    fold_futures_left(futures, Vec::new(), |mut values, value| {
        values.push(value);
        values
    })
}

/// Maps every item to a future with `function` and collects the values.
///
/// The future for an item is only requested once the previous one has
/// succeeded; a failure stops the walk.
pub fn traverse_futures<A, B, I, F>(items: I, function: F) -> Future<Vec<B>>
where
    A: Send + 'static,
    B: Clone + Send + 'static,
    I: IntoIterator<Item = A>,
    F: FnMut(A) -> Future<B> + Send + 'static,
{
    let items: Vec<A> = items.into_iter().collect();
    let promise = PromiseF::new();
    let future = promise.future();
    let capacity = items.len();
    traverse_from(items.into_iter(), Vec::with_capacity(capacity), function, promise);
    future
}

fn traverse_from<A, B, F>(
    mut items: std::vec::IntoIter<A>,
    mut values: Vec<B>,
    mut function: F,
    promise: PromiseF<Vec<B>>,
) where
    A: Send + 'static,
    B: Clone + Send + 'static,
    F: FnMut(A) -> Future<B> + Send + 'static,
{
    while let Some(item) = items.next() {
        let next = match Try::of(|| function(item)) {
            Try::Success(next) => next,
            Try::Failure(exception) => {
                promise.try_failure(exception);
                return;
            }
        };
        match next.value() {
            Optional::Some(Try::Success(value)) => values.push(value),
            Optional::Some(Try::Failure(exception)) => {
                promise.try_failure(exception);
                return;
            }
            Optional::None => {
                next.on_complete(move |result| match result {
                    Try::Success(value) => {
                        values.push(value);
                        traverse_from(items, values, function, promise);
                    }
                    Try::Failure(exception) => {
                        promise.try_failure(exception);
                    }
                });
                return;
            }
        }
    }
    promise.try_success(values);
}

/// Left fold over the values in input order, seeded with `zero`.
///
/// Short-circuits on the first failure; a panic in `operation` fails the
/// result.
pub fn fold_futures_left<T, R, I, F>(futures: I, zero: R, operation: F) -> Future<R>
where
    T: Clone + Send + 'static,
    R: Clone + Send + 'static,
    I: IntoIterator<Item = Future<T>>,
    F: FnMut(R, T) -> R + Send + 'static,
{
    let futures: Vec<Future<T>> = futures.into_iter().collect();
    let promise = PromiseF::new();
    let future = promise.future();
    fold_from(futures.into_iter(), zero, operation, promise);
    future
}

fn fold_from<T, R, F>(
    mut futures: std::vec::IntoIter<Future<T>>,
    mut accumulator: R,
    mut operation: F,
    promise: PromiseF<R>,
) where
    T: Clone + Send + 'static,
    R: Clone + Send + 'static,
    F: FnMut(R, T) -> R + Send + 'static,
{
    while let Some(next) = futures.next() {
        let Optional::Some(result) = next.value() else {
            next.on_complete(move |result| {
                if let Some(accumulator) = fold_step(&promise, accumulator, result, &mut operation) {
                    fold_from(futures, accumulator, operation, promise);
                }
            });
            return;
        };
        match fold_step(&promise, accumulator, result, &mut operation) {
            Some(next_accumulator) => accumulator = next_accumulator,
            None => return,
        }
    }
    promise.try_success(accumulator);
}

/// Applies one fold step; on failure completes `promise` and returns `None`.
fn fold_step<T, R, F>(
    promise: &PromiseF<R>,
    accumulator: R,
    result: Try<T>,
    operation: &mut F,
) -> Option<R>
where
    R: Clone + Send + 'static,
    F: FnMut(R, T) -> R,
{
    match result.map(|value| operation(accumulator, value)) {
        Try::Success(next) => Some(next),
        Try::Failure(exception) => {
            promise.try_failure(exception);
            None
        }
    }
}

/// Like [`fold_futures_left`], seeded with the first future's value.
///
/// An empty input fails with `NoSuchElement`.
///
/// # Examples
///
/// ```rust
/// use scalars::future::{reduce_futures_left, successful_future};
/// use scalars::{Exception, Optional, Try};
///
/// let sum = reduce_futures_left([successful_future(1), successful_future(2)], |a, b| a + b);
/// assert_eq!(sum.value(), Optional::Some(Try::Success(3)));
///
/// let empty = reduce_futures_left(Vec::<scalars::Future<i32>>::new(), |a, b| a + b);
/// assert_eq!(
///     empty.value(),
///     Optional::Some(Try::Failure(Exception::no_such_element(
///         "reduceLeft attempted on empty collection"
///     )))
/// );
/// ```
pub fn reduce_futures_left<T, I, F>(futures: I, operation: F) -> Future<T>
where
    T: Clone + Send + 'static,
    I: IntoIterator<Item = Future<T>>,
    F: FnMut(T, T) -> T + Send + 'static,
{
    let mut futures = futures.into_iter();
    let Some(first) = futures.next() else {
        return failed_future(Exception::no_such_element(
            "reduceLeft attempted on empty collection",
        ));
    };
    let rest: Vec<Future<T>> = futures.collect();
    first.flat_map(move |seed| fold_futures_left(rest, seed, operation))
}

// =============================================================================
// Concurrent combinators
// =============================================================================

/// Completes with whichever input completes first, success or failure.
///
/// An empty input never completes.
pub fn first_completed_of<T, I>(futures: I) -> Future<T>
where
    T: Clone + Send + 'static,
    I: IntoIterator<Item = Future<T>>,
{
    let promise = PromiseF::new();
    for future in futures {
        let promise = promise.clone();
        future.on_complete(move |result| {
            promise.try_complete(result);
        });
    }
    promise.future()
}

/// The first successful value accepted by `predicate`, in completion order,
/// or `None` once every input has completed without a match.
///
/// Failed inputs are skipped. A panicking predicate fails the result.
pub fn find_future<T, I, P>(futures: I, predicate: P) -> Future<Optional<T>>
where
    T: Clone + Send + 'static,
    I: IntoIterator<Item = Future<T>>,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    let futures: Vec<Future<T>> = futures.into_iter().collect();
    if futures.is_empty() {
        return successful_future(Optional::None);
    }

    let promise = PromiseF::new();
    let remaining = Arc::new(AtomicUsize::new(futures.len()));
    let predicate = Arc::new(predicate);
    for future in futures {
        let promise = promise.clone();
        let remaining = Arc::clone(&remaining);
        let predicate = Arc::clone(&predicate);
        future.on_complete(move |result| {
            if let Try::Success(value) = result {
                match Try::of(|| predicate(&value)) {
                    Try::Success(true) => {
                        promise.try_success(Optional::Some(value));
                    }
                    Try::Success(false) => {}
                    Try::Failure(exception) => {
                        promise.try_failure(exception);
                    }
                }
            }
            if remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
                promise.try_success(Optional::None);
            }
        });
    }
    promise.future()
}
