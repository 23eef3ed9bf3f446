use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use super::{Future, PromiseF, runtime};
use crate::attempt::Try;
use crate::exceptions::Exception;

/// Adopts a host future that resolves to `Ok(value)` or `Err(cause)`.
///
/// The host future is spawned on [`runtime::handle`]. A rejection is coerced
/// like [`Try::failure_any`]; a panic while polling becomes the failure too.
///
/// # Examples
///
/// ```rust
/// use scalars::future::future_from_promise;
/// use scalars::Exception;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let adopted = future_from_promise(async { Ok::<_, String>(5) });
/// assert_eq!(adopted.await, Ok(5));
///
/// let rejected = future_from_promise(async { Err::<u8, _>("refused".to_string()) });
/// assert_eq!(rejected.await, Err(Exception::error("refused")));
/// # });
/// ```
pub fn future_from_promise<T, E, P>(deferred: P) -> Future<T>
where
    T: Clone + Send + 'static,
    E: Any + Send,
    P: std::future::Future<Output = Result<T, E>> + Send + 'static,
{
    let promise = PromiseF::new();
    let completer = promise.clone();
    runtime::handle().spawn(async move {
        let result = match AssertUnwindSafe(deferred).catch_unwind().await {
            Ok(Ok(value)) => Try::Success(value),
            Ok(Err(cause)) => Try::failure_any(cause),
            Err(payload) => Try::Failure(Exception::from_panic(payload)),
        };
        completer.try_complete(result);
    });
    promise.future()
}
