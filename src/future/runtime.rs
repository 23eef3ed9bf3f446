//! The Tokio runtime that host-side work is spawned on.
//!
//! Adopting a host future ([`future_from_promise`](super::future_from_promise))
//! and the duration timers need an executor. Inside a Tokio runtime the
//! current one is used, so tracing spans and test clocks carry over. Outside
//! of any runtime a process-wide multi-thread runtime is built on first use
//! and never dropped.

use std::cell::RefCell;

use tokio::runtime::{Builder, Handle, Runtime};

use crate::lazy::Lazily;

static GLOBAL_RUNTIME: Lazily<Runtime> = Lazily::new(build_global_runtime);

fn build_global_runtime() -> Runtime {
    let worker_threads = num_cpus::get();
    tracing::debug!(worker_threads, "building the shared fallback runtime");
    Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .thread_name("scalars-worker")
        .enable_all()
        .build()
        .expect("failed to build the shared tokio runtime")
}

/// The shared fallback runtime, built on first access.
#[inline]
pub fn global() -> &'static Runtime {
    GLOBAL_RUNTIME.get()
}

thread_local! {
    static CACHED_HANDLE: RefCell<Option<Handle>> = const { RefCell::new(None) };
}

/// A handle to the current runtime, or to [`global`] outside of one.
///
/// # Examples
///
/// ```rust
/// use scalars::future::runtime::handle;
///
/// let task = handle().spawn(async { 6 * 7 });
/// assert_eq!(scalars::future::runtime::global().block_on(task).unwrap(), 42);
/// ```
pub fn handle() -> Handle {
    if let Ok(current) = Handle::try_current() {
        return current;
    }
    CACHED_HANDLE.with(|cached| {
        cached
            .borrow_mut()
            .get_or_insert_with(|| global().handle().clone())
            .clone()
    })
}
