//! # scalars
//!
//! Scala-flavoured functional primitives for Rust.
//!
//! ## Overview
//!
//! - **Containers**: [`Optional`], [`Either`] (right-biased, with a
//!   [`LeftProjection`]) and [`Try`], all immutable and compared through a
//!   replaceable [equality registry](equality)
//! - **Asynchrony**: [`Future`] / [`PromiseF`], a write-once cell with
//!   non-blocking combinators, awaitable on any executor
//! - **Time**: [`FiniteDuration`] with unit-aware arithmetic and [`Deadline`]
//! - **Support**: the [`Exception`] taxonomy, the [`Lazily`] memoizer and
//!   [`undef_or`] helpers for plain `Option`s
//!
//! A panic raised inside a user callback is the analogue of a thrown
//! exception: `Try` and the `Future` combinators capture it as a failure,
//! everything else lets it propagate.
//!
//! ## Feature Flags
//!
//! - `async` (default): adopting host futures and duration timers on Tokio
//! - `serde`: `Serialize`/`Deserialize` for the containers and durations
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use scalars::prelude::*;
//!
//! let port = option(std::env::var("PORT").ok())
//!     .flat_map(|raw| Try::of(|| raw.parse::<u16>().unwrap()).to_option())
//!     .get_or_else(|| 8080);
//! assert!(port > 0);
//!
//! let total = sequence_futures([successful_future(1), successful_future(2)]).map(|values| {
//!     values.iter().sum::<i32>()
//! });
//! assert_eq!(total.value(), Optional::Some(Try::Success(3)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the types, constructors and collection combinators.
///
/// # Usage
///
/// ```rust
/// use scalars::prelude::*;
/// ```
pub mod prelude {
    pub use crate::attempt::Try;
    pub use crate::duration::{
        Clock, Deadline, FiniteDuration, SystemClock, TimeUnit, days, hours, micros, millis,
        minutes, seconds,
    };
    pub use crate::either::{Either, LeftProjection};
    pub use crate::exceptions::Exception;
    pub use crate::future::{
        Future, PromiseF, failed_future, failed_promise, find_future, first_completed_of,
        fold_futures_left, future_from_try, future_never, future_unit, new_future, new_promise,
        promise_from_try, reduce_futures_left, sequence_futures, successful_future,
        successful_promise, traverse_futures,
    };
    #[cfg(feature = "async")]
    pub use crate::future::future_from_promise;
    pub use crate::lazy::{Lazily, lazily};
    pub use crate::option::{Optional, option};
    pub use crate::undef_or;
}

pub mod attempt;
pub mod duration;
pub mod either;
pub mod equality;
pub mod exceptions;
pub mod future;
pub mod lazy;
pub mod option;
pub mod undef_or;

pub use attempt::Try;
pub use duration::{Deadline, FiniteDuration, TimeUnit};
pub use either::{Either, LeftProjection};
pub use exceptions::Exception;
pub use future::{Future, PromiseF};
pub use lazy::{Lazily, lazily};
pub use option::Optional;
