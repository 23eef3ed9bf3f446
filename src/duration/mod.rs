//! Finite durations and wall-clock deadlines.
//!
//! [`FiniteDuration`] stores a length, a [`TimeUnit`] and the normalized
//! microsecond count; it is bounded by ±(2^53 - 1) microseconds (about 285
//! years). [`Deadline`] is `now + duration` on a [`Clock`].
//!
//! With the `async` feature, durations double as timers on the Tokio runtime
//! (`delay`, `repeat`, [`Deadline::then`]).
//!
//! # Examples
//!
//! ```rust
//! use scalars::duration::{hours, millis, seconds};
//!
//! assert_eq!(seconds(90)?.to_minutes(), 1);
//! assert_eq!(millis(2_000)?.to_coarsest().to_string(), "2 seconds");
//! assert!(hours(1)? > seconds(3_599)?);
//! # Ok::<(), scalars::Exception>(())
//! ```

mod clock;
mod deadline;
mod finite_duration;
mod time_unit;

pub use clock::{Clock, SystemClock};
pub use deadline::Deadline;
pub use finite_duration::{
    FiniteDuration, MAX_MICROS, days, hours, micros, millis, minutes, seconds,
};
pub use time_unit::TimeUnit;
