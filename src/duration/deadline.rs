use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::finite_duration::{saturating_millis, system_clock};
use super::{Clock, FiniteDuration};
use crate::equality::{self, DynHash};

/// A wall-clock instant, `now + time`, remembered together with `time`.
///
/// Two deadlines are equal when both their end instants and originating
/// durations are; the clock they read is not compared.
///
/// # Examples
///
/// ```rust
/// use scalars::duration::minutes;
///
/// let deadline = minutes(5)?.from_now();
/// assert!(deadline.has_time_left());
/// assert!(!deadline.is_overdue());
/// assert!(deadline.time_left() <= minutes(5)?);
/// # Ok::<(), scalars::Exception>(())
/// ```
#[derive(Clone)]
pub struct Deadline {
    end_millis: i64,
    time: FiniteDuration,
    clock: Arc<dyn Clock>,
}

impl Deadline {
    /// A deadline `time` from now on the system clock.
    pub fn new(time: FiniteDuration) -> Self {
        Self::with_clock(time, system_clock())
    }

    /// A deadline `time` from now on `clock`.
    pub fn with_clock(time: FiniteDuration, clock: Arc<dyn Clock>) -> Self {
        let end_millis = clock.now_millis().saturating_add(time.to_millis());
        Self {
            end_millis,
            time,
            clock,
        }
    }

    /// The end instant in milliseconds since the Unix epoch.
    #[inline]
    pub const fn end_millis(&self) -> i64 {
        self.end_millis
    }

    /// The duration the deadline was created from.
    #[inline]
    pub const fn time(&self) -> FiniteDuration {
        self.time
    }

    /// `true` while the end instant lies in the future.
    pub fn has_time_left(&self) -> bool {
        self.clock.now_millis() < self.end_millis
    }

    /// `true` once the end instant lies in the past.
    pub fn is_overdue(&self) -> bool {
        self.clock.now_millis() > self.end_millis
    }

    /// The time until the end instant, negative when overdue, in its
    /// coarsest unit.
    pub fn time_left(&self) -> FiniteDuration {
        saturating_millis(self.end_millis.saturating_sub(self.clock.now_millis())).to_coarsest()
    }

    /// Runs `function` once the deadline is reached, on the Tokio runtime.
    ///
    /// Fires immediately when already overdue.
    #[cfg(feature = "async")]
    pub fn then<F>(&self, function: F) -> tokio::task::JoinHandle<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.time_left().delay(function)
    }
}

impl PartialEq for Deadline {
    fn eq(&self, other: &Self) -> bool {
        self.end_millis == other.end_millis && self.time == other.time
    }
}

impl Eq for Deadline {}

impl Hash for Deadline {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let items: [&dyn DynHash; 2] = [&self.end_millis, &self.time];
        state.write_u64(equality::hash_items(&items));
    }
}

impl fmt::Debug for Deadline {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Deadline")
            .field("end_millis", &self.end_millis)
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}
