use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Neg;
use std::sync::Arc;

use super::{Clock, Deadline, SystemClock, TimeUnit};
use crate::equality;
use crate::exceptions::Exception;

/// The largest magnitude, in microseconds, a duration may have: `2^53 - 1`.
pub const MAX_MICROS: i64 = (1 << 53) - 1;

fn out_of_range() -> Exception {
    Exception::illegal_argument(
        "requirement failed: Duration is limited to +-(2^53-1)μs (ca. 285 years)",
    )
}

/// A length of time with a unit, bounded by ±(2^53 - 1) microseconds.
///
/// Equality, ordering and hashing look at the microsecond count only, so
/// `minutes(60) == hours(1)`; the unit matters for display and
/// [`to_coarsest`](Self::to_coarsest).
///
/// # Examples
///
/// ```rust
/// use scalars::duration::{days, hours, minutes, seconds};
///
/// let hour = minutes(59)?.plus(&minutes(1)?)?;
/// assert_eq!(hour, hours(1)?);
/// assert_eq!(hour.to_string(), "1 hour");
///
/// assert_eq!(hours(48)?.divided_by(2.0)?, days(1)?);
/// assert_eq!(seconds(3)?.times(20.0)?, minutes(1)?);
/// # Ok::<(), scalars::Exception>(())
/// ```
#[derive(Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "DurationRepr", try_from = "DurationRepr")
)]
pub struct FiniteDuration {
    length: i64,
    unit: TimeUnit,
    micros: i64,
}

impl FiniteDuration {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates a duration, truncating `length` toward zero.
    ///
    /// # Errors
    ///
    /// Returns `IllegalArgument` when the duration exceeds ±(2^53 - 1)
    /// microseconds or `length` is not a number.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn new(length: f64, unit: TimeUnit) -> Result<Self, Exception> {
        let length = length.trunc();
        let micros = length * unit.factor() as f64;
        if micros.is_nan() || micros.abs() > MAX_MICROS as f64 {
            return Err(out_of_range());
        }
        Ok(Self {
            length: length as i64,
            unit,
            micros: micros as i64,
        })
    }

    /// Creates a duration from an integral length.
    ///
    /// # Errors
    ///
    /// Returns `IllegalArgument` when the duration exceeds ±(2^53 - 1)
    /// microseconds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scalars::{Exception, FiniteDuration, TimeUnit};
    ///
    /// let error = FiniteDuration::of((1 << 53) - 1, TimeUnit::Days).unwrap_err();
    /// assert!(matches!(error, Exception::IllegalArgument(_)));
    /// assert!(error.message().contains("285 years"));
    /// ```
    pub fn of(length: i64, unit: TimeUnit) -> Result<Self, Exception> {
        match length.checked_mul(unit.factor()) {
            Some(micros) if (-MAX_MICROS..=MAX_MICROS).contains(&micros) => Ok(Self {
                length,
                unit,
                micros,
            }),
            _ => Err(out_of_range()),
        }
    }

    /// The length in [`unit`](Self::unit)s.
    #[inline]
    pub const fn length(&self) -> i64 {
        self.length
    }

    /// The unit the length is expressed in.
    #[inline]
    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    /// The exact microsecond count.
    #[inline]
    pub const fn to_micros(&self) -> i64 {
        self.micros
    }

    /// Whole milliseconds, truncated toward zero.
    #[inline]
    pub const fn to_millis(&self) -> i64 {
        self.micros / TimeUnit::Milliseconds.factor()
    }

    /// Whole seconds, truncated toward zero.
    #[inline]
    pub const fn to_seconds(&self) -> i64 {
        self.micros / TimeUnit::Seconds.factor()
    }

    /// Whole minutes, truncated toward zero.
    #[inline]
    pub const fn to_minutes(&self) -> i64 {
        self.micros / TimeUnit::Minutes.factor()
    }

    /// Whole hours, truncated toward zero.
    #[inline]
    pub const fn to_hours(&self) -> i64 {
        self.micros / TimeUnit::Hours.factor()
    }

    /// Whole days, truncated toward zero.
    #[inline]
    pub const fn to_days(&self) -> i64 {
        self.micros / TimeUnit::Days.factor()
    }

    /// Re-expresses the duration in the coarsest unit its length divides
    /// into evenly.
    ///
    /// Returns an identical copy when no promotion applies.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scalars::duration::{hours, minutes};
    /// use scalars::TimeUnit;
    ///
    /// let two_days = hours(48)?.to_coarsest();
    /// assert_eq!((two_days.length(), two_days.unit()), (2, TimeUnit::Days));
    ///
    /// let odd = minutes(841)?.to_coarsest();
    /// assert_eq!((odd.length(), odd.unit()), (841, TimeUnit::Minutes));
    /// # Ok::<(), scalars::Exception>(())
    /// ```
    pub fn to_coarsest(&self) -> Self {
        let mut length = self.length;
        let mut unit = self.unit;
        while let Some((coarser, divisor)) = unit.coarser() {
            if length % divisor != 0 {
                break;
            }
            length /= divisor;
            unit = coarser;
        }
        Self {
            length,
            unit,
            micros: self.micros,
        }
    }

    /// The deadline this duration from now, on the system clock.
    pub fn from_now(&self) -> Deadline {
        Deadline::new(*self)
    }

    /// The deadline this duration from now, on `clock`.
    pub fn from_now_on(&self, clock: Arc<dyn Clock>) -> Deadline {
        Deadline::with_clock(*self, clock)
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// The sum, in its coarsest unit.
    ///
    /// # Errors
    ///
    /// Returns `IllegalArgument` when the sum is out of range.
    pub fn plus(&self, other: &Self) -> Result<Self, Exception> {
        micros(self.micros + other.micros).map(|sum| sum.to_coarsest())
    }

    /// The difference, in its coarsest unit.
    ///
    /// # Errors
    ///
    /// Returns `IllegalArgument` when the difference is out of range.
    pub fn minus(&self, other: &Self) -> Result<Self, Exception> {
        micros(self.micros - other.micros).map(|difference| difference.to_coarsest())
    }

    /// Scales by `factor`, in microseconds, truncating toward zero.
    ///
    /// # Errors
    ///
    /// Returns `IllegalArgument` when the product is out of range.
    #[allow(clippy::cast_precision_loss)]
    pub fn times(&self, factor: f64) -> Result<Self, Exception> {
        Self::new(self.micros as f64 * factor, TimeUnit::Microseconds)
    }

    /// Divides by `divisor`, in microseconds, truncating toward zero.
    ///
    /// # Errors
    ///
    /// Returns `IllegalArgument` when the quotient is out of range, which
    /// includes division by zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn divided_by(&self, divisor: f64) -> Result<Self, Exception> {
        Self::new(self.micros as f64 / divisor, TimeUnit::Microseconds)
    }

    /// The same length with the opposite sign, in the same unit.
    #[inline]
    #[must_use]
    pub const fn negate(&self) -> Self {
        Self {
            length: -self.length,
            unit: self.unit,
            micros: -self.micros,
        }
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// `self > other`.
    #[inline]
    pub fn gt(&self, other: &Self) -> bool {
        self.micros > other.micros
    }

    /// `self >= other`.
    #[inline]
    pub fn gteq(&self, other: &Self) -> bool {
        self.micros >= other.micros
    }

    /// `self < other`.
    #[inline]
    pub fn lt(&self, other: &Self) -> bool {
        self.micros < other.micros
    }

    /// `self <= other`.
    #[inline]
    pub fn lteq(&self, other: &Self) -> bool {
        self.micros <= other.micros
    }

    /// The longer of the two; `other` on a tie.
    #[inline]
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        if self.gt(&other) { self } else { other }
    }

    /// The shorter of the two; `other` on a tie.
    #[inline]
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        if self.lt(&other) { self } else { other }
    }

    // =========================================================================
    // Timers
    // =========================================================================

    #[cfg(feature = "async")]
    fn as_sleep(&self) -> std::time::Duration {
        std::time::Duration::from_millis(u64::try_from(self.to_millis()).unwrap_or(0))
    }

    /// Runs `function` once after this duration, on the Tokio runtime.
    ///
    /// Negative durations fire immediately. Abort the returned handle to
    /// cancel.
    #[cfg(feature = "async")]
    pub fn delay<F>(&self, function: F) -> tokio::task::JoinHandle<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let sleep = self.as_sleep();
        tracing::trace!(delay = %self, "scheduling one-shot timer");
        crate::future::runtime::handle().spawn(async move {
            tokio::time::sleep(sleep).await;
            function();
        })
    }

    /// Runs `function` every period of this duration, first after one
    /// period, until the returned handle is aborted.
    ///
    /// Periods shorter than one millisecond are raised to one millisecond.
    #[cfg(feature = "async")]
    pub fn repeat<F>(&self, mut function: F) -> tokio::task::JoinHandle<()>
    where
        F: FnMut() + Send + 'static,
    {
        let period = self.as_sleep().max(std::time::Duration::from_millis(1));
        tracing::trace!(period = %self, "scheduling periodic timer");
        crate::future::runtime::handle().spawn(async move {
            let mut interval =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                interval.tick().await;
                function();
            }
        })
    }
}

/// `length` microseconds.
///
/// # Errors
///
/// Returns `IllegalArgument` when out of range.
pub fn micros(length: i64) -> Result<FiniteDuration, Exception> {
    FiniteDuration::of(length, TimeUnit::Microseconds)
}

/// `length` milliseconds.
///
/// # Errors
///
/// Returns `IllegalArgument` when out of range.
pub fn millis(length: i64) -> Result<FiniteDuration, Exception> {
    FiniteDuration::of(length, TimeUnit::Milliseconds)
}

/// `length` seconds.
///
/// # Errors
///
/// Returns `IllegalArgument` when out of range.
pub fn seconds(length: i64) -> Result<FiniteDuration, Exception> {
    FiniteDuration::of(length, TimeUnit::Seconds)
}

/// `length` minutes.
///
/// # Errors
///
/// Returns `IllegalArgument` when out of range.
pub fn minutes(length: i64) -> Result<FiniteDuration, Exception> {
    FiniteDuration::of(length, TimeUnit::Minutes)
}

/// `length` hours.
///
/// # Errors
///
/// Returns `IllegalArgument` when out of range.
pub fn hours(length: i64) -> Result<FiniteDuration, Exception> {
    FiniteDuration::of(length, TimeUnit::Hours)
}

/// `length` days.
///
/// # Errors
///
/// Returns `IllegalArgument` when out of range.
pub fn days(length: i64) -> Result<FiniteDuration, Exception> {
    FiniteDuration::of(length, TimeUnit::Days)
}

/// Milliseconds clamped into range; used where the input cannot be refused.
pub(super) fn saturating_millis(length: i64) -> FiniteDuration {
    let limit = MAX_MICROS / TimeUnit::Milliseconds.factor();
    let length = length.clamp(-limit, limit);
    FiniteDuration {
        length,
        unit: TimeUnit::Milliseconds,
        micros: length * TimeUnit::Milliseconds.factor(),
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl PartialEq for FiniteDuration {
    fn eq(&self, other: &Self) -> bool {
        self.micros == other.micros
    }
}

impl Eq for FiniteDuration {}

impl PartialOrd for FiniteDuration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FiniteDuration {
    fn cmp(&self, other: &Self) -> Ordering {
        self.micros.cmp(&other.micros)
    }
}

impl Hash for FiniteDuration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(equality::hash_of(&self.micros));
    }
}

impl Neg for FiniteDuration {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl fmt::Display for FiniteDuration {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.length == 1 { "" } else { "s" };
        write!(formatter, "{} {}{}", self.length, self.unit.singular(), plural)
    }
}

impl fmt::Debug for FiniteDuration {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "FiniteDuration({self})")
    }
}

impl TryFrom<std::time::Duration> for FiniteDuration {
    type Error = Exception;

    /// Converts at microsecond precision, dropping sub-microsecond parts.
    fn try_from(duration: std::time::Duration) -> Result<Self, Self::Error> {
        let micros = i64::try_from(duration.as_micros()).map_err(|_| out_of_range())?;
        self::micros(micros)
    }
}

impl Default for FiniteDuration {
    fn default() -> Self {
        Self {
            length: 0,
            unit: TimeUnit::Microseconds,
            micros: 0,
        }
    }
}

/// The system clock as a shareable collaborator.
pub(super) fn system_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct DurationRepr {
    length: i64,
    unit: TimeUnit,
}

#[cfg(feature = "serde")]
impl From<FiniteDuration> for DurationRepr {
    fn from(duration: FiniteDuration) -> Self {
        Self {
            length: duration.length,
            unit: duration.unit,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<DurationRepr> for FiniteDuration {
    type Error = Exception;

    fn try_from(repr: DurationRepr) -> Result<Self, Self::Error> {
        Self::of(repr.length, repr.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, "1 second")]
    #[case(0, "0 seconds")]
    #[case(2, "2 seconds")]
    #[case(-1, "-1 seconds")]
    fn test_display_pluralizes_unless_length_is_one(#[case] length: i64, #[case] expected: &str) {
        assert_eq!(seconds(length).unwrap().to_string(), expected);
    }

    #[rstest]
    fn test_new_truncates_toward_zero() {
        let duration = FiniteDuration::new(-1.9, TimeUnit::Seconds).unwrap();
        assert_eq!(duration.length(), -1);
        assert_eq!(duration.to_micros(), -1_000_000);
    }

    #[rstest]
    fn test_new_rejects_nan() {
        assert!(FiniteDuration::new(f64::NAN, TimeUnit::Seconds).is_err());
    }

    #[rstest]
    fn test_range_boundaries() {
        assert!(micros(MAX_MICROS).is_ok());
        assert!(micros(-MAX_MICROS).is_ok());
        assert!(micros(MAX_MICROS + 1).is_err());
        assert!(micros(MAX_MICROS).unwrap().plus(&micros(1).unwrap()).is_err());
    }

    #[rstest]
    fn test_conversions_truncate() {
        let duration = millis(1_999).unwrap();
        assert_eq!(duration.to_seconds(), 1);
        assert_eq!(duration.negate().to_seconds(), -1);
    }

    #[rstest]
    fn test_saturating_millis_clamps() {
        assert_eq!(saturating_millis(i64::MAX).to_micros(), MAX_MICROS / 1_000 * 1_000);
    }
}
