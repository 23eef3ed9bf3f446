use std::fmt;

/// The units a [`FiniteDuration`](super::FiniteDuration) can be expressed in,
/// from finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeUnit {
    /// One microsecond, the base unit.
    Microseconds,
    /// 1 000 microseconds.
    Milliseconds,
    /// 1 000 milliseconds.
    Seconds,
    /// 60 seconds.
    Minutes,
    /// 60 minutes.
    Hours,
    /// 24 hours.
    Days,
}

impl TimeUnit {
    /// Every unit, finest first.
    pub const ALL: [Self; 6] = [
        Self::Microseconds,
        Self::Milliseconds,
        Self::Seconds,
        Self::Minutes,
        Self::Hours,
        Self::Days,
    ];

    /// The number of microseconds in one of this unit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scalars::TimeUnit;
    ///
    /// assert_eq!(TimeUnit::Minutes.factor(), 60_000_000);
    /// ```
    #[inline]
    pub const fn factor(self) -> i64 {
        match self {
            Self::Microseconds => 1,
            Self::Milliseconds => 1_000,
            Self::Seconds => 1_000_000,
            Self::Minutes => 60_000_000,
            Self::Hours => 3_600_000_000,
            Self::Days => 86_400_000_000,
        }
    }

    /// The next coarser unit and how many of `self` make one of it.
    #[inline]
    pub const fn coarser(self) -> Option<(Self, i64)> {
        match self {
            Self::Microseconds => Some((Self::Milliseconds, 1_000)),
            Self::Milliseconds => Some((Self::Seconds, 1_000)),
            Self::Seconds => Some((Self::Minutes, 60)),
            Self::Minutes => Some((Self::Hours, 60)),
            Self::Hours => Some((Self::Days, 24)),
            Self::Days => None,
        }
    }

    /// The singular English label, e.g. `"minute"`.
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Microseconds => "microsecond",
            Self::Milliseconds => "millisecond",
            Self::Seconds => "second",
            Self::Minutes => "minute",
            Self::Hours => "hour",
            Self::Days => "day",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}s", self.singular())
    }
}
