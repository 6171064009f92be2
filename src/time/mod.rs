//!
//! Temporal quantification in a simulation context.
//!
//! A [`SimTime`] is a point on the simulated timeline, measured as the
//! [`Duration`] since the start of the timeline. There is no process-global
//! "now": the current simulation time is owned by the
//! [`Scheduler`](crate::scheduler::Scheduler) that dispatches events, and is
//! read through [`Scheduler::current_time`](crate::scheduler::Scheduler::current_time).
//!
//! # Examples
//!
//! ```rust
//! # use simsched::time::*;
//! let five_seconds = Duration::from_secs(5);
//! assert_eq!(five_seconds, Duration::from_millis(5_000));
//!
//! let t = SimTime::ZERO + five_seconds;
//! assert_eq!(t, SimTime::from(5.0));
//! ```

mod duration;
pub use duration::*;

#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::ser::SerializeMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::fmt::{Debug, Display};
use std::ops::{Deref, Div, Sub, SubAssign};

///
/// A specific point of time in the simulation.
///
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimTime(Duration);

impl SimTime {
    ///
    /// Constructs an instance of `SimTime` from a given duration since `SimTime::ZERO`.
    ///
    #[must_use]
    pub const fn from_duration(duration: Duration) -> Self {
        Self(duration)
    }

    ///
    /// Makes an equality check with an error margin.
    ///
    #[must_use]
    pub fn eq_approx(&self, other: SimTime, error: Duration) -> bool {
        let dur = self.duration_diff(other);
        dur < error
    }

    /// Returns the amount of time elapsed from the earlier of the two values
    /// to the higher.
    #[must_use]
    pub fn duration_diff(&self, other: SimTime) -> Duration {
        if *self > other {
            self.duration_since(other)
        } else {
            other.duration_since(*self)
        }
    }

    /// Returns the amount of time elapsed from another instant to this one.
    ///
    /// # Panics
    ///
    /// This function panics if the checked operation fails.
    #[must_use]
    pub fn duration_since(&self, earlier: SimTime) -> Duration {
        self.checked_duration_since(earlier)
            .expect("duration subtraction invalid")
    }

    /// Returns the amount of time elapsed from another instant to this one,
    /// or None if that instant is later than this one.
    #[must_use]
    pub fn checked_duration_since(&self, earlier: SimTime) -> Option<Duration> {
        self.0.checked_sub(earlier.0)
    }

    /// Returns the amount of time elapsed from another instant to this one,
    /// or zero duration if that instant is later than this one.
    #[must_use]
    pub fn saturating_duration_since(&self, earlier: SimTime) -> Duration {
        self.checked_duration_since(earlier).unwrap_or_default()
    }

    /// Returns `Some(t)` where `t` is the time `self + duration` if `t` can be
    /// represented (which means it's inside the bounds of the underlying data
    /// structure), `None` otherwise.
    #[must_use]
    pub fn checked_add(&self, duration: Duration) -> Option<SimTime> {
        self.0.checked_add(duration).map(SimTime)
    }

    /// Returns `Some(t)` where `t` is the time `self - duration` if `t` can be
    /// represented (which means it's inside the bounds of the underlying data
    /// structure), `None` otherwise.
    #[must_use]
    pub fn checked_sub(&self, duration: Duration) -> Option<SimTime> {
        self.0.checked_sub(duration).map(SimTime)
    }
}

// # Custom Additions
impl SimTime {
    /// The smallest instance of a [`SimTime`].
    pub const ZERO: SimTime = SimTime(Duration::ZERO);
    /// The smallest valid instance of a [`SimTime`].
    pub const MIN: SimTime = SimTime(Duration::ZERO);
    /// The greatest instance of a [`SimTime`].
    pub const MAX: SimTime = SimTime(Duration::MAX);
}

// Serialize

#[cfg(feature = "serde")]
impl Serialize for SimTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_f64(self.as_secs_f64())
        } else {
            let mut map = serializer.serialize_map(Some(2))?;
            map.serialize_entry("secs", &self.as_secs())?;
            map.serialize_entry("nanos", &self.subsec_nanos())?;
            map.end()
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for SimTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SimTimeVisitor;
        impl<'de> Visitor<'de> for SimTimeVisitor {
            type Value = SimTime;
            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a positive floating point value or an encoded Duration")
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(SimTime::from_duration(Duration::from_secs_f64(v)))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut secs = 0;
                let mut nanos = 0;
                while let Some(key) = map.next_key()? {
                    match key {
                        "secs" => secs = map.next_value()?,
                        "nanos" => nanos = map.next_value()?,
                        _ => return Err(serde::de::Error::unknown_field(key, &["secs", "nanos"])),
                    }
                }
                Ok(SimTime::from_duration(Duration::new(secs, nanos)))
            }
        }

        deserializer.deserialize_any(SimTimeVisitor)
    }
}

// CMP

impl PartialEq<f64> for SimTime {
    fn eq(&self, other: &f64) -> bool {
        let diff = (self.0.as_secs_f64() - *other).abs();
        diff < f64::EPSILON
    }
}

// OPS

impl Sub<Duration> for SimTime {
    type Output = SimTime;

    fn sub(self, rhs: Duration) -> Self::Output {
        self.checked_sub(rhs)
            .expect("Overflow when subtracting Duration from SimTime")
    }
}

impl SubAssign<Duration> for SimTime {
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs;
    }
}

impl Sub<SimTime> for SimTime {
    type Output = Duration;

    fn sub(self, rhs: SimTime) -> Self::Output {
        self.duration_since(rhs)
    }
}

impl Div<SimTime> for SimTime {
    type Output = f64;

    fn div(self, rhs: SimTime) -> Self::Output {
        self.0.as_secs_f64() / rhs.0.as_secs_f64()
    }
}

impl Div<f64> for SimTime {
    type Output = SimTime;

    fn div(self, rhs: f64) -> Self::Output {
        Self::from(self.0.as_secs_f64() / rhs)
    }
}

// DEREF

impl Deref for SimTime {
    type Target = Duration;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// FMT

impl Debug for SimTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for SimTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

// FROM

impl From<SimTime> for f64 {
    fn from(this: SimTime) -> Self {
        this.0.as_secs_f64()
    }
}

impl From<f64> for SimTime {
    fn from(value: f64) -> Self {
        SimTime(Duration::from_secs_f64(value))
    }
}

impl From<Duration> for SimTime {
    fn from(value: Duration) -> Self {
        SimTime(value)
    }
}
