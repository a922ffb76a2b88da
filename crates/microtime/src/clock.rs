//! Wall-clock access with microsecond resolution.

use crate::error::ClockError;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A point in time as seconds and microseconds since the unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timeval {
    secs: i64,
    micros: u32,
}

impl Timeval {
    /// Returns `None` if `micros` is not below one second.
    pub fn new(secs: i64, micros: u32) -> Option<Self> {
        (micros < 1_000_000).then_some(Self { secs, micros })
    }

    pub fn secs(&self) -> i64 {
        self.secs
    }

    pub fn micros(&self) -> u32 {
        self.micros
    }
}

impl TryFrom<Duration> for Timeval {
    type Error = ClockError;

    fn try_from(since_epoch: Duration) -> Result<Self, Self::Error> {
        let secs = since_epoch.as_secs();
        let secs = i64::try_from(secs).map_err(|_| ClockError::OutOfRange { secs })?;
        Ok(Self { secs, micros: since_epoch.subsec_micros() })
    }
}

/// `<seconds>.<microseconds>`, microseconds zero-padded to 6 digits.
impl fmt::Display for Timeval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06}", self.secs, self.micros)
    }
}

/// Source of the current time.
pub trait Clock: fmt::Debug + Send + Sync + 'static {
    /// Reads the current time.
    ///
    /// # Errors
    ///
    /// Returns a [`ClockError`] if the time can't be represented as a [`Timeval`].
    fn now(&self) -> Result<Timeval, ClockError>;
}

/// The system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<Timeval, ClockError> {
        SystemTime::now().duration_since(UNIX_EPOCH)?.try_into()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(Timeval);

impl FixedClock {
    pub fn new(now: Timeval) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Result<Timeval, ClockError> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_pads_micros() {
        assert_eq!(Timeval::new(1_700_000_000, 123).unwrap().to_string(), "1700000000.000123");
        assert_eq!(Timeval::new(1_700_000_000, 500_000).unwrap().to_string(), "1700000000.500000");
        assert_eq!(Timeval::new(0, 0).unwrap().to_string(), "0.000000");
    }

    #[test]
    fn micros_below_one_second() {
        assert!(Timeval::new(1, 999_999).is_some());
        assert!(Timeval::new(1, 1_000_000).is_none());
    }

    #[test]
    fn from_duration() {
        let tv = Timeval::try_from(Duration::new(1_700_000_000, 500_000_999)).unwrap();
        assert_eq!(tv, Timeval::new(1_700_000_000, 500_000).unwrap());
    }

    #[test]
    fn duration_out_of_range() {
        let result = Timeval::try_from(Duration::from_secs(u64::MAX));
        assert!(matches!(result, Err(ClockError::OutOfRange { secs: u64::MAX })));
    }

    #[test]
    fn system_clock_is_after_2023() {
        let now = SystemClock.now().unwrap();
        assert!(now.secs() > 1_700_000_000);
    }

    #[test]
    fn fixed_clock() {
        let tv = Timeval::new(42, 7).unwrap();
        let clock = FixedClock::new(tv);
        assert_eq!(clock.now().unwrap(), tv);
        assert_eq!(clock.now().unwrap(), tv);
    }
}
