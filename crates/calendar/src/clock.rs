//! Contracts for the two outside collaborators: a clock and a local zone.
//!
//! The crate never reads hardware or zone databases itself. Callers hand
//! in an implementation of [`Clock`] for "now" and of [`LocalZone`] for
//! conversions that involve naive local time.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::duration::{Duration, MICROS_PER_DAY, MICROS_PER_SECOND, SECONDS_PER_DAY};
use crate::gregorian::EPOCH_ORDINAL;

/// One reading of a clock: the current UTC instant plus the local offset
/// in force at that instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    /// Ordinal day of the UTC date.
    pub ordinal: i32,
    /// Seconds since UTC midnight (0..86400).
    pub seconds: u32,
    /// Microseconds within the second (0..1_000_000).
    pub microseconds: u32,
    /// Local offset east of UTC.
    pub local_offset: Duration,
}

impl ClockReading {
    /// Builds a reading from microseconds since the POSIX epoch.
    pub fn from_unix_micros(micros: i64, local_offset: Duration) -> Self {
        let days = micros.div_euclid(MICROS_PER_DAY);
        let rem = micros.rem_euclid(MICROS_PER_DAY);
        Self {
            ordinal: EPOCH_ORDINAL + days as i32,
            seconds: (rem / MICROS_PER_SECOND) as u32,
            microseconds: (rem % MICROS_PER_SECOND) as u32,
            local_offset,
        }
    }

    /// Microseconds of the UTC instant since ordinal day 1 at midnight.
    pub(crate) fn utc_micros(&self) -> i128 {
        i128::from(self.ordinal - 1) * i128::from(MICROS_PER_DAY)
            + i128::from(self.seconds) * i128::from(MICROS_PER_SECOND)
            + i128::from(self.microseconds)
    }
}

/// Source of the current instant.
pub trait Clock {
    /// Reads the clock.
    fn read(&self) -> ClockReading;
}

/// A fixed reading acts as a frozen clock.
impl Clock for ClockReading {
    fn read(&self) -> ClockReading {
        *self
    }
}

/// The host's wall clock, reporting UTC as the local zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn read(&self) -> ClockReading {
        let micros = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_micros()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_micros())
                .map(|m| -m)
                .unwrap_or(i64::MIN),
        };
        ClockReading::from_unix_micros(micros, Duration::ZERO)
    }
}

/// Resolver from a UTC instant to the local offset in force at that instant.
///
/// This is all the naive-local conversions need from a zone database.
pub trait LocalZone {
    /// Offset east of UTC at `utc_seconds` seconds since the POSIX epoch.
    fn utc_offset_at(&self, utc_seconds: i64) -> Duration;

    /// Local wall-clock seconds since the epoch for a UTC instant,
    /// truncated to whole seconds of offset.
    fn local_seconds(&self, utc_seconds: i64) -> i64 {
        let offset = self.utc_offset_at(utc_seconds).total_microseconds();
        utc_seconds + offset.div_euclid(i128::from(MICROS_PER_SECOND)) as i64
    }
}

impl<F> LocalZone for F
where
    F: Fn(i64) -> Duration,
{
    fn utc_offset_at(&self, utc_seconds: i64) -> Duration {
        self(utc_seconds)
    }
}

/// Largest gap or fold a [`LocalZone`] may contain, in seconds.
pub(crate) const MAX_FOLD_SECONDS: i64 = SECONDS_PER_DAY;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_from_epoch() {
        let reading = ClockReading::from_unix_micros(0, Duration::ZERO);
        assert_eq!(reading.ordinal, EPOCH_ORDINAL);
        assert_eq!((reading.seconds, reading.microseconds), (0, 0));
    }

    #[test]
    fn reading_before_epoch() {
        let reading = ClockReading::from_unix_micros(-1, Duration::ZERO);
        assert_eq!(reading.ordinal, EPOCH_ORDINAL - 1);
        assert_eq!((reading.seconds, reading.microseconds), (86_399, 999_999));
    }

    #[test]
    fn frozen_clock() {
        let reading = ClockReading::from_unix_micros(1_500_000, Duration::from_hours(2).unwrap());
        assert_eq!(reading.read(), reading);
        assert_eq!(reading.seconds, 1);
        assert_eq!(reading.microseconds, 500_000);
    }

    #[test]
    fn system_clock_is_after_2020() {
        let reading = SystemClock.read();
        assert!(reading.ordinal > crate::gregorian::ymd_to_ordinal(2020, 1, 1));
        assert_eq!(reading.local_offset, Duration::ZERO);
    }

    #[test]
    fn closure_zone() {
        let zone = |t: i64| {
            if t < 1_000 {
                Duration::from_hours(-5).unwrap()
            } else {
                Duration::from_hours(-4).unwrap()
            }
        };
        assert_eq!(zone.local_seconds(0), -18_000);
        assert_eq!(zone.local_seconds(20_000), 20_000 - 14_400);
    }

    #[test]
    fn fractional_offsets_floor_to_seconds() {
        let zone = |_: i64| Duration::from_micros(-500_000).unwrap();
        assert_eq!(zone.local_seconds(10), 9);
    }
}
