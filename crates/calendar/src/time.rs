//! Time of day with an optional fixed offset.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::config::Timespec;
use crate::duration::{Duration, MICROS_PER_SECOND};
use crate::error::CalendarError;
use crate::iso;
use crate::offset::FixedOffset;

/// A wall-clock time between 00:00 and 23:59:59.999999.
///
/// Carrying an offset makes the time *aware*. Aware times compare by
/// their UTC-adjusted value, naive times by their fields, and ordering a
/// naive time against an aware one fails. The `fold` flag never takes
/// part in equality, ordering or hashing.
#[derive(Debug, Clone, Copy)]
pub struct Time {
    hour: u8,
    minute: u8,
    second: u8,
    microsecond: u32,
    offset: Option<FixedOffset>,
    fold: u8,
}

/// Field overrides for [`Time::replace`].
///
/// `offset: Some(None)` strips the offset; `offset: None` keeps it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeReplace {
    pub hour: Option<u8>,
    pub minute: Option<u8>,
    pub second: Option<u8>,
    pub microsecond: Option<u32>,
    pub offset: Option<Option<FixedOffset>>,
    pub fold: Option<u8>,
}

pub(crate) fn validate_time(hour: u8, minute: u8, second: u8, microsecond: u32) -> Result<(), CalendarError> {
    if hour > 23 {
        return Err(CalendarError::InvalidHour { hour });
    }
    if minute > 59 {
        return Err(CalendarError::InvalidMinute { minute });
    }
    if second > 59 {
        return Err(CalendarError::InvalidSecond { second });
    }
    if microsecond > 999_999 {
        return Err(CalendarError::InvalidMicrosecond { microsecond });
    }
    Ok(())
}

pub(crate) fn validate_fold(fold: u8) -> Result<u8, CalendarError> {
    if fold > 1 {
        return Err(CalendarError::InvalidFold { fold });
    }
    Ok(fold)
}

impl Time {
    /// Midnight, naive.
    pub const MIN: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
        microsecond: 0,
        offset: None,
        fold: 0,
    };

    /// 23:59:59.999999, naive.
    pub const MAX: Self = Self {
        hour: 23,
        minute: 59,
        second: 59,
        microsecond: 999_999,
        offset: None,
        fold: 0,
    };

    /// Creates a naive time with `fold = 0`.
    ///
    /// # Errors
    ///
    /// Returns the [`CalendarError`] for the first field out of range.
    pub fn new(hour: u8, minute: u8, second: u8, microsecond: u32) -> Result<Self, CalendarError> {
        validate_time(hour, minute, second, microsecond)?;
        Ok(Self {
            hour,
            minute,
            second,
            microsecond,
            offset: None,
            fold: 0,
        })
    }

    /// Parses `HH[:MM[:SS[.fff[fff]]]][±HH:MM[:SS[.ffffff]]]`.
    pub fn from_isoformat(s: &str) -> Result<Self, CalendarError> {
        iso::parse_time(s)
    }

    /// Returns a copy carrying `offset`.
    pub fn with_offset(self, offset: FixedOffset) -> Self {
        Self {
            offset: Some(offset),
            ..self
        }
    }

    /// Returns a copy with the given fold flag.
    pub fn with_fold(self, fold: u8) -> Result<Self, CalendarError> {
        Ok(Self {
            fold: validate_fold(fold)?,
            ..self
        })
    }

    pub(crate) fn from_parts(
        hour: u8,
        minute: u8,
        second: u8,
        microsecond: u32,
        offset: Option<FixedOffset>,
        fold: u8,
    ) -> Self {
        Self {
            hour,
            minute,
            second,
            microsecond,
            offset,
            fold,
        }
    }

    /// Splits microseconds since midnight (`0..86_400_000_000`).
    pub(crate) fn from_micros_of_day(micros: i64, offset: Option<FixedOffset>) -> Self {
        let seconds = micros / MICROS_PER_SECOND;
        Self::from_parts(
            (seconds / 3_600) as u8,
            (seconds % 3_600 / 60) as u8,
            (seconds % 60) as u8,
            (micros % MICROS_PER_SECOND) as u32,
            offset,
            0,
        )
    }

    /// Returns the hour (0..=23).
    pub fn hour(self) -> u8 {
        self.hour
    }

    /// Returns the minute (0..=59).
    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Returns the second (0..=59).
    pub fn second(self) -> u8 {
        self.second
    }

    /// Returns the microsecond (0..=999_999).
    pub fn microsecond(self) -> u32 {
        self.microsecond
    }

    /// 0 or 1; 1 marks the second occurrence of a repeated local time.
    pub fn fold(self) -> u8 {
        self.fold
    }

    /// The attached offset, if any.
    pub fn offset(self) -> Option<FixedOffset> {
        self.offset
    }

    /// `true` if an offset is attached.
    pub fn is_aware(self) -> bool {
        self.offset.is_some()
    }

    /// Offset east of UTC, `None` for naive times.
    pub fn utcoffset(self) -> Option<Duration> {
        self.offset.map(|o| o.utcoffset())
    }

    /// Zone name, `None` for naive times.
    pub fn tzname(self) -> Option<String> {
        self.offset.map(|o| o.tzname())
    }

    /// Daylight-saving adjustment; always `None` with fixed offsets.
    pub fn dst(self) -> Option<Duration> {
        self.offset.and_then(|o| o.dst())
    }

    /// Returns a copy with some fields overridden, re-validated.
    pub fn replace(self, fields: TimeReplace) -> Result<Self, CalendarError> {
        let hour = fields.hour.unwrap_or(self.hour);
        let minute = fields.minute.unwrap_or(self.minute);
        let second = fields.second.unwrap_or(self.second);
        let microsecond = fields.microsecond.unwrap_or(self.microsecond);
        validate_time(hour, minute, second, microsecond)?;
        let fold = validate_fold(fields.fold.unwrap_or(self.fold))?;
        Ok(Self::from_parts(
            hour,
            minute,
            second,
            microsecond,
            fields.offset.unwrap_or(self.offset),
            fold,
        ))
    }

    /// ISO-8601 text with automatic precision.
    pub fn isoformat(self) -> String {
        self.isoformat_with(Timespec::Auto)
    }

    /// ISO-8601 text at the given precision, plus the offset when aware.
    pub fn isoformat_with(self, timespec: Timespec) -> String {
        let mut out = iso::format_time(self, timespec);
        if let Some(offset) = self.utcoffset() {
            out.push_str(&iso::format_offset(offset));
        }
        out
    }

    /// Microseconds since midnight, ignoring the offset.
    pub(crate) fn micros_of_day(self) -> i64 {
        (i64::from(self.hour) * 3_600 + i64::from(self.minute) * 60 + i64::from(self.second))
            * MICROS_PER_SECOND
            + i64::from(self.microsecond)
    }

    /// Value used for equality, ordering and hashing: wall-clock
    /// microseconds, shifted to UTC when aware.
    fn comparison_key(self) -> i128 {
        let local = i128::from(self.micros_of_day());
        match self.utcoffset() {
            Some(offset) => local - offset.total_microseconds(),
            None => local,
        }
    }

    /// Orders two times.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::MixedAwareness`] if exactly one side is aware.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, CalendarError> {
        if self.is_aware() != other.is_aware() {
            return Err(CalendarError::MixedAwareness { op: "compare" });
        }
        Ok(self.comparison_key().cmp(&other.comparison_key()))
    }
}

impl PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        self.is_aware() == other.is_aware() && self.comparison_key() == other.comparison_key()
    }
}

impl Eq for Time {}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl Hash for Time {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.comparison_key().hash(state);
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.isoformat())
    }
}

impl FromStr for Time {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        iso::parse_time(s)
    }
}
