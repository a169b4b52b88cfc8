//! Fixed UTC offsets, the only kind of time zone this crate knows.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::clock::LocalZone;
use crate::duration::{Duration, MICROS_PER_DAY};
use crate::error::CalendarError;
use crate::iso;

/// A constant offset east of UTC with an optional display name.
///
/// Equality and hashing look at the offset only; the name is cosmetic.
#[derive(Debug, Clone, Copy)]
pub struct FixedOffset {
    offset: Duration,
    name: Option<&'static str>,
}

impl FixedOffset {
    /// Zero offset.
    pub const UTC: Self = Self {
        offset: Duration::ZERO,
        name: None,
    };

    /// Creates an unnamed offset.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OffsetOutOfRange`] unless
    /// `-24h < offset < 24h`.
    pub fn new(offset: Duration) -> Result<Self, CalendarError> {
        if offset.total_microseconds().abs() >= i128::from(MICROS_PER_DAY) {
            return Err(CalendarError::OffsetOutOfRange { offset });
        }
        Ok(Self { offset, name: None })
    }

    /// Creates an offset that reports `name` from [`tzname`](Self::tzname).
    pub fn named(offset: Duration, name: &'static str) -> Result<Self, CalendarError> {
        Ok(Self {
            name: Some(name),
            ..Self::new(offset)?
        })
    }

    /// Creates an offset from whole hours and minutes east of UTC.
    ///
    /// `minutes` takes the sign of the whole offset, so `east(-5, -30)` is
    /// `-05:30`.
    pub fn east(hours: i64, minutes: i64) -> Result<Self, CalendarError> {
        let total = hours
            .checked_mul(60)
            .and_then(|m| m.checked_add(minutes))
            .ok_or(CalendarError::DurationOverflow)?;
        Self::new(Duration::from_minutes(total)?)
    }

    /// The offset east of UTC.
    pub fn utcoffset(&self) -> Duration {
        self.offset
    }

    /// Explicit name, if one was given.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Display name: the explicit name, `"UTC"` for a zero offset, or
    /// `"UTC±HH:MM[:SS[.ffffff]]"`.
    pub fn tzname(&self) -> String {
        match self.name {
            Some(name) => name.to_string(),
            None if self.offset.is_zero() => "UTC".to_string(),
            None => format!("UTC{}", iso::format_offset(self.offset)),
        }
    }

    /// Daylight-saving adjustment. Always `None` for a fixed offset.
    pub fn dst(&self) -> Option<Duration> {
        None
    }
}

impl PartialEq for FixedOffset {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl Eq for FixedOffset {}

impl Hash for FixedOffset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.offset.hash(state);
    }
}

impl fmt::Display for FixedOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tzname())
    }
}

impl LocalZone for FixedOffset {
    fn utc_offset_at(&self, _utc_seconds: i64) -> Duration {
        self.offset
    }
}
