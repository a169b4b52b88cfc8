//! Combined date and time of day, naive or aware.
//!
//! Arithmetic runs on a single microsecond count measured from
//! 0001-01-01T00:00 and is converted back through the ordinal day, so
//! carries across month and year ends fall out of the calendar math.
//!
//! Conversions involving naive *local* time need a [`LocalZone`]; the
//! resolution of skipped and repeated wall times follows the fold rule:
//! `fold = 0` picks the earlier of two candidate instants and `fold = 1`
//! the later one.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::str::FromStr;

use tracing::debug;

use crate::clock::{Clock, LocalZone, MAX_FOLD_SECONDS};
use crate::config::{IsoFormat, Timespec};
use crate::date::{self, Date, IsoWeekDate, TimeTuple};
use crate::duration::{Duration, MICROS_PER_DAY, MICROS_PER_SECOND};
use crate::error::CalendarError;
use crate::gregorian::{EPOCH_ORDINAL, MAX_ORDINAL};
use crate::iso;
use crate::offset::FixedOffset;
use crate::time::{validate_fold, validate_time, Time};

/// Microseconds from 0001-01-01T00:00 to the POSIX epoch.
const EPOCH_MICROS: i128 = (EPOCH_ORDINAL as i128 - 1) * MICROS_PER_DAY as i128;

/// One past the last representable microsecond.
const END_MICROS: i128 = MAX_ORDINAL as i128 * MICROS_PER_DAY as i128;

/// Float timestamps at or beyond this magnitude are rejected before any
/// integer conversion. Far outside the year range either way.
const MAX_TIMESTAMP_SECONDS: f64 = 1e14;

/// A date and a time of day, optionally carrying a fixed UTC offset.
///
/// Equality and hashing follow the same rule as [`Time`]: aware values
/// compare as UTC instants, naive values by their fields, and a naive
/// value never equals an aware one.
#[derive(Debug, Clone, Copy)]
pub struct DateTime {
    date: Date,
    time: Time,
}

/// Field overrides for [`DateTime::replace`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateTimeReplace {
    pub year: Option<i32>,
    pub month: Option<u8>,
    pub day: Option<u8>,
    pub hour: Option<u8>,
    pub minute: Option<u8>,
    pub second: Option<u8>,
    pub microsecond: Option<u32>,
    /// `Some(None)` strips the offset.
    pub offset: Option<Option<FixedOffset>>,
    pub fold: Option<u8>,
}

impl DateTime {
    /// 0001-01-01T00:00:00, naive.
    pub const MIN: Self = Self {
        date: Date::MIN,
        time: Time::MIN,
    };

    /// 9999-12-31T23:59:59.999999, naive.
    pub const MAX: Self = Self {
        date: Date::MAX,
        time: Time::MAX,
    };

    /// Creates a naive date-time.
    ///
    /// # Errors
    ///
    /// Returns the [`CalendarError`] of the first invalid field, in
    /// year-to-microsecond order.
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        microsecond: u32,
    ) -> Result<Self, CalendarError> {
        Ok(Self {
            date: Date::new(year, month, day)?,
            time: Time::new(hour, minute, second, microsecond)?,
        })
    }

    /// Joins a date and a time; the time's offset and fold carry over.
    pub fn combine(date: Date, time: Time) -> Self {
        Self { date, time }
    }

    /// Parses `YYYY-MM-DD[<sep>HH[:MM[:SS[.fff[fff]]]][±HH:MM[:SS[.ffffff]]]]`.
    pub fn from_isoformat(s: &str) -> Result<Self, CalendarError> {
        iso::parse_datetime(s)
    }

    /// Returns a copy carrying `offset`. The wall-clock fields are unchanged.
    pub fn with_offset(self, offset: FixedOffset) -> Self {
        Self {
            date: self.date,
            time: self.time.with_offset(offset),
        }
    }

    /// Returns a copy with the given fold flag.
    pub fn with_fold(self, fold: u8) -> Result<Self, CalendarError> {
        Ok(Self {
            date: self.date,
            time: self.time.with_fold(fold)?,
        })
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.date.year()
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.date.month()
    }

    /// Returns the day of the month.
    pub fn day(self) -> u8 {
        self.date.day()
    }

    /// Returns the hour (0..=23).
    pub fn hour(self) -> u8 {
        self.time.hour()
    }

    /// Returns the minute (0..=59).
    pub fn minute(self) -> u8 {
        self.time.minute()
    }

    /// Returns the second (0..=59).
    pub fn second(self) -> u8 {
        self.time.second()
    }

    /// Returns the microsecond (0..=999_999).
    pub fn microsecond(self) -> u32 {
        self.time.microsecond()
    }

    /// 0 or 1; 1 marks the second occurrence of a repeated local time.
    pub fn fold(self) -> u8 {
        self.time.fold()
    }

    /// The attached offset, if any.
    pub fn offset(self) -> Option<FixedOffset> {
        self.time.offset()
    }

    /// `true` if an offset is attached.
    pub fn is_aware(self) -> bool {
        self.time.is_aware()
    }

    /// The date part.
    pub fn date(self) -> Date {
        self.date
    }

    /// The time part without its offset; fold is kept.
    pub fn time(self) -> Time {
        Time::from_parts(
            self.hour(),
            self.minute(),
            self.second(),
            self.microsecond(),
            None,
            self.fold(),
        )
    }

    /// The time part including its offset.
    pub fn timetz(self) -> Time {
        self.time
    }

    /// Offset east of UTC, `None` for naive values.
    pub fn utcoffset(self) -> Option<Duration> {
        self.time.utcoffset()
    }

    /// Zone name, `None` for naive values.
    pub fn tzname(self) -> Option<String> {
        self.time.tzname()
    }

    /// Daylight-saving adjustment; always `None` with fixed offsets.
    pub fn dst(self) -> Option<Duration> {
        self.time.dst()
    }

    /// Proleptic Gregorian ordinal of the date part; 0001-01-01 is day 1.
    pub fn to_ordinal(self) -> i32 {
        self.date.to_ordinal()
    }

    /// Day of the week, Monday = 0.
    pub fn weekday(self) -> u8 {
        self.date.weekday()
    }

    /// Day of the week, Monday = 1.
    pub fn iso_weekday(self) -> u8 {
        self.date.iso_weekday()
    }

    /// Day of the year, January 1 = 1.
    pub fn day_of_year(self) -> u16 {
        self.date.day_of_year()
    }

    /// ISO year, week number and weekday of the date part.
    pub fn iso_calendar(self) -> IsoWeekDate {
        self.date.iso_calendar()
    }

    /// Returns a copy with some fields overridden; the whole tuple is
    /// validated again.
    pub fn replace(self, fields: DateTimeReplace) -> Result<Self, CalendarError> {
        let date = Date::new(
            fields.year.unwrap_or(self.year()),
            fields.month.unwrap_or(self.month()),
            fields.day.unwrap_or(self.day()),
        )?;
        let hour = fields.hour.unwrap_or(self.hour());
        let minute = fields.minute.unwrap_or(self.minute());
        let second = fields.second.unwrap_or(self.second());
        let microsecond = fields.microsecond.unwrap_or(self.microsecond());
        validate_time(hour, minute, second, microsecond)?;
        let fold = validate_fold(fields.fold.unwrap_or(self.fold()))?;
        let offset = fields.offset.unwrap_or(self.offset());
        Ok(Self {
            date,
            time: Time::from_parts(hour, minute, second, microsecond, offset, fold),
        })
    }

    /// Wall-clock microseconds since 0001-01-01T00:00, ignoring the offset.
    fn local_micros(self) -> i128 {
        i128::from(self.to_ordinal() - 1) * i128::from(MICROS_PER_DAY)
            + i128::from(self.time.micros_of_day())
    }

    /// Inverse of [`local_micros`](Self::local_micros). The result has fold 0.
    fn from_local_micros(micros: i128, offset: Option<FixedOffset>) -> Result<Self, CalendarError> {
        if !(0..END_MICROS).contains(&micros) {
            return Err(CalendarError::DateOverflow);
        }
        let per_day = i128::from(MICROS_PER_DAY);
        let ordinal = (micros / per_day) as i32 + 1;
        Ok(Self {
            date: Date::from_ordinal(ordinal)?,
            time: Time::from_micros_of_day((micros % per_day) as i64, offset),
        })
    }

    /// Equality, ordering and hashing key.
    fn comparison_key(self) -> i128 {
        match self.utcoffset() {
            Some(offset) => self.local_micros() - offset.total_microseconds(),
            None => self.local_micros(),
        }
    }

    /// Orders two date-times.
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

    /// Moves by `duration`, keeping the offset and resetting fold.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DateOverflow`] if the result leaves the
    /// supported range.
    pub fn checked_add(self, duration: &Duration) -> Result<Self, CalendarError> {
        Self::from_local_micros(
            self.local_micros() + duration.total_microseconds(),
            self.offset(),
        )
    }

    /// Moves back by `duration`.
    pub fn checked_sub(self, duration: &Duration) -> Result<Self, CalendarError> {
        Self::from_local_micros(
            self.local_micros() - duration.total_microseconds(),
            self.offset(),
        )
    }

    /// Elapsed time from `other` to `self`. Aware operands are compared as
    /// UTC instants.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::MixedAwareness`] if exactly one side is aware.
    pub fn duration_since(self, other: Self) -> Result<Duration, CalendarError> {
        if self.is_aware() != other.is_aware() {
            return Err(CalendarError::MixedAwareness { op: "subtract" });
        }
        Duration::from_total_microseconds(self.comparison_key() - other.comparison_key())
    }

    /// Same instant expressed in another offset.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::MissingOffset`] for naive values (use
    /// [`astimezone_local`](Self::astimezone_local) to interpret them as
    /// local time), or [`CalendarError::DateOverflow`] if the shifted wall
    /// time leaves the supported range.
    pub fn astimezone(self, target: FixedOffset) -> Result<Self, CalendarError> {
        if !self.is_aware() {
            return Err(CalendarError::MissingOffset { op: "astimezone" });
        }
        Self::from_local_micros(
            self.comparison_key() + target.utcoffset().total_microseconds(),
            Some(target),
        )
    }

    /// Converts to the offset `zone` has in force at this instant. Naive
    /// values are taken to be local time in `zone`.
    pub fn astimezone_local(self, zone: &impl LocalZone) -> Result<Self, CalendarError> {
        let utc_micros = match self.utcoffset() {
            Some(offset) => self.local_micros() - offset.total_microseconds(),
            None => {
                let utc_seconds = self.mktime(zone);
                let offset = zone.utc_offset_at(utc_seconds);
                self.local_micros() - offset.total_microseconds()
            }
        };
        let utc_seconds = (utc_micros - EPOCH_MICROS).div_euclid(i128::from(MICROS_PER_SECOND));
        let offset = FixedOffset::new(zone.utc_offset_at(utc_seconds as i64))?;
        Self::from_local_micros(utc_micros + offset.utcoffset().total_microseconds(), Some(offset))
    }

    /// POSIX timestamp of an aware value.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::MissingOffset`] for naive values; use
    /// [`timestamp_local`](Self::timestamp_local) for those.
    pub fn timestamp(self) -> Result<f64, CalendarError> {
        if !self.is_aware() {
            return Err(CalendarError::MissingOffset { op: "timestamp" });
        }
        Ok((self.comparison_key() - EPOCH_MICROS) as f64 / MICROS_PER_SECOND as f64)
    }

    /// POSIX timestamp, reading naive values as local time in `zone`.
    ///
    /// A wall time skipped by a forward transition maps as if the old
    /// offset still applied (`fold = 0`) or the new one already did
    /// (`fold = 1`). A repeated wall time maps to its first occurrence
    /// with `fold = 0` and its second with `fold = 1`.
    pub fn timestamp_local(self, zone: &impl LocalZone) -> f64 {
        if self.is_aware() {
            return (self.comparison_key() - EPOCH_MICROS) as f64 / MICROS_PER_SECOND as f64;
        }
        self.mktime(zone) as f64 + f64::from(self.microsecond()) / MICROS_PER_SECOND as f64
    }

    /// Whole UTC seconds for a naive local time, resolving gaps and folds.
    fn mktime(self, zone: &impl LocalZone) -> i64 {
        let t = (self.local_micros() - EPOCH_MICROS).div_euclid(i128::from(MICROS_PER_SECOND)) as i64;
        let local = |u: i64| zone.local_seconds(u);

        let a = local(t) - t;
        let u1 = t - a;
        let t1 = local(u1);
        let b = if t1 == t {
            let probe = if self.fold() == 0 {
                u1 - MAX_FOLD_SECONDS
            } else {
                u1 + MAX_FOLD_SECONDS
            };
            let b = local(probe) - probe;
            if a == b {
                return u1;
            }
            b
        } else {
            t1 - u1
        };

        // Two distinct offsets are in play around `t`.
        let u2 = t - b;
        if local(u2) == t {
            debug!(local_seconds = t, fold = self.fold(), "local time near a transition");
            return u2;
        }
        if t1 == t {
            debug!(local_seconds = t, fold = self.fold(), "local time near a transition");
            return u1;
        }
        debug!(local_seconds = t, fold = self.fold(), "local time falls in a gap");
        if self.fold() == 0 {
            u1.max(u2)
        } else {
            u1.min(u2)
        }
    }

    /// Aware date-time for a POSIX timestamp, expressed in `offset`.
    ///
    /// Microseconds are rounded half-to-even.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::NonFinite`] for NaN and
    /// [`CalendarError::TimestampOutOfRange`] when the instant falls
    /// outside the supported years.
    pub fn from_timestamp(timestamp: f64, offset: FixedOffset) -> Result<Self, CalendarError> {
        let utc_micros = timestamp_micros(timestamp)?;
        Self::from_local_micros(utc_micros + offset.utcoffset().total_microseconds(), Some(offset))
            .map_err(|_| out_of_range(timestamp))
    }

    /// Naive UTC date-time for a POSIX timestamp.
    pub fn utc_from_timestamp(timestamp: f64) -> Result<Self, CalendarError> {
        let utc_micros = timestamp_micros(timestamp)?;
        Self::from_local_micros(utc_micros, None).map_err(|_| out_of_range(timestamp))
    }

    /// Naive local date-time for a POSIX timestamp.
    ///
    /// When the local time occurs twice, the second occurrence gets
    /// `fold = 1`.
    pub fn from_timestamp_local(timestamp: f64, zone: &impl LocalZone) -> Result<Self, CalendarError> {
        let (t, us) = split_timestamp(timestamp)?;
        let wall = zone.local_seconds(t);

        // Look one maximal fold back for a backward transition whose
        // repeated span contains `wall`.
        let shift = wall - zone.local_seconds(t - MAX_FOLD_SECONDS) - MAX_FOLD_SECONDS;
        let fold = u8::from(shift < 0 && zone.local_seconds(t + shift) == wall);

        let micros = EPOCH_MICROS + i128::from(wall) * i128::from(MICROS_PER_SECOND) + i128::from(us);
        let result = Self::from_local_micros(micros, None).map_err(|_| out_of_range(timestamp))?;
        Ok(Self {
            date: result.date,
            time: result.time.with_fold(fold)?,
        })
    }

    /// Current time from `clock`: naive local time when `offset` is
    /// `None`, otherwise aware in `offset`.
    pub fn now(clock: &impl Clock, offset: Option<FixedOffset>) -> Result<Self, CalendarError> {
        let reading = clock.read();
        let shift = match offset {
            Some(offset) => offset.utcoffset(),
            None => reading.local_offset,
        };
        Self::from_local_micros(reading.utc_micros() + shift.total_microseconds(), offset)
    }

    /// Current UTC time from `clock`, naive.
    pub fn utc_now(clock: &impl Clock) -> Result<Self, CalendarError> {
        Self::from_local_micros(clock.read().utc_micros(), None)
    }

    /// Broken-down time. `is_dst` is unknown for fixed offsets.
    pub fn timetuple(self) -> TimeTuple {
        TimeTuple {
            hour: self.hour(),
            minute: self.minute(),
            second: self.second(),
            ..self.date.timetuple()
        }
    }

    /// C `asctime` layout, e.g. `"Sat Mar  2 18:03:05 2002"`.
    pub fn ctime(self) -> String {
        date::ctime(self.date, self.hour(), self.minute(), self.second())
    }

    /// ISO-8601 text with `'T'` separator and automatic precision.
    pub fn isoformat(self) -> String {
        self.isoformat_with(&IsoFormat::default())
    }

    /// ISO-8601 text with the given separator and precision.
    pub fn isoformat_with(self, format: &IsoFormat) -> String {
        let mut out = self.date.isoformat();
        out.push(format.separator());
        out.push_str(&self.time.isoformat_with(format.timespec()));
        out
    }
}

/// Splits a float timestamp into whole seconds and microseconds in
/// `0..1_000_000`, rounding the fraction half-to-even.
fn split_timestamp(timestamp: f64) -> Result<(i64, i64), CalendarError> {
    if timestamp.is_nan() {
        return Err(CalendarError::NonFinite { value: timestamp });
    }
    if timestamp.is_infinite() || timestamp.abs() >= MAX_TIMESTAMP_SECONDS {
        return Err(out_of_range(timestamp));
    }
    let whole = timestamp.trunc();
    let mut seconds = whole as i64;
    let mut micros = ((timestamp - whole) * 1e6).round_ties_even() as i64;
    if micros >= MICROS_PER_SECOND {
        seconds += 1;
        micros -= MICROS_PER_SECOND;
    } else if micros < 0 {
        seconds -= 1;
        micros += MICROS_PER_SECOND;
    }
    Ok((seconds, micros))
}

/// Microseconds since 0001-01-01T00:00 UTC for a float timestamp.
fn timestamp_micros(timestamp: f64) -> Result<i128, CalendarError> {
    let (seconds, micros) = split_timestamp(timestamp)?;
    Ok(EPOCH_MICROS + i128::from(seconds) * i128::from(MICROS_PER_SECOND) + i128::from(micros))
}

fn out_of_range(timestamp: f64) -> CalendarError {
    debug!(timestamp, "timestamp outside the supported range");
    CalendarError::TimestampOutOfRange { timestamp }
}

impl PartialEq for DateTime {
    fn eq(&self, other: &Self) -> bool {
        self.is_aware() == other.is_aware() && self.comparison_key() == other.comparison_key()
    }
}

impl Eq for DateTime {}

impl PartialOrd for DateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl Hash for DateTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.comparison_key().hash(state);
    }
}

impl fmt::Display for DateTime {
    /// ISO-8601 with a space between date and time.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = IsoFormat::new()
            .with_separator(' ')
            .with_timespec(Timespec::Auto);
        f.write_str(&self.isoformat_with(&format))
    }
}

impl FromStr for DateTime {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        iso::parse_datetime(s)
    }
}

impl Add<Duration> for DateTime {
    type Output = DateTime;

    /// # Panics
    ///
    /// Panics if the result leaves the supported range.
    fn add(self, rhs: Duration) -> DateTime {
        self.checked_add(&rhs).expect("date value out of range")
    }
}

impl Sub<Duration> for DateTime {
    type Output = DateTime;

    /// # Panics
    ///
    /// Panics if the result leaves the supported range.
    fn sub(self, rhs: Duration) -> DateTime {
        self.checked_sub(&rhs).expect("date value out of range")
    }
}

impl Sub for DateTime {
    type Output = Result<Duration, CalendarError>;

    fn sub(self, rhs: DateTime) -> Self::Output {
        self.duration_since(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn dt(y: i32, mo: u8, d: u8, h: u8, mi: u8, s: u8) -> DateTime {
        DateTime::new(y, mo, d, h, mi, s, 0).unwrap()
    }

    fn east(hours: i64) -> FixedOffset {
        FixedOffset::east(hours, 0).unwrap()
    }

    /// UTC-5 with an hour of daylight saving between two instants.
    fn toy_zone(dst_start: i64, dst_end: i64) -> impl Fn(i64) -> Duration {
        move |u| {
            if (dst_start..dst_end).contains(&u) {
                Duration::from_hours(-4).unwrap()
            } else {
                Duration::from_hours(-5).unwrap()
            }
        }
    }

    #[test]
    fn new_validates_in_order() {
        assert_eq!(
            DateTime::new(2000, 13, 1, 25, 0, 0, 0).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
        assert_eq!(
            DateTime::new(2000, 1, 1, 25, 0, 0, 0).unwrap_err(),
            CalendarError::InvalidHour { hour: 25 }
        );
    }

    #[test]
    fn add_carries_across_year_end() {
        let t = dt(2002, 12, 31, 23, 59, 59);
        assert_eq!(t + Duration::from_seconds(1).unwrap(), dt(2003, 1, 1, 0, 0, 0));
        let leap = dt(2004, 2, 28, 12, 0, 0) + Duration::from_hours(24).unwrap();
        assert_eq!(leap, dt(2004, 2, 29, 12, 0, 0));
        assert_eq!(leap - Duration::from_hours(24).unwrap(), dt(2004, 2, 28, 12, 0, 0));
    }

    #[test]
    fn add_keeps_offset_and_resets_fold() {
        let t = dt(2002, 3, 2, 1, 0, 0).with_offset(east(3)).with_fold(1).unwrap();
        let later = t + Duration::from_hours(1).unwrap();
        assert_eq!(later.offset(), Some(east(3)));
        assert_eq!(later.fold(), 0);
        assert_eq!(later.hour(), 2);
    }

    #[test]
    fn add_overflow() {
        assert_eq!(
            DateTime::MAX.checked_add(&Duration::RESOLUTION).unwrap_err(),
            CalendarError::DateOverflow
        );
        assert_eq!(
            DateTime::MIN.checked_sub(&Duration::RESOLUTION).unwrap_err(),
            CalendarError::DateOverflow
        );
    }

    #[test]
    fn subtraction_of_aware_values() {
        let a = dt(2000, 1, 1, 12, 0, 0).with_offset(east(-5));
        let b = dt(2000, 1, 1, 12, 0, 0).with_offset(east(2));
        assert_eq!((a - b).unwrap(), Duration::from_hours(7).unwrap());
        assert_eq!((b - a).unwrap(), Duration::from_hours(-7).unwrap());
    }

    #[test]
    fn subtraction_of_mixed_values_fails() {
        let naive = dt(2000, 1, 1, 12, 0, 0);
        let aware = naive.with_offset(FixedOffset::UTC);
        assert_eq!(
            (aware - naive).unwrap_err(),
            CalendarError::MixedAwareness { op: "subtract" }
        );
    }

    #[test]
    fn min_to_max_span() {
        let span = (DateTime::MAX - DateTime::MIN).unwrap();
        assert_eq!(span.days(), MAX_ORDINAL - 1);
        assert_eq!(span.seconds(), 86_399);
        assert_eq!(span.microseconds(), 999_999);
    }

    #[test]
    fn equality_across_offsets() {
        let a = dt(2000, 1, 1, 12, 0, 0).with_offset(east(2));
        let b = dt(2000, 1, 1, 10, 0, 0).with_offset(FixedOffset::UTC);
        assert_eq!(a, b);
        assert_ne!(a, dt(2000, 1, 1, 12, 0, 0));
        assert!(a.partial_cmp(&dt(2000, 1, 1, 12, 0, 0)).is_none());
        assert!(a < dt(2000, 1, 1, 11, 0, 0).with_offset(FixedOffset::UTC));
    }

    #[test]
    fn time_and_timetz() {
        let t = dt(2000, 1, 1, 1, 2, 3).with_offset(east(1)).with_fold(1).unwrap();
        assert!(!t.time().is_aware());
        assert_eq!(t.time().fold(), 1);
        assert_eq!(t.timetz().offset(), Some(east(1)));
        assert_eq!(DateTime::combine(t.date(), t.timetz()), t);
    }

    #[test]
    fn replace_revalidates() {
        let t = dt(2000, 2, 29, 1, 2, 3);
        assert!(t
            .replace(DateTimeReplace {
                year: Some(2001),
                ..Default::default()
            })
            .is_err());
        let moved = t
            .replace(DateTimeReplace {
                year: Some(2004),
                microsecond: Some(7),
                offset: Some(Some(FixedOffset::UTC)),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(moved.year(), 2004);
        assert_eq!(moved.microsecond(), 7);
        assert!(moved.is_aware());
    }

    #[test]
    fn astimezone_preserves_instant() {
        let t = dt(2000, 1, 1, 12, 0, 0).with_offset(east(-5));
        let u = t.astimezone(east(3)).unwrap();
        assert_eq!((u.day(), u.hour()), (1, 20));
        assert_eq!(u, t);
        assert_eq!(
            dt(2000, 1, 1, 0, 0, 0).astimezone(FixedOffset::UTC).unwrap_err(),
            CalendarError::MissingOffset { op: "astimezone" }
        );
    }

    #[test]
    fn aware_timestamp() {
        let epoch = dt(1970, 1, 1, 0, 0, 0).with_offset(FixedOffset::UTC);
        assert_abs_diff_eq!(epoch.timestamp().unwrap(), 0.0);
        let t = dt(1970, 1, 1, 0, 0, 0).with_offset(east(-5));
        assert_abs_diff_eq!(t.timestamp().unwrap(), 18_000.0);
        assert_eq!(
            dt(1970, 1, 1, 0, 0, 0).timestamp().unwrap_err(),
            CalendarError::MissingOffset { op: "timestamp" }
        );
    }

    #[test]
    fn from_timestamp_rounds_half_even() {
        let t = DateTime::utc_from_timestamp(0.000_000_5).unwrap();
        assert!(t.microsecond() <= 1);
        let t = DateTime::utc_from_timestamp(-1.0e-7).unwrap();
        assert_eq!(t, dt(1970, 1, 1, 0, 0, 0));
        let t = DateTime::utc_from_timestamp(-0.999_999_9).unwrap();
        assert_eq!(t, dt(1969, 12, 31, 23, 59, 59));
        let t = DateTime::utc_from_timestamp(1_234_567_890.5).unwrap();
        assert_eq!(t.microsecond(), 500_000);
    }

    #[test]
    fn from_timestamp_with_offset() {
        let t = DateTime::from_timestamp(0.0, east(-5)).unwrap();
        assert_eq!((t.year(), t.month(), t.day(), t.hour()), (1969, 12, 31, 19));
        assert_eq!(t.offset(), Some(east(-5)));
        assert_abs_diff_eq!(t.timestamp().unwrap(), 0.0);
    }

    #[test]
    fn from_timestamp_rejects_unrepresentable() {
        for ts in [1e200, -1e200, f64::INFINITY, 1e13, -1e12] {
            assert_eq!(
                DateTime::utc_from_timestamp(ts).unwrap_err(),
                CalendarError::TimestampOutOfRange { timestamp: ts }
            );
        }
        assert!(matches!(
            DateTime::utc_from_timestamp(f64::NAN).unwrap_err(),
            CalendarError::NonFinite { .. }
        ));
    }

    #[test]
    fn local_timestamp_round_trip_with_fixed_zone() {
        let zone = east(2);
        let t = dt(2000, 6, 1, 12, 0, 0);
        let ts = t.timestamp_local(&zone);
        assert_abs_diff_eq!(ts, t.with_offset(zone).timestamp().unwrap());
        assert_eq!(DateTime::from_timestamp_local(ts, &zone).unwrap(), t);
    }

    #[test]
    fn local_timestamp_in_a_fold() {
        // Clocks fall back from 02:00 EDT to 01:00 EST at 06:00 UTC on day 1.
        let fall_back = 86_400 + 6 * 3_600;
        let zone = toy_zone(0, fall_back);
        // 01:30 local happens twice on day 1.
        let first = dt(1970, 1, 2, 1, 30, 0);
        let second = first.with_fold(1).unwrap();
        let t0 = first.timestamp_local(&zone);
        let t1 = second.timestamp_local(&zone);
        assert_abs_diff_eq!(t1 - t0, 3_600.0);
        assert_abs_diff_eq!(t0, (fall_back - 1_800) as f64);

        let back0 = DateTime::from_timestamp_local(t0, &zone).unwrap();
        let back1 = DateTime::from_timestamp_local(t1, &zone).unwrap();
        assert_eq!(back0, first);
        assert_eq!(back0.fold(), 0);
        assert_eq!(back1, first);
        assert_eq!(back1.fold(), 1);
    }

    #[test]
    fn local_timestamp_in_a_gap() {
        // Clocks spring forward from 02:00 EST to 03:00 EDT at 07:00 UTC on day 1.
        let spring = 86_400 + 7 * 3_600;
        let zone = toy_zone(spring, i64::MAX);
        let missing = dt(1970, 1, 2, 2, 30, 0);
        let t0 = missing.timestamp_local(&zone);
        let t1 = missing.with_fold(1).unwrap().timestamp_local(&zone);
        // fold=0 keeps the pre-transition offset, fold=1 the post-transition one.
        assert_abs_diff_eq!(t0, (spring + 1_800) as f64);
        assert_abs_diff_eq!(t1, (spring - 1_800) as f64);
    }

    #[test]
    fn astimezone_local_reads_naive_as_local() {
        let zone = east(-5);
        let t = dt(2000, 1, 1, 7, 0, 0);
        let aware = t.astimezone_local(&zone).unwrap();
        assert_eq!(aware.offset(), Some(zone));
        assert_eq!(aware.hour(), 7);
        let utc = aware.astimezone(FixedOffset::UTC).unwrap();
        assert_eq!(utc.hour(), 12);
    }

    #[test]
    fn now_from_frozen_clock() {
        use crate::clock::ClockReading;

        let reading = ClockReading::from_unix_micros(1_500_000, Duration::from_hours(-5).unwrap());
        let local = DateTime::now(&reading, None).unwrap();
        assert_eq!(local, DateTime::new(1969, 12, 31, 19, 0, 1, 500_000).unwrap());
        assert!(!local.is_aware());
        let utc = DateTime::utc_now(&reading).unwrap();
        assert_eq!(utc, DateTime::new(1970, 1, 1, 0, 0, 1, 500_000).unwrap());
        let aware = DateTime::now(&reading, Some(east(1))).unwrap();
        assert_eq!(aware.hour(), 1);
        assert_eq!(aware, utc.with_offset(FixedOffset::UTC));
    }

    #[test]
    fn timetuple_fields() {
        let tt = dt(2004, 12, 31, 6, 22, 33).timetuple();
        assert_eq!(
            (tt.year, tt.month, tt.day, tt.hour, tt.minute, tt.second, tt.weekday, tt.day_of_year),
            (2004, 12, 31, 6, 22, 33, 4, 366)
        );
        assert_eq!(tt.is_dst, None);
    }

    #[test]
    fn ctime_layout() {
        assert_eq!(dt(2002, 3, 2, 18, 3, 5).ctime(), "Sat Mar  2 18:03:05 2002");
    }

    #[test]
    fn display_uses_space() {
        let t = DateTime::new(2002, 3, 2, 18, 3, 5, 10).unwrap().with_offset(east(-5));
        assert_eq!(t.to_string(), "2002-03-02 18:03:05.000010-05:00");
        assert_eq!(t.isoformat(), "2002-03-02T18:03:05.000010-05:00");
        let format = IsoFormat::new().with_separator('_').with_timespec(Timespec::Hours);
        assert_eq!(t.isoformat_with(&format), "2002-03-02_18-05:00");
    }
}
