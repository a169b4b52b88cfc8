//! Calendar dates in the proleptic Gregorian calendar.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::clock::{Clock, LocalZone};
use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::CalendarError;
use crate::gregorian::{self, MAX_ORDINAL, MAX_YEAR, MIN_YEAR};
use crate::iso;

/// A `(year, month, day)` date between 0001-01-01 and 9999-12-31.
///
/// The derived ordering is lexicographic on the fields, which is the
/// same as ordering by ordinal day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year: i32,
    month: u8,
    day: u8,
}

/// Field overrides for [`Date::replace`]; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateReplace {
    pub year: Option<i32>,
    pub month: Option<u8>,
    pub day: Option<u8>,
}

/// ISO-8601 week date: the week-numbering year, week 1..=53, and
/// weekday 1 (Monday) ..= 7 (Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoWeekDate {
    pub year: i32,
    pub week: u8,
    pub weekday: u8,
}

/// Broken-down time in the layout of C's `struct tm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeTuple {
    pub year: i32,
    /// 1..=12
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Monday = 0.
    pub weekday: u8,
    /// 1..=366
    pub day_of_year: u16,
    /// `None` when daylight saving is unknown (`tm_isdst == -1`).
    pub is_dst: Option<bool>,
}

const WEEKDAY_ABBR: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTH_ABBR: [&str; 13] = [
    "", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Date {
    /// 0001-01-01.
    pub const MIN: Self = Self {
        year: MIN_YEAR,
        month: 1,
        day: 1,
    };

    /// 9999-12-31.
    pub const MAX: Self = Self {
        year: MAX_YEAR,
        month: 12,
        day: 31,
    };

    /// Creates a new `Date`, validating year, then month, then day.
    ///
    /// # Errors
    ///
    /// Returns the [`CalendarError`] for the first field out of range.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::InvalidYear { year });
        }
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        let max_day = gregorian::days_in_month(year, month);
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::InvalidDay {
                day,
                month,
                max_day,
            });
        }
        Ok(Self { year, month, day })
    }

    /// Creates the date for an ordinal day (1 = 0001-01-01).
    pub fn from_ordinal(ordinal: i32) -> Result<Self, CalendarError> {
        if !(1..=MAX_ORDINAL).contains(&ordinal) {
            return Err(CalendarError::InvalidOrdinal {
                ordinal: i64::from(ordinal),
            });
        }
        let (year, month, day) = gregorian::ordinal_to_ymd(ordinal);
        Ok(Self { year, month, day })
    }

    /// Creates the date for an ISO week date.
    pub fn from_iso_calendar(year: i32, week: u8, weekday: u8) -> Result<Self, CalendarError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::InvalidYear { year });
        }
        let weeks_in_year = if gregorian::iso_calendar(year, 12, 28).1 == 53 {
            53
        } else {
            52
        };
        if !(1..=weeks_in_year).contains(&week) {
            return Err(CalendarError::InvalidWeek { week, year });
        }
        if !(1..=7).contains(&weekday) {
            return Err(CalendarError::InvalidWeekday { weekday });
        }
        // Jan 4 is always in week 1.
        let jan4 = gregorian::ymd_to_ordinal(year, 1, 4);
        let week1_monday = jan4 - i32::from(gregorian::weekday_from_ordinal(jan4));
        let ordinal = week1_monday + (i32::from(week) - 1) * 7 + i32::from(weekday) - 1;
        Self::from_ordinal(ordinal).map_err(|_| CalendarError::DateOverflow)
    }

    /// Parses `YYYY-MM-DD`.
    pub fn from_isoformat(s: &str) -> Result<Self, CalendarError> {
        iso::parse_date(s)
    }

    /// Today's local date according to `clock`.
    pub fn today(clock: &impl Clock) -> Result<Self, CalendarError> {
        Ok(DateTime::now(clock, None)?.date())
    }

    /// Local date of a POSIX timestamp.
    pub fn from_timestamp_local(timestamp: f64, zone: &impl LocalZone) -> Result<Self, CalendarError> {
        Ok(DateTime::from_timestamp_local(timestamp, zone)?.date())
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Returns the day within the month.
    pub fn day(self) -> u8 {
        self.day
    }

    /// Ordinal day, 1 for 0001-01-01.
    pub fn to_ordinal(self) -> i32 {
        gregorian::ymd_to_ordinal(self.year, self.month, self.day)
    }

    /// Day of the week, Monday = 0 through Sunday = 6.
    pub fn weekday(self) -> u8 {
        gregorian::weekday(self.year, self.month, self.day)
    }

    /// Day of the week, Monday = 1 through Sunday = 7.
    pub fn iso_weekday(self) -> u8 {
        self.weekday() + 1
    }

    /// Day of the year, 1-based.
    pub fn day_of_year(self) -> u16 {
        gregorian::day_of_year(self.year, self.month, self.day)
    }

    /// ISO-8601 week date.
    pub fn iso_calendar(self) -> IsoWeekDate {
        let (year, week, weekday) = gregorian::iso_calendar(self.year, self.month, self.day);
        IsoWeekDate {
            year,
            week,
            weekday,
        }
    }

    /// Returns a copy with some fields overridden; the result is validated
    /// as a whole.
    pub fn replace(self, fields: DateReplace) -> Result<Self, CalendarError> {
        Self::new(
            fields.year.unwrap_or(self.year),
            fields.month.unwrap_or(self.month),
            fields.day.unwrap_or(self.day),
        )
    }

    /// Broken-down time at midnight.
    pub fn timetuple(self) -> TimeTuple {
        TimeTuple {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: 0,
            minute: 0,
            second: 0,
            weekday: self.weekday(),
            day_of_year: self.day_of_year(),
            is_dst: None,
        }
    }

    /// C `asctime` layout, e.g. `"Sat Mar  2 00:00:00 2002"`.
    pub fn ctime(self) -> String {
        ctime(self, 0, 0, 0)
    }

    /// `YYYY-MM-DD`.
    pub fn isoformat(self) -> String {
        iso::format_date(self)
    }

    /// Moves by the `days` component of `duration`; its seconds and
    /// microseconds are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DateOverflow`] if the result leaves the
    /// supported range.
    pub fn checked_add(self, duration: &Duration) -> Result<Self, CalendarError> {
        self.shift_days(i64::from(duration.days()))
    }

    /// Moves back by the `days` component of `duration`.
    pub fn checked_sub(self, duration: &Duration) -> Result<Self, CalendarError> {
        self.shift_days(-i64::from(duration.days()))
    }

    /// Whole days from `other` to `self`.
    pub fn signed_duration_since(self, other: Date) -> Duration {
        Duration::whole_days(self.to_ordinal() - other.to_ordinal())
    }

    fn shift_days(self, days: i64) -> Result<Self, CalendarError> {
        let ordinal = i64::from(self.to_ordinal()) + days;
        if !(1..=i64::from(MAX_ORDINAL)).contains(&ordinal) {
            return Err(CalendarError::DateOverflow);
        }
        Self::from_ordinal(ordinal as i32)
    }
}

/// Shared by [`Date::ctime`] and [`DateTime::ctime`](crate::DateTime::ctime).
pub(crate) fn ctime(date: Date, hour: u8, minute: u8, second: u8) -> String {
    format!(
        "{} {} {:>2} {hour:02}:{minute:02}:{second:02} {:04}",
        WEEKDAY_ABBR[date.weekday() as usize],
        MONTH_ABBR[date.month as usize],
        date.day,
        date.year,
    )
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.isoformat())
    }
}

impl FromStr for Date {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        iso::parse_date(s)
    }
}

impl Add<Duration> for Date {
    type Output = Date;

    /// # Panics
    ///
    /// Panics if the result leaves the supported range.
    fn add(self, rhs: Duration) -> Date {
        self.checked_add(&rhs).expect("date out of range")
    }
}

impl Sub<Duration> for Date {
    type Output = Date;

    /// # Panics
    ///
    /// Panics if the result leaves the supported range.
    fn sub(self, rhs: Duration) -> Date {
        self.checked_sub(&rhs).expect("date out of range")
    }
}

impl Sub for Date {
    type Output = Duration;

    fn sub(self, rhs: Date) -> Duration {
        self.signed_duration_since(rhs)
    }
}
