//! Capability traits shared by the value types, and [`Temporal`], a
//! kind-erased value for code that handles dates, times, date-times and
//! durations uniformly.
//!
//! Extension types wrap a core value and implement the traits; nothing
//! here relies on the concrete type beyond the trait methods.

use std::cmp::Ordering;

use crate::date::{Date, IsoWeekDate};
use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::CalendarError;
use crate::gregorian;
use crate::time::Time;

/// Anything with a Gregorian calendar date.
pub trait CivilDate {
    fn year(&self) -> i32;
    fn month(&self) -> u8;
    fn day(&self) -> u8;

    fn to_ordinal(&self) -> i32 {
        gregorian::ymd_to_ordinal(self.year(), self.month(), self.day())
    }

    /// Monday = 0.
    fn weekday(&self) -> u8 {
        gregorian::weekday(self.year(), self.month(), self.day())
    }

    /// Monday = 1.
    fn iso_weekday(&self) -> u8 {
        self.weekday() + 1
    }

    fn day_of_year(&self) -> u16 {
        gregorian::day_of_year(self.year(), self.month(), self.day())
    }

    fn iso_calendar(&self) -> IsoWeekDate {
        let (year, week, weekday) = gregorian::iso_calendar(self.year(), self.month(), self.day());
        IsoWeekDate {
            year,
            week,
            weekday,
        }
    }
}

/// Anything that can be written as ISO-8601 and may carry a UTC offset.
pub trait PointInTime {
    /// Offset east of UTC; `None` when naive.
    fn utcoffset(&self) -> Option<Duration>;

    fn is_aware(&self) -> bool {
        self.utcoffset().is_some()
    }

    fn isoformat(&self) -> String;
}

impl CivilDate for Date {
    fn year(&self) -> i32 {
        Date::year(*self)
    }

    fn month(&self) -> u8 {
        Date::month(*self)
    }

    fn day(&self) -> u8 {
        Date::day(*self)
    }
}

impl CivilDate for DateTime {
    fn year(&self) -> i32 {
        DateTime::year(*self)
    }

    fn month(&self) -> u8 {
        DateTime::month(*self)
    }

    fn day(&self) -> u8 {
        DateTime::day(*self)
    }
}

impl PointInTime for Date {
    fn utcoffset(&self) -> Option<Duration> {
        None
    }

    fn isoformat(&self) -> String {
        Date::isoformat(*self)
    }
}

impl PointInTime for Time {
    fn utcoffset(&self) -> Option<Duration> {
        Time::utcoffset(*self)
    }

    fn isoformat(&self) -> String {
        Time::isoformat(*self)
    }
}

impl PointInTime for DateTime {
    fn utcoffset(&self) -> Option<Duration> {
        DateTime::utcoffset(*self)
    }

    fn isoformat(&self) -> String {
        DateTime::isoformat(*self)
    }
}

/// A value of any of the four kinds.
///
/// Equality is total: values of different kinds are simply unequal.
/// Ordering and arithmetic are defined only for compatible kinds and
/// report a type error otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Temporal {
    Date(Date),
    Time(Time),
    DateTime(DateTime),
    Duration(Duration),
}

impl Temporal {
    /// Kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::DateTime(_) => "datetime",
            Self::Duration(_) => "duration",
        }
    }

    /// Orders two values of the same kind.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Incomparable`] across kinds and
    /// [`CalendarError::MixedAwareness`] for a naive/aware pair.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, CalendarError> {
        match (self, other) {
            (Self::Date(a), Self::Date(b)) => Ok(a.cmp(b)),
            (Self::Time(a), Self::Time(b)) => a.try_cmp(b),
            (Self::DateTime(a), Self::DateTime(b)) => a.try_cmp(b),
            (Self::Duration(a), Self::Duration(b)) => Ok(a.cmp(b)),
            _ => Err(CalendarError::Incomparable {
                lhs: self.kind(),
                rhs: other.kind(),
            }),
        }
    }

    /// `self + other`. Defined for point + duration, duration + point and
    /// duration + duration.
    pub fn checked_add(&self, other: &Self) -> Result<Self, CalendarError> {
        match (*self, *other) {
            (Self::Date(d), Self::Duration(delta)) | (Self::Duration(delta), Self::Date(d)) => {
                d.checked_add(&delta).map(Self::Date)
            }
            (Self::DateTime(t), Self::Duration(delta))
            | (Self::Duration(delta), Self::DateTime(t)) => t.checked_add(&delta).map(Self::DateTime),
            (Self::Duration(a), Self::Duration(b)) => a.checked_add(&b).map(Self::Duration),
            _ => Err(self.unsupported("+", other)),
        }
    }

    /// `self - other`. Defined for point - duration, point - point of the
    /// same kind (dates and date-times) and duration - duration.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, CalendarError> {
        match (*self, *other) {
            (Self::Date(d), Self::Duration(delta)) => d.checked_sub(&delta).map(Self::Date),
            (Self::Date(a), Self::Date(b)) => Ok(Self::Duration(a - b)),
            (Self::DateTime(t), Self::Duration(delta)) => t.checked_sub(&delta).map(Self::DateTime),
            (Self::DateTime(a), Self::DateTime(b)) => a.duration_since(b).map(Self::Duration),
            (Self::Duration(a), Self::Duration(b)) => a.checked_sub(&b).map(Self::Duration),
            _ => Err(self.unsupported("-", other)),
        }
    }

    /// `self * factor`; only durations scale.
    pub fn checked_mul(&self, factor: i64) -> Result<Self, CalendarError> {
        match self {
            Self::Duration(d) => d.checked_mul(factor).map(Self::Duration),
            _ => Err(CalendarError::UnsupportedOperation {
                op: "*",
                lhs: self.kind(),
                rhs: "integer",
            }),
        }
    }

    /// `self / divisor` with floor rounding; only durations divide.
    pub fn checked_div(&self, divisor: i64) -> Result<Self, CalendarError> {
        match self {
            Self::Duration(d) => d.checked_div(divisor).map(Self::Duration),
            _ => Err(CalendarError::UnsupportedOperation {
                op: "/",
                lhs: self.kind(),
                rhs: "integer",
            }),
        }
    }

    fn unsupported(&self, op: &'static str, other: &Self) -> CalendarError {
        CalendarError::UnsupportedOperation {
            op,
            lhs: self.kind(),
            rhs: other.kind(),
        }
    }
}

impl PartialOrd for Temporal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl From<Date> for Temporal {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl From<Time> for Temporal {
    fn from(value: Time) -> Self {
        Self::Time(value)
    }
}

impl From<DateTime> for Temporal {
    fn from(value: DateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<Duration> for Temporal {
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}
