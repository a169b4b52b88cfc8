//! Error types for the almanac-calendar crate.

use crate::duration::Duration;

/// Broad classification of a [`CalendarError`].
///
/// Callers that only care about *why* an operation failed (bad input,
/// incompatible operands, out-of-range result, malformed text) can match
/// on the kind instead of on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A field was outside its valid domain at construction or replace.
    Range,
    /// The operation was applied to an incompatible combination of values.
    Type,
    /// The result would lie outside the representable range.
    Overflow,
    /// Division of a duration by zero.
    ZeroDivision,
    /// ISO-8601 text failed strict grammar validation.
    Parse,
}

/// Error type for all fallible operations in the almanac-calendar crate.
///
/// Every error is raised synchronously and leaves no partially
/// constructed value behind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum CalendarError {
    /// Returned when a year is outside `MIN_YEAR..=MAX_YEAR`.
    #[error("invalid year: {year} (must be 1..=9999)")]
    InvalidYear {
        /// The invalid year that was provided.
        year: i32,
    },

    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a day number exceeds the number of days in the given month.
    #[error("invalid day: {day} for month {month} (max {max_day})")]
    InvalidDay {
        /// The invalid day number that was provided.
        day: u8,
        /// The month for which the day is invalid.
        month: u8,
        /// The maximum valid day for the given month and year.
        max_day: u8,
    },

    /// Returned when an ordinal day is outside `1..=MAX_ORDINAL`.
    #[error("invalid ordinal: {ordinal} (must be 1..=3652059)")]
    InvalidOrdinal {
        /// The invalid ordinal that was provided.
        ordinal: i64,
    },

    /// Returned when an ISO week number does not exist in its year.
    #[error("invalid week: {week} (year {year} has no such ISO week)")]
    InvalidWeek {
        /// The invalid week number.
        week: u8,
        /// The ISO year it was paired with.
        year: i32,
    },

    /// Returned when an ISO weekday is outside 1..=7.
    #[error("invalid weekday: {weekday} (must be 1..=7)")]
    InvalidWeekday {
        /// The invalid weekday.
        weekday: u8,
    },

    /// Returned when an hour is outside 0..=23.
    #[error("invalid hour: {hour} (must be 0..=23)")]
    InvalidHour {
        /// The invalid hour.
        hour: u8,
    },

    /// Returned when a minute is outside 0..=59.
    #[error("invalid minute: {minute} (must be 0..=59)")]
    InvalidMinute {
        /// The invalid minute.
        minute: u8,
    },

    /// Returned when a second is outside 0..=59. Leap seconds are not supported.
    #[error("invalid second: {second} (must be 0..=59)")]
    InvalidSecond {
        /// The invalid second.
        second: u8,
    },

    /// Returned when a microsecond is outside 0..=999999.
    #[error("invalid microsecond: {microsecond} (must be 0..=999999)")]
    InvalidMicrosecond {
        /// The invalid microsecond.
        microsecond: u32,
    },

    /// Returned when the fold flag is neither 0 nor 1.
    #[error("invalid fold: {fold} (must be 0 or 1)")]
    InvalidFold {
        /// The invalid fold value.
        fold: u8,
    },

    /// Returned when a UTC offset has a magnitude of 24 hours or more.
    #[error("offset must be strictly between -24h and 24h, got {offset}")]
    OffsetOutOfRange {
        /// The rejected offset.
        offset: Duration,
    },

    /// Returned when a timespec name is not one of the known precisions.
    #[error("unknown timespec: {timespec:?}")]
    InvalidTimespec {
        /// The unrecognized name.
        timespec: String,
    },

    /// Returned when a float input (timestamp or scale factor) is NaN or infinite.
    #[error("non-finite value: {value}")]
    NonFinite {
        /// The offending value.
        value: f64,
    },

    /// Returned when ordering or subtracting a naive value against an aware one.
    #[error("cannot {op} naive and aware values")]
    MixedAwareness {
        /// The attempted operation, e.g. `"compare"` or `"subtract"`.
        op: &'static str,
    },

    /// Returned when ordering two values of unrelated kinds.
    #[error("cannot order {lhs} against {rhs}")]
    Incomparable {
        /// Kind of the left operand.
        lhs: &'static str,
        /// Kind of the right operand.
        rhs: &'static str,
    },

    /// Returned when an arithmetic operator has no meaning for the operand kinds.
    #[error("unsupported operand kinds for {op}: {lhs} and {rhs}")]
    UnsupportedOperation {
        /// The operator symbol.
        op: &'static str,
        /// Kind of the left operand.
        lhs: &'static str,
        /// Kind of the right operand.
        rhs: &'static str,
    },

    /// Returned when a naive value needs a UTC offset that was not supplied.
    #[error("{op} requires an aware value or a local zone")]
    MissingOffset {
        /// The attempted operation.
        op: &'static str,
    },

    /// Returned when a duration would exceed ±999999999 days.
    #[error("duration out of range (magnitude must be below 1000000000 days)")]
    DurationOverflow,

    /// Returned when date arithmetic would leave `MIN_YEAR..=MAX_YEAR`.
    #[error("date value out of range")]
    DateOverflow,

    /// Returned when a POSIX timestamp maps outside the representable range.
    #[error("timestamp out of range: {timestamp}")]
    TimestampOutOfRange {
        /// The rejected timestamp.
        timestamp: f64,
    },

    /// Returned when dividing a duration by zero.
    #[error("division of a duration by zero")]
    DivisionByZero,

    /// Returned when ISO-8601 text fails strict parsing.
    #[error("invalid isoformat string {input:?}: {reason}")]
    InvalidIsoFormat {
        /// The complete offending input.
        input: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl CalendarError {
    /// Returns the broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidYear { .. }
            | Self::InvalidMonth { .. }
            | Self::InvalidDay { .. }
            | Self::InvalidOrdinal { .. }
            | Self::InvalidWeek { .. }
            | Self::InvalidWeekday { .. }
            | Self::InvalidHour { .. }
            | Self::InvalidMinute { .. }
            | Self::InvalidSecond { .. }
            | Self::InvalidMicrosecond { .. }
            | Self::InvalidFold { .. }
            | Self::OffsetOutOfRange { .. }
            | Self::InvalidTimespec { .. }
            | Self::NonFinite { .. } => ErrorKind::Range,
            Self::MixedAwareness { .. }
            | Self::Incomparable { .. }
            | Self::UnsupportedOperation { .. }
            | Self::MissingOffset { .. } => ErrorKind::Type,
            Self::DurationOverflow | Self::DateOverflow | Self::TimestampOutOfRange { .. } => {
                ErrorKind::Overflow
            }
            Self::DivisionByZero => ErrorKind::ZeroDivision,
            Self::InvalidIsoFormat { .. } => ErrorKind::Parse,
        }
    }

    pub(crate) fn iso(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidIsoFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
