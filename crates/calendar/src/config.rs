//! Formatting options for ISO-8601 output.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::CalendarError;

/// Precision of the time component in ISO-8601 output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timespec {
    /// `Seconds` when the microsecond is zero, `Microseconds` otherwise.
    #[default]
    Auto,
    /// `HH`
    Hours,
    /// `HH:MM`
    Minutes,
    /// `HH:MM:SS`
    Seconds,
    /// `HH:MM:SS.fff`; the microsecond is truncated, not rounded.
    Milliseconds,
    /// `HH:MM:SS.ffffff`
    Microseconds,
}

impl Timespec {
    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
            Self::Milliseconds => "milliseconds",
            Self::Microseconds => "microseconds",
        }
    }
}

impl FromStr for Timespec {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "hours" => Ok(Self::Hours),
            "minutes" => Ok(Self::Minutes),
            "seconds" => Ok(Self::Seconds),
            "milliseconds" => Ok(Self::Milliseconds),
            "microseconds" => Ok(Self::Microseconds),
            other => Err(CalendarError::InvalidTimespec {
                timespec: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Timespec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for [`DateTime::isoformat_with`](crate::DateTime::isoformat_with).
///
/// Can be embedded in a host application's TOML configuration.
///
/// # Example
///
/// ```
/// use almanac_calendar::{IsoFormat, Timespec};
///
/// let format = IsoFormat::new()
///     .with_separator(' ')
///     .with_timespec(Timespec::Minutes);
///
/// assert_eq!(format.separator(), ' ');
/// assert_eq!(format.timespec(), Timespec::Minutes);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IsoFormat {
    /// Character between the date and the time.
    #[serde(default = "default_separator")]
    separator: char,
    /// Precision of the time component.
    #[serde(default)]
    timespec: Timespec,
}

fn default_separator() -> char {
    'T'
}

impl IsoFormat {
    /// Creates the default format: `'T'` separator, [`Timespec::Auto`].
    pub fn new() -> Self {
        Self {
            separator: default_separator(),
            timespec: Timespec::Auto,
        }
    }

    /// Sets the date/time separator.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Sets the time precision.
    pub fn with_timespec(mut self, timespec: Timespec) -> Self {
        self.timespec = timespec;
        self
    }

    /// Returns the date/time separator.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Returns the time precision.
    pub fn timespec(&self) -> Timespec {
        self.timespec
    }
}

impl Default for IsoFormat {
    fn default() -> Self {
        Self::new()
    }
}
