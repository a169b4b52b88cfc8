//! ISO-8601 formatting and strict parsing.
//!
//! Accepted grammar:
//!
//! ```text
//! date     = YYYY "-" MM "-" DD
//! time     = HH [":" MM [":" SS ["." fff | "." ffffff]]] [offset]
//! offset   = ("+" | "-") HH ":" MM [":" SS ["." ffffff]]
//! datetime = date [<any one character> time]
//! ```
//!
//! A date-time is split by position: the first ten characters are the
//! date and the eleventh is the separator, whatever it is. This is what
//! lets `+` and `-` serve as separators: `2018-01-31-12:15` is a naive
//! 12:15, because the offset search only runs on the text after the
//! separator.

use tracing::trace;

use crate::config::Timespec;
use crate::date::Date;
use crate::datetime::DateTime;
use crate::duration::{Duration, DurationParts};
use crate::error::CalendarError;
use crate::offset::FixedOffset;
use crate::time::Time;

const MICROS_PER_HOUR: i128 = 3_600_000_000;
const MICROS_PER_MINUTE: i128 = 60_000_000;
const MICROS_PER_SECOND: i128 = 1_000_000;

pub(crate) fn format_date(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Wall-clock part only; the caller appends any offset.
pub(crate) fn format_time(time: Time, timespec: Timespec) -> String {
    let (h, m, s, us) = (time.hour(), time.minute(), time.second(), time.microsecond());
    let timespec = match timespec {
        Timespec::Auto if us != 0 => Timespec::Microseconds,
        Timespec::Auto => Timespec::Seconds,
        other => other,
    };
    match timespec {
        Timespec::Hours => format!("{h:02}"),
        Timespec::Minutes => format!("{h:02}:{m:02}"),
        Timespec::Seconds => format!("{h:02}:{m:02}:{s:02}"),
        Timespec::Milliseconds => format!("{h:02}:{m:02}:{s:02}.{:03}", us / 1_000),
        Timespec::Microseconds | Timespec::Auto => format!("{h:02}:{m:02}:{s:02}.{us:06}"),
    }
}

/// `±HH:MM`, widened to `±HH:MM:SS` or `±HH:MM:SS.ffffff` only when needed.
pub(crate) fn format_offset(offset: Duration) -> String {
    let total = offset.total_microseconds();
    let sign = if total < 0 { '-' } else { '+' };
    let total = total.abs();
    let hours = total / MICROS_PER_HOUR;
    let minutes = total % MICROS_PER_HOUR / MICROS_PER_MINUTE;
    let seconds = total % MICROS_PER_MINUTE / MICROS_PER_SECOND;
    let micros = total % MICROS_PER_SECOND;

    let mut out = format!("{sign}{hours:02}:{minutes:02}");
    if seconds != 0 || micros != 0 {
        out.push_str(&format!(":{seconds:02}"));
        if micros != 0 {
            out.push_str(&format!(".{micros:06}"));
        }
    }
    out
}

fn reject(input: &str, reason: impl Into<String>) -> CalendarError {
    let reason = reason.into();
    trace!(input, reason = %reason, "rejected isoformat string");
    CalendarError::iso(input, reason)
}

/// Value of a run of ASCII digits.
fn digits(input: &str, text: &[char]) -> Result<u32, CalendarError> {
    text.iter()
        .try_fold(0u32, |acc, c| c.to_digit(10).map(|d| acc * 10 + d))
        .ok_or_else(|| {
            let field: String = text.iter().collect();
            reject(input, format!("expected digits, found {field:?}"))
        })
}

fn expect_char(input: &str, found: char, expected: char, what: &str) -> Result<(), CalendarError> {
    if found == expected {
        Ok(())
    } else {
        Err(reject(input, format!("invalid {what} separator {found:?}")))
    }
}

/// `YYYY-MM-DD` from exactly ten characters.
fn date_from_chars(input: &str, text: &[char]) -> Result<Date, CalendarError> {
    debug_assert_eq!(text.len(), 10);
    let year = digits(input, &text[0..4])?;
    expect_char(input, text[4], '-', "date")?;
    let month = digits(input, &text[5..7])?;
    expect_char(input, text[7], '-', "date")?;
    let day = digits(input, &text[8..10])?;
    Date::new(year as i32, month as u8, day as u8).map_err(|e| reject(input, e.to_string()))
}

/// `HH[:MM[:SS[.fff|.ffffff]]]` as `[hour, minute, second, microsecond]`.
fn clock_fields(input: &str, text: &[char]) -> Result<[u32; 4], CalendarError> {
    let mut fields = [0u32; 4];
    let mut pos = 0;
    for (i, field) in fields.iter_mut().take(3).enumerate() {
        if text.len() - pos < 2 {
            return Err(reject(input, "incomplete time component"));
        }
        *field = digits(input, &text[pos..pos + 2])?;
        pos += 2;
        match text.get(pos) {
            None => break,
            Some(_) if i == 2 => break,
            Some(':') => pos += 1,
            Some(&c) => return Err(reject(input, format!("invalid time separator {c:?}"))),
        }
    }
    if pos < text.len() {
        if text[pos] != '.' {
            return Err(reject(input, "invalid microsecond component"));
        }
        let fraction = &text[pos + 1..];
        fields[3] = match fraction.len() {
            3 => digits(input, fraction)? * 1_000,
            6 => digits(input, fraction)?,
            _ => return Err(reject(input, "fractional seconds must have 3 or 6 digits")),
        };
    }
    Ok(fields)
}

/// Offset body after its sign: `HH:MM`, `HH:MM:SS` or `HH:MM:SS.ffffff`.
fn offset_from_chars(input: &str, negative: bool, text: &[char]) -> Result<FixedOffset, CalendarError> {
    if ![5, 8, 15].contains(&text.len()) {
        return Err(reject(input, "malformed UTC offset"));
    }
    let [hours, minutes, seconds, micros] = clock_fields(input, text)?;
    if hours == 0 && minutes == 0 && seconds == 0 && micros == 0 {
        return Ok(FixedOffset::UTC);
    }
    let magnitude = Duration::from_parts(DurationParts {
        hours: hours.into(),
        minutes: minutes.into(),
        seconds: seconds.into(),
        microseconds: micros.into(),
        ..Default::default()
    })?;
    let offset = if negative { -magnitude } else { magnitude };
    FixedOffset::new(offset).map_err(|e| reject(input, e.to_string()))
}

fn time_from_chars(input: &str, text: &[char]) -> Result<Time, CalendarError> {
    if text.len() < 2 {
        return Err(reject(input, "time too short"));
    }
    // A '-' anywhere takes precedence over a '+'.
    let sign_at = text
        .iter()
        .position(|&c| c == '-')
        .or_else(|| text.iter().position(|&c| c == '+'));
    let (clock, offset) = match sign_at {
        Some(at) => (&text[..at], Some(offset_from_chars(input, text[at] == '-', &text[at + 1..])?)),
        None => (text, None),
    };
    let [hour, minute, second, micros] = clock_fields(input, clock)?;
    let time = Time::new(hour as u8, minute as u8, second as u8, micros)
        .map_err(|e| reject(input, e.to_string()))?;
    Ok(match offset {
        Some(offset) => time.with_offset(offset),
        None => time,
    })
}

pub(crate) fn parse_date(input: &str) -> Result<Date, CalendarError> {
    let text: Vec<char> = input.chars().collect();
    if text.len() != 10 {
        return Err(reject(input, "date must be exactly YYYY-MM-DD"));
    }
    date_from_chars(input, &text)
}

pub(crate) fn parse_time(input: &str) -> Result<Time, CalendarError> {
    let text: Vec<char> = input.chars().collect();
    time_from_chars(input, &text)
}

pub(crate) fn parse_datetime(input: &str) -> Result<DateTime, CalendarError> {
    let text: Vec<char> = input.chars().collect();
    if text.len() < 10 {
        return Err(reject(input, "too short for a date"));
    }
    let date = date_from_chars(input, &text[..10])?;
    match text.len() {
        10 => Ok(DateTime::combine(date, Time::MIN)),
        11 => Err(reject(input, "no time after the separator")),
        _ => Ok(DateTime::combine(date, time_from_chars(input, &text[11..])?)),
    }
}
